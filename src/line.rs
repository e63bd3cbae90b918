//! Quote-aware splitting of one raw dataset line.
//!
//! Every `"` toggles the quoted state and is dropped. Doubled quotes are not
//! an escape, so a literal quote can never appear inside a field.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Strip leading/trailing space, tab, CR and LF.
pub fn trim_field(fragment: &str) -> &str {
    fragment.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Split `line` into trimmed fields. Always yields at least one field.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    parse_line_into(line, &mut fields);
    fields
}

/// Same as [`parse_line`] but reuses the caller's buffer (cleared first).
pub fn parse_line_into(line: &str, fields: &mut Vec<String>) {
    fields.clear();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(trim_field(&current).to_owned());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    // an unterminated quote simply swallows the rest of the line
    fields.push(trim_field(&current).to_owned());
}
