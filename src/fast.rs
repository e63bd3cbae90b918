use crate::{AnalysisConfig, AnalysisError, AnalysisOutcome, AnalysisResult, LineScanner};
use memchr::{memchr, memchr_iter};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;
use std::thread;

const LINE_BREAK: u8 = b'\n';

/// Analyze an uncompressed local UTF-8 export using mmap and one scanner per
/// newline-aligned chunk, merged in file order.
///
/// Counts match the streaming path exactly. The revenue sum is added in a
/// different order and may differ in the last bits.
pub fn fast_local_analyze(path: &Path, config: AnalysisConfig) -> AnalysisResult<AnalysisOutcome> {
    let file = File::open(path).map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let len = file.metadata()?.len() as usize;
    if len == 0 {
        return Ok(LineScanner::new(config).finish());
    }
    // The file is treated as read-only input for the duration of the scan.
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    let data: &[u8] = &mmap[..];

    let body_start = memchr(LINE_BREAK, data).map_or(len, |i| i + 1);
    let starts = chunk_starts(data, body_start, num_cpus::get().max(1));
    tracing::debug!(source = %path.display(), bytes = len, chunks = starts.len() - 1, "fast scan");

    let scanners: Vec<LineScanner> = thread::scope(|s| {
        let handles: Vec<_> = starts
            .windows(2)
            .map(|w| {
                let slice = &data[w[0]..w[1]];
                let config = config.clone();
                s.spawn(move || scan_chunk(slice, config))
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut merged = LineScanner::without_header(config);
    for scanner in scanners {
        merged.merge(scanner);
    }
    Ok(merged.finish())
}

/// Split `data[body_start..]` into at most `parts` ranges that all begin at
/// the start of a line. The returned offsets include both ends.
fn chunk_starts(data: &[u8], body_start: usize, parts: usize) -> Vec<usize> {
    let len = data.len();
    let approx = (len - body_start) / parts;
    let mut starts = vec![body_start];
    let mut pos = body_start + approx;
    while starts.len() < parts && pos < len {
        let next = memchr(LINE_BREAK, &data[pos..]).map_or(len, |off| pos + off + 1);
        if next >= len {
            break;
        }
        starts.push(next);
        pos = (next + approx).max(body_start + starts.len() * approx);
    }
    starts.push(len);
    starts
}

fn scan_chunk(slice: &[u8], config: AnalysisConfig) -> LineScanner {
    let mut scanner = LineScanner::without_header(config);
    let mut cursor = 0usize;
    for nl in memchr_iter(LINE_BREAK, slice) {
        scanner.feed(&String::from_utf8_lossy(&slice[cursor..nl]));
        cursor = nl + 1;
    }
    if cursor < slice.len() {
        scanner.feed(&String::from_utf8_lossy(&slice[cursor..]));
    }
    scanner
}
