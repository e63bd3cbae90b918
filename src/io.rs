use crate::codec::{RawLineCodec, Utf8Transcoder};
use crate::{AnalysisError, AnalysisResult};
use async_compression::tokio::bufread::{GzipDecoder, ZstdDecoder};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;

const READ_BUFFER: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zstd,
}

/// How to turn a raw byte source into UTF-8 sales rows.
#[derive(Debug, Clone)]
pub struct SourceMeta {
    /// File name or key, used for log messages.
    pub name_hint: String,
    pub compression: Compression,
    /// Character encoding of the export (UTF-8 unless told otherwise)
    pub charset: &'static encoding_rs::Encoding,
}

impl Default for SourceMeta {
    fn default() -> Self {
        Self {
            name_hint: String::new(),
            compression: Compression::None,
            charset: encoding_rs::UTF_8,
        }
    }
}

impl SourceMeta {
    /// Guess compression from the file extension (`.gz`, `.zst`).
    pub fn from_path(path: &Path) -> Self {
        let compression = match path.extension().and_then(|s| s.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("zst") => Compression::Zstd,
            _ => Compression::None,
        };
        Self {
            name_hint: path.display().to_string(),
            compression,
            ..Default::default()
        }
    }

    pub fn with_charset(mut self, charset: &'static encoding_rs::Encoding) -> Self {
        self.charset = charset;
        self
    }
}

/// Wrap a raw reader with decompression and, for non-UTF-8 charsets,
/// transcoding. The result yields UTF-8 bytes.
pub fn build_source_reader<R>(raw: R, meta: &SourceMeta) -> Box<dyn AsyncRead + Unpin + Send>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buf = BufReader::with_capacity(READ_BUFFER, raw);
    let decompressed: Box<dyn AsyncRead + Unpin + Send> = match meta.compression {
        Compression::Gzip => Box::new(GzipDecoder::new(buf)),
        Compression::Zstd => Box::new(ZstdDecoder::new(buf)),
        Compression::None => Box::new(buf),
    };

    if meta.charset == encoding_rs::UTF_8 {
        decompressed
    } else {
        let framed = FramedRead::new(decompressed, Utf8Transcoder::new(meta.charset));
        Box::new(StreamReader::new(framed))
    }
}

/// Open a local export. Failing to open is the one fatal input error.
pub async fn open_source(
    path: &Path,
    meta: &SourceMeta,
) -> AnalysisResult<Box<dyn AsyncRead + Unpin + Send>> {
    let file = File::open(path).await.map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(build_source_reader(file, meta))
}

/// Frame a UTF-8 byte source into raw lines.
pub fn raw_lines<R: AsyncRead>(reader: R) -> FramedRead<R, RawLineCodec> {
    FramedRead::with_capacity(reader, RawLineCodec::new(), READ_BUFFER)
}
