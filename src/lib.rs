//! Single-pass analysis of world car sales exports.
//!
//! - Streaming path: local files, optionally gzip/zstd compressed or in a
//!   legacy charset, read line by line on one task.
//! - Fast local path: feature `fast_local`, uncompressed local UTF-8 only,
//!   mmapped and split across threads with mergeable accumulators.
//!
//! Pipeline per line: [`line::parse_line_into`] → [`SalesRecord::from_fields`]
//! → [`SalesAggregator::observe`]. Rows that fail to build are counted and
//! dropped; only failing to read the input is an error.
#![cfg_attr(docsrs, feature(doc_cfg))]
//
pub mod aggregate;
mod codec;
pub mod config;
#[cfg(feature = "fast_local")]
mod fast;
mod io;
pub mod line;
pub mod record;
pub mod report;
pub mod schema;

pub use crate::aggregate::{Accumulators, Distribution, SalesAggregator};
pub use crate::codec::RawLineCodec;
pub use crate::config::AnalysisConfig;
#[cfg(feature = "fast_local")]
pub use crate::fast::fast_local_analyze;
pub use crate::io::{build_source_reader, open_source, raw_lines, Compression, SourceMeta};
pub use crate::record::{RowRejection, SalesRecord};
pub use crate::report::Report;

use futures::StreamExt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncRead;

/// Fatal errors. Malformed rows are not errors; see [`RowRejection`].
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not open {}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Line bookkeeping for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Non-empty lines after the header.
    pub rows_read: u64,
    pub rows_aggregated: u64,
    pub rows_skipped: u64,
}

impl ScanStats {
    pub fn merge(&mut self, other: ScanStats) {
        self.rows_read += other.rows_read;
        self.rows_aggregated += other.rows_aggregated;
        self.rows_skipped += other.rows_skipped;
    }
}

/// Everything a finished scan produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub config: AnalysisConfig,
    pub results: Accumulators,
    pub stats: ScanStats,
}

impl AnalysisOutcome {
    pub fn report(&self) -> Report<'_> {
        Report::new(&self.config, &self.results)
    }
}

/// Feeds raw lines through parse → build → aggregate, one at a time.
///
/// Only one line, one field buffer and the accumulators are alive at once.
#[derive(Debug)]
pub struct LineScanner {
    aggregator: SalesAggregator,
    fields: Vec<String>,
    stats: ScanStats,
    header_pending: bool,
}

impl LineScanner {
    /// Scanner for a whole export: the first line is taken as the header
    /// and ignored.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            aggregator: SalesAggregator::new(config),
            fields: Vec::with_capacity(64),
            stats: ScanStats::default(),
            header_pending: true,
        }
    }

    /// Scanner for a slice of an export that starts after the header.
    pub fn without_header(config: AnalysisConfig) -> Self {
        Self {
            header_pending: false,
            ..Self::new(config)
        }
    }

    pub fn feed(&mut self, line: &str) {
        if self.header_pending {
            self.header_pending = false;
            return;
        }
        if line.is_empty() {
            return;
        }
        self.stats.rows_read += 1;

        line::parse_line_into(line, &mut self.fields);
        match SalesRecord::from_fields(&self.fields) {
            Ok(record) => {
                self.aggregator.observe(&record);
                self.stats.rows_aggregated += 1;
            }
            Err(reason) => {
                tracing::trace!(row = self.stats.rows_read, %reason, "skipping row");
                self.stats.rows_skipped += 1;
            }
        }
    }

    /// Fold a scanner that covered a later slice of the same export.
    pub fn merge(&mut self, other: LineScanner) {
        self.stats.merge(other.stats);
        self.aggregator.merge(other.aggregator);
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn finish(self) -> AnalysisOutcome {
        let config = self.aggregator.config().clone();
        AnalysisOutcome {
            config,
            results: self.aggregator.finish(),
            stats: self.stats,
        }
    }
}

/// Stream an export (header line first) through the pipeline.
pub async fn analyze_stream<R>(reader: R, config: AnalysisConfig) -> AnalysisResult<AnalysisOutcome>
where
    R: AsyncRead + Unpin,
{
    let mut lines = raw_lines(reader);
    let mut scanner = LineScanner::new(config);

    while let Some(line) = lines.next().await {
        let line = line?;
        scanner.feed(&String::from_utf8_lossy(&line));
    }

    let stats = scanner.stats();
    tracing::debug!(
        rows = stats.rows_read,
        aggregated = stats.rows_aggregated,
        skipped = stats.rows_skipped,
        "scan complete"
    );
    Ok(scanner.finish())
}

/// Open `path` (compression picked by extension) and analyze it.
pub async fn analyze_path(path: &Path, config: AnalysisConfig) -> AnalysisResult<AnalysisOutcome> {
    let meta = SourceMeta::from_path(path);
    tracing::debug!(source = %meta.name_hint, compression = ?meta.compression, "opening export");
    let reader = open_source(path, &meta).await?;
    analyze_stream(reader, config).await
}
