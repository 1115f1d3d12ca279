//! Streaming table construction from a `<deal>\t<result>` corpus
//!
//! Lines are converted as they are read and never kept once encoded. In
//! parallel mode lines are gathered into bounded chunks, each chunk is
//! encoded with rayon, and results are appended by line index so the table
//! is identical to a sequential build.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::corpus::parse_record_bytes;
use super::deal::DealKey;
use super::error::{RecordError, Result};
use super::result::ResultValue;
use super::table::LookupTable;

/// What to do with a malformed record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole build on the first bad line
    #[default]
    FailFast,
    /// Log and drop bad lines
    Skip,
}

/// Configuration for table builds
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub policy: FailurePolicy,
    /// Encode chunks of lines on the rayon pool
    pub parallel: bool,
    /// Lines per chunk in parallel mode
    pub chunk_size: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            policy: FailurePolicy::FailFast,
            parallel: false,
            chunk_size: 1 << 16,
        }
    }
}

impl BuildConfig {
    /// Parallel build with default chunking
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Counts from a finished build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Lines read from the corpus
    pub lines: usize,
    /// Records appended to the table
    pub records: usize,
    /// Lines dropped under `FailurePolicy::Skip`
    pub skipped: usize,
}

/// Builds a [`LookupTable`] from corpus text
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    config: BuildConfig,
}

impl TableBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build a table from a corpus reader
    pub fn build<R: BufRead>(&self, reader: R) -> Result<LookupTable> {
        Ok(self.build_with_report(reader)?.0)
    }

    /// Build a table and report line/record/skip counts
    pub fn build_with_report<R: BufRead>(&self, reader: R) -> Result<(LookupTable, BuildReport)> {
        self.build_with_progress(reader, |_| {})
    }

    /// Build a table from a corpus file
    pub fn build_file(&self, path: impl AsRef<Path>) -> Result<(LookupTable, BuildReport)> {
        let path = path.as_ref();
        info!(path = %path.display(), "reading corpus");
        let file = File::open(path)?;
        self.build_with_report(BufReader::new(file))
    }

    /// Build a table, calling `progress` with the number of lines consumed so far.
    ///
    /// Progress is reported per line in sequential mode and per chunk in
    /// parallel mode. It has no effect on the result.
    pub fn build_with_progress<R, P>(
        &self,
        reader: R,
        mut progress: P,
    ) -> Result<(LookupTable, BuildReport)>
    where
        R: BufRead,
        P: FnMut(usize),
    {
        let start = Instant::now();
        info!(
            parallel = self.config.parallel,
            policy = ?self.config.policy,
            "building lookup table"
        );

        let mut table = LookupTable::new();
        let mut report = BuildReport::default();

        if self.config.parallel {
            self.build_chunked(reader, &mut table, &mut report, &mut progress)?;
        } else {
            for (i, line) in reader.split(b'\n').enumerate() {
                let line = line?;
                report.lines = i + 1;
                let outcome = parse_record_bytes(&line, report.lines);
                self.accept(outcome, &mut table, &mut report)?;
                progress(report.lines);
            }
        }

        info!(
            lines = report.lines,
            records = report.records,
            skipped = report.skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lookup table built"
        );
        Ok((table, report))
    }

    fn build_chunked<R, P>(
        &self,
        reader: R,
        table: &mut LookupTable,
        report: &mut BuildReport,
        progress: &mut P,
    ) -> Result<()>
    where
        R: BufRead,
        P: FnMut(usize),
    {
        let chunk_size = self.config.chunk_size.max(1);
        let mut chunk: Vec<Vec<u8>> = Vec::with_capacity(chunk_size);
        let mut lines = reader.split(b'\n');

        loop {
            chunk.clear();
            // A read error is reported only after the lines before it
            let mut deferred = None;
            for line in lines.by_ref().take(chunk_size) {
                match line {
                    Ok(line) => chunk.push(line),
                    Err(err) => {
                        deferred = Some(err);
                        break;
                    }
                }
            }

            if !chunk.is_empty() {
                let first_line = report.lines + 1;
                let encoded: Vec<_> = chunk
                    .par_iter()
                    .enumerate()
                    .map(|(i, line)| parse_record_bytes(line, first_line + i))
                    .collect();
                report.lines += chunk.len();
                debug!(first_line, lines = chunk.len(), "chunk encoded");

                for outcome in encoded {
                    self.accept(outcome, table, report)?;
                }
                progress(report.lines);
            }

            if let Some(err) = deferred {
                return Err(err.into());
            }
            if chunk.len() < chunk_size {
                return Ok(());
            }
        }
    }

    /// Append an encoded record, or apply the failure policy to a bad one
    fn accept(
        &self,
        outcome: std::result::Result<(DealKey, ResultValue), RecordError>,
        table: &mut LookupTable,
        report: &mut BuildReport,
    ) -> Result<()> {
        match outcome {
            Ok((key, value)) => {
                table.push(key, value);
                report.records += 1;
                Ok(())
            }
            Err(err) => match self.config.policy {
                FailurePolicy::FailFast => Err(err.into()),
                FailurePolicy::Skip => {
                    warn!(line = err.line, error = %err.fault, "skipping malformed record");
                    report.skipped += 1;
                    Ok(())
                }
            },
        }
    }
}
