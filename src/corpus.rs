//! Corpus records: `<deal>\t<result>` lines
//!
//! Reading is shared with the table builder. Writing pairs each deal with a
//! trick table from an external solver, which is only seen through
//! [`TricksSolver`].

use std::io::Write;

use thiserror::Error;

use super::deal::{encode_deal, Deal, DealKey};
use super::error::{RecordError, RecordFault};
use super::result::{encode_result, ResultRow, ResultValue};

/// Field separator between deal and result text
pub const SEPARATOR: char = '\t';

/// Convert one corpus line (without its newline) into a key/value pair.
///
/// `line_no` is 1-based and is carried into any error.
pub fn parse_record(line: &str, line_no: usize) -> Result<(DealKey, ResultValue), RecordError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    let [deal, result] = fields[..] else {
        return Err(RecordError::new(
            line_no,
            RecordFault::MissingSeparator {
                fields: fields.len(),
            },
        ));
    };

    let key = encode_deal(deal).map_err(|e| RecordError::new(line_no, e))?;
    let value = encode_result(result).map_err(|e| RecordError::new(line_no, e))?;
    Ok((key, value))
}

/// Convert one raw corpus line, rejecting bytes that are not UTF-8
pub fn parse_record_bytes(
    line: &[u8],
    line_no: usize,
) -> Result<(DealKey, ResultValue), RecordError> {
    let line = std::str::from_utf8(line).map_err(|e| {
        RecordError::new(
            line_no,
            RecordFault::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            },
        )
    })?;
    parse_record(line, line_no)
}

/// Format a deal and its trick table as one corpus line (no newline)
pub fn format_record(deal: &Deal, row: &ResultRow) -> String {
    format!("{}{}{}", deal.to_pbn(), SEPARATOR, row.to_text())
}

/// Computes the double-dummy trick table for a deal
pub trait TricksSolver {
    type Error;

    fn solve(&mut self, deal: &Deal) -> Result<ResultRow, Self::Error>;
}

impl<F, E> TricksSolver for F
where
    F: FnMut(&Deal) -> Result<ResultRow, E>,
{
    type Error = E;

    fn solve(&mut self, deal: &Deal) -> Result<ResultRow, E> {
        self(deal)
    }
}

#[derive(Debug, Error)]
pub enum CorpusError<E> {
    #[error("solver failed on deal {index}: {source}")]
    Solver {
        index: usize,
        #[source]
        source: E,
    },

    #[error("corpus I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Solve each deal and write one record per line. Returns the number written.
pub fn write_corpus<I, S, W>(
    deals: I,
    solver: &mut S,
    mut writer: W,
) -> Result<usize, CorpusError<S::Error>>
where
    I: IntoIterator<Item = Deal>,
    S: TricksSolver,
    S::Error: std::error::Error + 'static,
    W: Write,
{
    let mut written = 0;
    for (index, deal) in deals.into_iter().enumerate() {
        let row = solver
            .solve(&deal)
            .map_err(|source| CorpusError::Solver { index, source })?;
        writeln!(writer, "{}", format_record(&deal, &row))?;
        written += 1;
    }
    writer.flush()?;
    tracing::debug!(records = written, "corpus written");
    Ok(written)
}
