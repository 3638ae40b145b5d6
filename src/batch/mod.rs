//! Batch driver: reads `id<TAB>question` lines, runs the pipeline per
//! question and appends tagged result lines.
//!
//! A malformed line is logged and skipped; it never aborts the batch.

mod error;
pub mod record;

#[cfg(test)]
mod tests;

use std::path::Path;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

pub use error::BatchError;
pub use record::{InconclusivePolicy, QuestionRecord, format_outcome};

use crate::pipeline::Pipeline;

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Questions run through the pipeline and written.
    pub processed: usize,
    /// Malformed lines skipped.
    pub skipped: usize,
    /// Processed questions whose verdict was inconclusive.
    pub inconclusive: usize,
}

/// Processes every record in `input`, appending results to `output`.
///
/// Output is flushed after each question so a crash keeps completed records.
pub async fn run_batch(
    pipeline: &Pipeline,
    input: &Path,
    output: &Path,
    policy: InconclusivePolicy,
) -> Result<BatchSummary, BatchError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| BatchError::Io { path, source }
    };

    let contents = fs::read_to_string(input).await.map_err(io_err(input))?;
    let mut sink = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .await
        .map_err(io_err(output))?;

    let mut summary = BatchSummary::default();

    for (index, raw) in contents.lines().enumerate() {
        let record = match QuestionRecord::parse(index + 1, raw) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                error!(error = %e, "Skipping input record");
                summary.skipped += 1;
                continue;
            }
        };

        info!(id = %record.id, line = record.line, "Processing question");
        let outcome = pipeline.run(&record.question).await;
        if outcome.verdict.is_inconclusive() {
            summary.inconclusive += 1;
        }

        let lines = format_outcome(&record.id, &outcome, policy);
        sink.write_all(lines.as_bytes())
            .await
            .map_err(io_err(output))?;
        sink.flush().await.map_err(io_err(output))?;

        info!(
            id = %record.id,
            verdict = %outcome.verdict,
            answer = %outcome.extracted.display_text(),
            "Question processed"
        );
        summary.processed += 1;
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        inconclusive = summary.inconclusive,
        "Batch finished"
    );

    Ok(summary)
}
