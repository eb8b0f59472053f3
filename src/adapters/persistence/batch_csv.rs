//! Batch files. Reads comments (with optional per-row tone) and writes reply results,
//! using the `csv` crate for safe quoting.
//!
//! Input format: header `comment[,tone]`; a blank or `auto` tone cell means "pick automatically".
//! Output format: `comment,sentiment,tone,success,reply,error`.

use crate::domain::{DomainError, ReplyResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Tone cell value meaning "no override", same as the chat picker's `Auto`.
const AUTO_TONE: &str = "auto";

/// Comments to process plus tone overrides keyed by comment index.
#[derive(Debug, Default, PartialEq)]
pub struct BatchInput {
    pub comments: Vec<String>,
    pub overrides: HashMap<usize, String>,
}

#[derive(Deserialize)]
struct InputRow {
    comment: String,
    #[serde(default)]
    tone: Option<String>,
}

#[derive(Serialize)]
struct OutputRow<'a> {
    comment: &'a str,
    sentiment: Option<&'static str>,
    tone: Option<&'static str>,
    success: bool,
    reply: Option<&'a str>,
    error: Option<&'a str>,
}

/// Read a batch input file.
///
/// # Errors
/// `DomainError::Batch` if the file cannot be read, a row is malformed, or a comment is blank.
pub fn read_comments(path: &Path) -> Result<BatchInput, DomainError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_path(path)
        .map_err(|e| DomainError::Batch(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut input = BatchInput::default();
    for (index, row) in rdr.deserialize::<InputRow>().enumerate() {
        // +2: 1-based, plus the header line.
        let line = index + 2;
        let row = row.map_err(|e| DomainError::Batch(format!("Row {}: {}", line, e)))?;
        if row.comment.is_empty() {
            return Err(DomainError::Batch(format!("Row {}: comment is empty", line)));
        }
        if let Some(tone) = row
            .tone
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case(AUTO_TONE))
        {
            input.overrides.insert(index, tone);
        }
        input.comments.push(row.comment);
    }

    info!(
        path = %path.display(),
        comments = input.comments.len(),
        overrides = input.overrides.len(),
        "batch input loaded"
    );
    Ok(input)
}

/// Write results next to their comments. `comments` and `results` are matched by index.
///
/// # Errors
/// `DomainError::Batch` if the slices differ in length or the file cannot be written.
pub fn write_results(
    path: &Path,
    comments: &[String],
    results: &[ReplyResult],
) -> Result<(), DomainError> {
    if comments.len() != results.len() {
        return Err(DomainError::Batch(format!(
            "{} comments but {} results",
            comments.len(),
            results.len()
        )));
    }

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| DomainError::Batch(format!("Failed to create {}: {}", path.display(), e)))?;

    for (comment, result) in comments.iter().zip(results) {
        wtr.serialize(OutputRow {
            comment,
            sentiment: result.sentiment_detected.map(|s| s.as_str()),
            tone: result.tone_used.map(|t| t.as_str()),
            success: result.success,
            reply: result.reply.as_deref(),
            error: result.error.as_deref(),
        })
        .map_err(|e| DomainError::Batch(format!("Failed to write row: {}", e)))?;
    }

    wtr.flush()
        .map_err(|e| DomainError::Batch(format!("Failed to flush {}: {}", path.display(), e)))?;

    info!(path = %path.display(), rows = results.len(), "batch results written");
    Ok(())
}
