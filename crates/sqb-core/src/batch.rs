//! Batch splitting for delimiter-separated migration files.
//!
//! The split is a literal, case-sensitive `str::split` on the delimiter
//! token with no SQL awareness: a token appearing inside a string literal
//! or comment will mis-split the file. This mirrors the behavior of the
//! migration files this tool was written against and is kept deliberately
//! for compatibility — do not "fix" it.

/// A single executable unit of SQL text from a migration file.
///
/// Ordering is significant: batches carry their 1-based position in the
/// source file and must execute in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position within the migration file
    pub index: usize,

    /// Trimmed SQL text of the batch
    pub sql: String,
}

/// Split migration file text into executable batches.
///
/// Splits on the literal delimiter token, trims whitespace from each
/// segment, and drops segments that are empty after trimming. Input with
/// no delimiter yields a single batch (or none, if the trimmed input is
/// empty).
pub fn split_batches(text: &str, delimiter: &str) -> Vec<Batch> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(i, segment)| Batch {
            index: i + 1,
            sql: segment.to_string(),
        })
        .collect()
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
