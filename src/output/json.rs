use crate::Result;

use super::CommitReport;

/// Machine-readable report output, one JSON document for the whole run.
pub struct JsonFormatter;

impl JsonFormatter {
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn format(reports: &[CommitReport]) -> Result<String> {
        Ok(serde_json::to_string_pretty(reports)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
