pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};

use serde::Serialize;

use crate::checks::CheckFailure;

/// Output format for check reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Outcome of one named check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub name: String,
    /// `None` is a pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CheckFailure>,
}

/// Outcomes of every check run against one commit.
#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    pub commit: String,
    pub checks: Vec<CheckReport>,
}

impl CommitReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.failure.is_none())
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|check| check.failure.is_some())
            .count()
    }
}
