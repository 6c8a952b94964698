pub mod affected;
pub mod diff;
pub mod source;

pub use affected::{AffectedFilter, affected_entries, affected_paths};
pub use diff::{DiffEntry, DiffStatus, FileMode};
pub use source::{ChangeSource, GixChangeSource};
