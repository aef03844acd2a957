pub mod loader;
pub mod matcher;
pub mod models;
pub mod timestamp;

pub use matcher::StatusFieldMatcher;
pub use models::{AuditEntry, FieldChange, WorkItemContext};
