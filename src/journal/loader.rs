use crate::error::InputError;
use crate::journal::models::{AuditEntry, WorkItemContext};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Journal entries read from an export, with the work package record when the
/// export carried one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActivityExport {
    pub context: Option<WorkItemContext>,
    pub entries: Vec<AuditEntry>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default, alias = "workPackage")]
    work_package: Option<WorkItemContext>,
    #[serde(alias = "elements")]
    activities: Vec<AuditEntry>,
}

/// Parses an activity export.
///
/// Accepts either a bare array of entries or an object of the form
/// `{ "work_package": {...}, "activities": [...] }`. The shape is picked from
/// the first character so parse errors keep their line and column.
pub fn parse_export(json: &str) -> Result<ActivityExport, InputError> {
    let export = if json.trim_start().starts_with('[') {
        ActivityExport {
            context: None,
            entries: serde_json::from_str(json)?,
        }
    } else {
        let envelope: Envelope = serde_json::from_str(json)?;
        ActivityExport {
            context: envelope.work_package,
            entries: envelope.activities,
        }
    };
    debug!(
        entries = export.entries.len(),
        has_context = export.context.is_some(),
        "parsed activity export"
    );
    Ok(export)
}

pub fn load_export<P: AsRef<Path>>(path: P) -> Result<ActivityExport, InputError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&content)
}
