use crate::journal::matcher::StatusFieldMatcher;
use crate::journal::timestamp::{self, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One field change recorded on a journal entry.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct FieldChange {
    #[serde(default, alias = "field", alias = "name")]
    pub property: String,
    #[serde(default, alias = "from", deserialize_with = "field_value")]
    pub old_value: Option<String>,
    #[serde(default, alias = "to", deserialize_with = "field_value")]
    pub new_value: Option<String>,
}

impl FieldChange {
    pub fn new(property: &str, old_value: Option<&str>, new_value: Option<&str>) -> Self {
        Self {
            property: property.to_string(),
            old_value: old_value.map(str::to_string),
            new_value: new_value.map(str::to_string),
        }
    }

    /// Previous value, trimmed; blank values count as absent.
    pub fn old_value(&self) -> Option<&str> {
        non_blank(self.old_value.as_deref())
    }

    /// New value, trimmed; blank values count as absent.
    pub fn new_value(&self) -> Option<&str> {
        non_blank(self.new_value.as_deref())
    }
}

/// A journal ("activity") entry of a work package.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct AuditEntry {
    pub id: i64,
    /// Raw timestamp as delivered by the tracker; may be missing or malformed.
    #[serde(
        default,
        alias = "createdAt",
        alias = "created_on",
        alias = "createdOn",
        deserialize_with = "timestamp::raw"
    )]
    pub created_at: Option<String>,
    #[serde(
        default,
        alias = "user_name",
        alias = "user",
        deserialize_with = "field_value"
    )]
    pub actor: Option<String>,
    #[serde(default, alias = "details", deserialize_with = "nullable_list")]
    pub changes: Vec<FieldChange>,
    #[serde(default, deserialize_with = "note_text")]
    pub notes: Option<String>,
}

impl AuditEntry {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn at(mut self, created_at: &str) -> Self {
        self.created_at = Some(created_at.to_string());
        self
    }

    pub fn by(mut self, actor: &str) -> Self {
        self.actor = Some(actor.to_string());
        self
    }

    pub fn with_change(mut self, change: FieldChange) -> Self {
        self.changes.push(change);
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Parsed `created_at`, if present and well-formed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    pub fn actor(&self) -> Option<&str> {
        non_blank(self.actor.as_deref())
    }

    pub fn status_changes<'a>(
        &'a self,
        matcher: &'a StatusFieldMatcher,
    ) -> impl Iterator<Item = &'a FieldChange> + 'a {
        self.changes
            .iter()
            .filter(move |change| matcher.matches(&change.property))
    }
}

/// What the work package record itself says about the item.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct WorkItemContext {
    #[serde(
        default,
        alias = "createdAt",
        deserialize_with = "timestamp::lenient"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        alias = "author",
        alias = "authorName",
        deserialize_with = "display_name"
    )]
    pub author_name: String,
    #[serde(
        default,
        alias = "status",
        alias = "currentStatus",
        deserialize_with = "display_name"
    )]
    pub current_status: String,
}

impl WorkItemContext {
    pub fn new(created_at: DateTime<Utc>, author_name: &str, current_status: &str) -> Self {
        Self {
            created_at: Some(created_at),
            author_name: author_name.to_string(),
            current_status: current_status.to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Trackers send values as plain strings, numbers, or link objects with a name.
fn pick_name(value: Value) -> Option<String> {
    let name = match value {
        Value::Null => return None,
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => {
            let name = map.get("name").or_else(|| map.get("title"))?;
            return name.as_str().and_then(|s| pick_name(Value::String(s.to_string())));
        }
        Value::Array(_) => return None,
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn field_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(pick_name))
}

fn display_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(field_value(deserializer)?.unwrap_or_default())
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<FieldChange>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FieldChange>>::deserialize(deserializer)?.unwrap_or_default())
}

// Notes arrive either as text or as OpenProject's { raw, html } pair.
fn note_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let text = match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Object(map)) => map
            .get("raw")
            .or_else(|| map.get("html"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    };
    Ok(text.filter(|t| !t.trim().is_empty()))
}
