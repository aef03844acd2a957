use crate::timeline::duration::{FormatOptions, format_duration, millis_to_hours};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A non-negative span of time together with its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub millis: i64,
    pub text: String,
}

impl Span {
    /// `None` when `ms` is negative.
    pub fn from_millis(ms: i64, options: &FormatOptions) -> Option<Self> {
        (ms >= 0).then(|| Self {
            millis: ms,
            text: format_duration(ms, options),
        })
    }

    /// Elapsed time from `start` to `end`; `None` if `end` precedes `start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>, options: &FormatOptions) -> Option<Self> {
        Self::from_millis((end - start).num_milliseconds(), options)
    }

    pub fn hours(&self) -> f64 {
        millis_to_hours(self.millis)
    }
}

/// A contiguous stretch of time during which the work item held one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInterval {
    pub status: String,
    pub entered_at: DateTime<Utc>,
    /// `None` while the item is still in this status.
    pub exited_at: Option<DateTime<Utc>>,
    pub actor: String,
    pub previous_status: Option<String>,
    /// Journal entry that produced the transition; `None` for the creation interval.
    pub source_entry_id: Option<i64>,
    pub transition: Option<Span>,
    pub dwell: Option<Span>,
    pub is_current: bool,
}

impl StatusInterval {
    pub fn is_initial(&self) -> bool {
        self.source_entry_id.is_none()
    }
}

/// A disagreement between the journal and itself or the work package record.
///
/// These never change the reconstructed intervals; they are surfaced so
/// callers can flag questionable history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    /// The entry's recorded old value is not the status the timeline was in.
    PreviousStatusMismatch {
        entry_id: i64,
        recorded: String,
        expected: String,
    },
    /// The last interval disagrees with the work package's current status.
    CurrentStatusMismatch { computed: String, reported: String },
    /// A transition had no usable timestamp and was placed at "now".
    UntimedEntry { entry_id: i64, raw: Option<String> },
    /// Several status changes on one entry; only the first was used.
    RepeatedStatusField { entry_id: i64, count: usize },
    /// A negative dwell or transition span was suppressed.
    ClockSkew { entry_id: Option<i64> },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::PreviousStatusMismatch {
                entry_id,
                recorded,
                expected,
            } => write!(
                f,
                "entry #{} records old status '{}' but timeline was in '{}'",
                entry_id, recorded, expected
            ),
            Inconsistency::CurrentStatusMismatch { computed, reported } => write!(
                f,
                "journal ends in '{}' but work package reports '{}'",
                computed, reported
            ),
            Inconsistency::UntimedEntry { entry_id, raw } => match raw {
                Some(raw) => write!(
                    f,
                    "entry #{} has unparseable timestamp '{}'; placed at now",
                    entry_id, raw
                ),
                None => write!(f, "entry #{} has no timestamp; placed at now", entry_id),
            },
            Inconsistency::RepeatedStatusField { entry_id, count } => write!(
                f,
                "entry #{} carries {} status changes; using the first",
                entry_id, count
            ),
            Inconsistency::ClockSkew { entry_id } => match entry_id {
                Some(id) => write!(f, "entry #{} is earlier than the interval before it", id),
                None => write!(f, "creation interval ends before it starts"),
            },
        }
    }
}

/// Intervals plus whatever looked wrong while building them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Reconstruction {
    pub intervals: Vec<StatusInterval>,
    pub inconsistencies: Vec<Inconsistency>,
}
