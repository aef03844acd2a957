//! Rebuilds the status history of a work item from its journal.
//!
//! The journal is the authoritative record: entries are put in chronological
//! order, the creation status is recovered from the first recorded change,
//! and every status change opens a new interval that closes the previous
//! one. "Now" is always supplied by the caller.

use crate::journal::{AuditEntry, FieldChange, StatusFieldMatcher, WorkItemContext};
use crate::timeline::duration::{FormatOptions, MinimumUnit};
use crate::timeline::models::{Inconsistency, Reconstruction, Span, StatusInterval};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub const DEFAULT_ONGOING_SUFFIX: &str = "(ongoing)";
pub const DEFAULT_UNKNOWN_ACTOR: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineOptions {
    pub status_fields: StatusFieldMatcher,
    pub minimum_unit: MinimumUnit,
    /// Appended to the dwell text of the open interval.
    pub ongoing_suffix: Option<String>,
    /// Actor shown when an entry does not name one.
    pub unknown_actor: String,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            status_fields: StatusFieldMatcher::default(),
            minimum_unit: MinimumUnit::Minute,
            ongoing_suffix: Some(DEFAULT_ONGOING_SUFFIX.to_string()),
            unknown_actor: DEFAULT_UNKNOWN_ACTOR.to_string(),
        }
    }
}

impl TimelineOptions {
    pub fn closed_format(&self) -> FormatOptions {
        FormatOptions::new(self.minimum_unit)
    }

    pub fn ongoing_format(&self) -> FormatOptions {
        self.closed_format().with_suffix(self.ongoing_suffix.as_deref())
    }
}

/// Reconstructs timelines with the default options.
pub fn reconstruct_timeline(
    context: &WorkItemContext,
    entries: &[AuditEntry],
    now: DateTime<Utc>,
) -> Vec<StatusInterval> {
    Reconstructor::default().reconstruct(context, entries, now)
}

#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    options: TimelineOptions,
}

// Entries with a usable timestamp come first, in time order; the rest follow
// in id order. Ties break on id so input order never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Timed(DateTime<Utc>, i64),
    Untimed(i64),
}

struct Ordered<'a> {
    entry: &'a AuditEntry,
    at: Option<DateTime<Utc>>,
}

impl Ordered<'_> {
    fn sort_key(&self) -> SortKey {
        match self.at {
            Some(at) => SortKey::Timed(at, self.entry.id),
            None => SortKey::Untimed(self.entry.id),
        }
    }
}

struct Point {
    status: String,
    entered_at: DateTime<Utc>,
    actor: String,
    source_entry_id: Option<i64>,
}

impl Reconstructor {
    pub fn new(options: TimelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    pub fn reconstruct(
        &self,
        context: &WorkItemContext,
        entries: &[AuditEntry],
        now: DateTime<Utc>,
    ) -> Vec<StatusInterval> {
        self.reconstruct_with_report(context, entries, now).intervals
    }

    /// Like [`Reconstructor::reconstruct`], also returning the anomalies seen.
    ///
    /// Returns an empty reconstruction when the work item has no creation time.
    pub fn reconstruct_with_report(
        &self,
        context: &WorkItemContext,
        entries: &[AuditEntry],
        now: DateTime<Utc>,
    ) -> Reconstruction {
        let Some(created_at) = context.created_at else {
            debug!("work item has no creation time, nothing to reconstruct");
            return Reconstruction::default();
        };

        let ordered = chronological(entries);
        let mut inconsistencies = Vec::new();

        let mut points = vec![Point {
            status: self.initial_status(context, &ordered),
            entered_at: created_at,
            actor: self.actor_or_unknown(Some(context.author_name.as_str())),
            source_entry_id: None,
        }];

        for item in &ordered {
            let entry = item.entry;
            let changes: Vec<&FieldChange> =
                entry.status_changes(&self.options.status_fields).collect();
            if changes.len() > 1 {
                inconsistencies.push(Inconsistency::RepeatedStatusField {
                    entry_id: entry.id,
                    count: changes.len(),
                });
            }

            let Some(new_status) = primary_change(&changes).and_then(FieldChange::new_value)
            else {
                continue;
            };

            let previous = &points[points.len() - 1].status;
            if let Some(recorded) = primary_change(&changes).and_then(FieldChange::old_value) {
                if recorded != previous.as_str() {
                    inconsistencies.push(Inconsistency::PreviousStatusMismatch {
                        entry_id: entry.id,
                        recorded: recorded.to_string(),
                        expected: previous.clone(),
                    });
                }
            }

            let entered_at = item.at.unwrap_or_else(|| {
                inconsistencies.push(Inconsistency::UntimedEntry {
                    entry_id: entry.id,
                    raw: entry.created_at.clone(),
                });
                now
            });

            points.push(Point {
                status: new_status.to_string(),
                entered_at,
                actor: self.actor_or_unknown(entry.actor()),
                source_entry_id: Some(entry.id),
            });
        }

        let intervals = self.close_intervals(&points, now, &mut inconsistencies);

        if let Some(last) = intervals.last() {
            let reported = context.current_status.trim();
            if !reported.is_empty() && reported != last.status {
                inconsistencies.push(Inconsistency::CurrentStatusMismatch {
                    computed: last.status.clone(),
                    reported: reported.to_string(),
                });
            }
        }

        for inconsistency in &inconsistencies {
            warn!(%inconsistency, "journal inconsistency");
        }
        debug!(
            entries = entries.len(),
            intervals = intervals.len(),
            "reconstructed status timeline"
        );

        Reconstruction {
            intervals,
            inconsistencies,
        }
    }

    /// The old value of the first recorded status change, or the current
    /// status when the journal never recorded one.
    fn initial_status(&self, context: &WorkItemContext, ordered: &[Ordered<'_>]) -> String {
        let first_recorded = ordered.iter().find_map(|item| {
            let changes: Vec<&FieldChange> = item
                .entry
                .status_changes(&self.options.status_fields)
                .collect();
            primary_change(&changes).map(|change| change.old_value())
        });

        match first_recorded {
            Some(Some(old_value)) => old_value.to_string(),
            _ => context.current_status.trim().to_string(),
        }
    }

    fn close_intervals(
        &self,
        points: &[Point],
        now: DateTime<Utc>,
        inconsistencies: &mut Vec<Inconsistency>,
    ) -> Vec<StatusInterval> {
        let closed = self.options.closed_format();
        let ongoing = self.options.ongoing_format();
        let last = points.len().saturating_sub(1);

        points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let is_current = index == last;
                let exited_at = points.get(index + 1).map(|next| next.entered_at);
                let dwell = if is_current {
                    Span::between(point.entered_at, now, &ongoing)
                } else {
                    Span::between(point.entered_at, exited_at.unwrap_or(now), &closed)
                };

                let previous = index.checked_sub(1).map(|i| &points[i]);
                let transition = previous
                    .and_then(|prev| Span::between(prev.entered_at, point.entered_at, &closed));

                if dwell.is_none() || (previous.is_some() && transition.is_none()) {
                    inconsistencies.push(Inconsistency::ClockSkew {
                        entry_id: point.source_entry_id,
                    });
                }

                StatusInterval {
                    status: point.status.clone(),
                    entered_at: point.entered_at,
                    exited_at,
                    actor: point.actor.clone(),
                    previous_status: previous.map(|prev| prev.status.clone()),
                    source_entry_id: point.source_entry_id,
                    transition,
                    dwell,
                    is_current,
                }
            })
            .collect()
    }

    fn actor_or_unknown(&self, actor: Option<&str>) -> String {
        actor
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.options.unknown_actor)
            .to_string()
    }
}

fn chronological(entries: &[AuditEntry]) -> Vec<Ordered<'_>> {
    let mut ordered: Vec<Ordered<'_>> = entries
        .iter()
        .map(|entry| Ordered {
            entry,
            at: entry.timestamp(),
        })
        .collect();
    ordered.sort_by_key(Ordered::sort_key);
    ordered
}

/// The change that drives the transition: the first status change with a new
/// value, falling back to the first status change at all.
fn primary_change<'a>(changes: &[&'a FieldChange]) -> Option<&'a FieldChange> {
    changes
        .iter()
        .find(|change| change.new_value().is_some())
        .or_else(|| changes.first())
        .copied()
}
