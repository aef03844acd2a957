use crate::timeline::duration::FormatOptions;
use crate::timeline::models::{Span, StatusInterval};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Accumulated time spent in one status across all of its intervals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTotal {
    pub status: String,
    pub total: Span,
    pub percentage: f64,
    pub occurrences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSummary {
    pub started_at: DateTime<Utc>,
    /// Creation to "now"; `None` if "now" precedes creation.
    pub total: Option<Span>,
    pub current_status: String,
    /// Share of the total lifetime per interval, same order as the input.
    pub shares: Vec<f64>,
    /// One row per status, in order of first appearance.
    pub status_totals: Vec<StatusTotal>,
}

/// Summarizes a reconstructed timeline. `None` for an empty timeline.
pub fn summarize(
    intervals: &[StatusInterval],
    now: DateTime<Utc>,
    options: &FormatOptions,
) -> Option<TimelineSummary> {
    let first = intervals.first()?;
    let last = intervals.last()?;

    let total = Span::between(first.entered_at, now, options);
    let total_ms = total.as_ref().map_or(0, |span| span.millis);

    let shares = intervals
        .iter()
        .map(|interval| percentage(dwell_millis(interval), total_ms))
        .collect();

    let mut accumulated: Vec<(String, i64, usize)> = Vec::new();
    for interval in intervals {
        let millis = dwell_millis(interval);
        match accumulated
            .iter_mut()
            .find(|(status, _, _)| *status == interval.status)
        {
            Some((_, sum, occurrences)) => {
                *sum += millis;
                *occurrences += 1;
            }
            None => accumulated.push((interval.status.clone(), millis, 1)),
        }
    }

    let status_totals = accumulated
        .into_iter()
        .filter_map(|(status, millis, occurrences)| {
            Some(StatusTotal {
                status,
                total: Span::from_millis(millis, options)?,
                percentage: percentage(millis, total_ms),
                occurrences,
            })
        })
        .collect();

    Some(TimelineSummary {
        started_at: first.entered_at,
        total,
        current_status: last.status.clone(),
        shares,
        status_totals,
    })
}

// Undefined dwell (clock skew) contributes nothing.
fn dwell_millis(interval: &StatusInterval) -> i64 {
    interval.dwell.as_ref().map_or(0, |span| span.millis)
}

/// `part` as a percentage of `whole`, rounded to one decimal.
fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{AuditEntry, FieldChange, WorkItemContext};
    use crate::timeline::reconstruct::reconstruct_timeline;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    fn change(id: i64, hour: u32, old: &str, new: &str) -> AuditEntry {
        AuditEntry::new(id)
            .at(&t(hour).to_rfc3339())
            .by("Ann")
            .with_change(FieldChange::new("status", Some(old), Some(new)))
    }

    #[test]
    fn test_summarize_empty_timeline() {
        assert!(summarize(&[], t(10), &FormatOptions::default()).is_none());
    }

    #[test]
    fn test_summarize_totals_and_shares() {
        // New 0-2, Active 2-3, New 3-4, Active 4-10 (ongoing)
        let context = WorkItemContext::new(t(0), "Creator", "Active");
        let entries = [
            change(1, 2, "New", "Active"),
            change(2, 3, "Active", "New"),
            change(3, 4, "New", "Active"),
        ];
        let intervals = reconstruct_timeline(&context, &entries, t(10));
        let summary = summarize(&intervals, t(10), &FormatOptions::default()).unwrap();

        assert_eq!(summary.started_at, t(0));
        assert_eq!(summary.current_status, "Active");
        assert_eq!(summary.total.as_ref().map(|s| s.text.as_str()), Some("10h"));
        assert_eq!(summary.shares, vec![20.0, 10.0, 10.0, 60.0]);

        assert_eq!(summary.status_totals.len(), 2);
        let new = &summary.status_totals[0];
        assert_eq!(new.status, "New");
        assert_eq!(new.total.millis, 3 * 3_600_000);
        assert_eq!(new.percentage, 30.0);
        assert_eq!(new.occurrences, 2);

        let active = &summary.status_totals[1];
        assert_eq!(active.status, "Active");
        assert_eq!(active.total.text, "7h");
        assert_eq!(active.percentage, 70.0);
        assert_eq!(active.occurrences, 2);
    }

    #[test]
    fn test_percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(5, 0), 0.0);
    }

    #[test]
    fn test_summarize_when_now_precedes_creation() {
        let context = WorkItemContext::new(t(9), "Creator", "New");
        let intervals = reconstruct_timeline(&context, &[], t(8));
        let summary = summarize(&intervals, t(8), &FormatOptions::default()).unwrap();

        assert_eq!(summary.total, None);
        assert_eq!(summary.shares, vec![0.0]);
        assert_eq!(summary.status_totals[0].total.millis, 0);
    }
}
