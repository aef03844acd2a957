pub mod config;
pub mod summary;
pub mod timeline;

use crate::config::Config;
use crate::error::InputError;
use crate::journal::loader::load_export;
use crate::journal::timestamp::parse_timestamp;
use crate::journal::{AuditEntry, WorkItemContext};
use crate::timeline::{MinimumUnit, TimelineOptions};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use std::path::PathBuf;

/// Where the journal comes from and how to read it.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(help = "Activity export: a JSON array of entries or {work_package, activities}")]
    pub file: PathBuf,
    #[arg(long, help = "Evaluate as of this instant (RFC 3339, default: current time)")]
    pub now: Option<String>,
    #[arg(long, help = "Work package creation time (overrides the export)")]
    pub created_at: Option<String>,
    #[arg(long, help = "Work package author (overrides the export)")]
    pub author: Option<String>,
    #[arg(long, help = "Current work package status (overrides the export)")]
    pub status: Option<String>,
    #[arg(long, help = "Show seconds in durations")]
    pub seconds: bool,
}

/// Everything the engine needs for one invocation.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub context: WorkItemContext,
    pub entries: Vec<AuditEntry>,
    pub now: DateTime<Utc>,
    pub options: TimelineOptions,
}

pub fn prepare(config: &Config, args: &InputArgs) -> Result<Prepared> {
    let export = load_export(&args.file)?;

    // Without a work package record both the creation time and the current
    // status have to come from flags.
    let mut context = match export.context {
        Some(context) => context,
        None if args.created_at.is_some() && args.status.is_some() => WorkItemContext::default(),
        None => return Err(InputError::MissingContext.into()),
    };
    if let Some(raw) = &args.created_at {
        context.created_at = Some(parse_flag_timestamp(raw)?);
    }
    if let Some(author) = &args.author {
        context.author_name = author.clone();
    }
    if let Some(status) = &args.status {
        context.current_status = status.clone();
    }

    let now = match &args.now {
        Some(raw) => parse_flag_timestamp(raw)?,
        None => Utc::now(),
    };

    let mut options = config.timeline.to_options();
    if args.seconds {
        options.minimum_unit = MinimumUnit::Second;
    }

    Ok(Prepared {
        context,
        entries: export.entries,
        now,
        options,
    })
}

fn parse_flag_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw)
        .ok_or_else(|| InputError::InvalidTimestamp(raw.to_string()))
        .context("Invalid command line timestamp")
}

/// Shortens `text` to `max` characters, marking the cut with "...".
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
