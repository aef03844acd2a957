use crate::OutputFormat;
use crate::commands::{InputArgs, prepare, truncate};
use crate::config::Config;
use crate::timeline::{Reconstruction, Reconstructor, UNKNOWN_DURATION};
use anyhow::{Context, Result};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Reconstruct and print the status timeline of one work package
pub fn run(config: &Config, args: &InputArgs, format: OutputFormat) -> Result<()> {
    let prepared = prepare(config, args)?;
    let reconstruction = Reconstructor::new(prepared.options).reconstruct_with_report(
        &prepared.context,
        &prepared.entries,
        prepared.now,
    );

    match format {
        OutputFormat::Text => print!("{}", render_text(&reconstruction)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reconstruction)
                .context("Failed to serialize timeline")?;
            println!("{}", json);
        }
    }

    Ok(())
}

pub fn render_text(reconstruction: &Reconstruction) -> String {
    if reconstruction.intervals.is_empty() {
        return "No timeline: work package has no creation time.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<4} {:<24} {:<17} {:<17} {:<20} {:<12} {}\n",
        "#", "Status", "Entered", "Exited", "Dwell", "Since prev", "By"
    ));
    out.push_str(&format!("{}\n", "-".repeat(110)));

    for (index, interval) in reconstruction.intervals.iter().enumerate() {
        let exited = interval
            .exited_at
            .map(|at| at.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        let dwell = interval
            .dwell
            .as_ref()
            .map_or(UNKNOWN_DURATION, |span| span.text.as_str());
        let since_previous = match &interval.transition {
            _ if interval.is_initial() => "-",
            Some(span) => span.text.as_str(),
            None => UNKNOWN_DURATION,
        };
        let marker = if interval.is_current { "*" } else { "" };

        out.push_str(&format!(
            "{:<4} {:<24} {:<17} {:<17} {:<20} {:<12} {}\n",
            format!("{}{}", index + 1, marker),
            truncate(&interval.status, 24),
            interval.entered_at.format(DATE_FORMAT),
            exited,
            dwell,
            since_previous,
            interval.actor
        ));
    }

    if !reconstruction.inconsistencies.is_empty() {
        out.push_str("\nWarnings:\n");
        for inconsistency in &reconstruction.inconsistencies {
            out.push_str(&format!("  ! {}\n", inconsistency));
        }
    }

    out
}
