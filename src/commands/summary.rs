use crate::OutputFormat;
use crate::commands::{InputArgs, prepare, truncate};
use crate::config::Config;
use crate::timeline::{Reconstructor, TimelineSummary, UNKNOWN_DURATION, summarize};
use anyhow::{Context, Result};

/// Print time spent per status
pub fn run(config: &Config, args: &InputArgs, format: OutputFormat) -> Result<()> {
    let prepared = prepare(config, args)?;
    let reconstructor = Reconstructor::new(prepared.options);
    let intervals = reconstructor.reconstruct(&prepared.context, &prepared.entries, prepared.now);
    let summary = summarize(
        &intervals,
        prepared.now,
        &reconstructor.options().closed_format(),
    );

    match format {
        OutputFormat::Text => match &summary {
            Some(summary) => print!("{}", render_text(summary)),
            None => println!("No timeline: work package has no creation time."),
        },
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{}", json);
        }
    }

    Ok(())
}

pub fn render_text(summary: &TimelineSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:<16} {:>8} {:>7} {:>6}\n",
        "Status", "Total", "Hours", "Share", "Count"
    ));
    out.push_str(&format!("{}\n", "-".repeat(65)));

    for row in &summary.status_totals {
        out.push_str(&format!(
            "{:<24} {:<16} {:>8.2} {:>6.1}% {:>6}\n",
            truncate(&row.status, 24),
            row.total.text,
            row.total.hours(),
            row.percentage,
            row.occurrences
        ));
    }

    let total = summary
        .total
        .as_ref()
        .map_or(UNKNOWN_DURATION, |span| span.text.as_str());
    out.push_str(&format!(
        "\nTotal: {} since {} (current: {})\n",
        total,
        summary.started_at.format("%Y-%m-%d %H:%M"),
        summary.current_status
    ));
    out
}
