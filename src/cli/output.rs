//! Output formatting helpers for CLI commands

use crate::health::SchedulerPhase;
use crate::probe::Target;
use crate::status::StatusSnapshot;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for one target's status
#[derive(Debug, Clone, serde::Serialize)]
pub struct TargetView {
    pub key: String,
    pub probe_url: String,
    pub online: bool,
}

/// Pair configured targets with a snapshot, keeping configuration order.
pub fn target_views(targets: &[Target], snapshot: &StatusSnapshot) -> Vec<TargetView> {
    targets
        .iter()
        .map(|t| TargetView {
            key: t.key.clone(),
            probe_url: t.probe_url.clone(),
            online: snapshot.get(&t.key),
        })
        .collect()
}

fn status_label(online: bool) -> String {
    if online {
        "Online".green().to_string()
    } else {
        "Offline".red().to_string()
    }
}

/// "N/M online" summary line
pub fn format_summary(views: &[TargetView]) -> String {
    let online = views.iter().filter(|v| v.online).count();
    format!("{}/{} online", online, views.len())
}

/// Format statuses as a table followed by the summary line
pub fn format_status_table(views: &[TargetView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Target", "Probe URL", "Status"]);

    for v in views {
        table.add_row(vec![
            Cell::new(&v.key),
            Cell::new(&v.probe_url),
            Cell::new(status_label(v.online)),
        ]);
    }

    format!("{}\n{}", table, format_summary(views))
}

/// Format statuses as JSON
pub fn format_status_json(views: &[TargetView], snapshot: &StatusSnapshot) -> String {
    let value = json!({
        "online": views.iter().filter(|v| v.online).count(),
        "total": views.len(),
        "checked_at": snapshot.checked_at,
        "targets": views,
    });
    format!("{:#}", value)
}

/// One line per published snapshot, for streaming output
pub fn format_status_line(views: &[TargetView], snapshot: &StatusSnapshot) -> String {
    let time = snapshot
        .checked_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let marks: Vec<String> = views
        .iter()
        .map(|v| {
            let mark = if v.online { "✓".green() } else { "✗".red() };
            format!("{} {}", v.key, mark)
        })
        .collect();

    format!("[{}] {}  {}", time, format_summary(views), marks.join("  "))
}

/// Human description of the scheduler phase
pub fn format_phase(phase: &SchedulerPhase) -> String {
    match phase {
        SchedulerPhase::Idle => "idle (automatic polling off)".to_string(),
        SchedulerPhase::Checking { attempt } => format!("checking (attempt {})", attempt),
        SchedulerPhase::Scheduled { attempt, delay } => format!(
            "next check in {}s (after attempt {})",
            delay.as_secs_f64(),
            attempt
        ),
        SchedulerPhase::Suspended { attempt } => {
            format!("paused while hidden (after attempt {})", attempt)
        }
        SchedulerPhase::Stopped { attempts, reason } => {
            format!("stopped after {} attempt(s): {:?}", attempts, reason)
        }
    }
}
