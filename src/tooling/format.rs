//! Text and JSON rendering for command output.

use crate::environment::RoleEntry;
use crate::refresh::RefreshOutcome;
use crate::roles::RoleChange;
use crate::vcs::FetchStatus;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// Snapshot of an environment for the `status` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub root: String,
    pub commit: Option<String>,
    pub last_fetched: Option<String>,
    pub fetch_age_secs: Option<u64>,
    pub stale: bool,
    pub opt_out: bool,
    pub available_roles: usize,
    pub enabled_roles: usize,
}

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_role_listing_text(entries: &[RoleEntry]) -> String {
    if entries.is_empty() {
        return "No roles available.\n".to_string();
    }
    let enabled = entries.iter().filter(|e| e.enabled).count();

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Role"]);
    for entry in entries {
        let marker = if entry.enabled { "*" } else { "" };
        table.add_row(vec![marker.to_string(), entry.name.clone()]);
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Available roles")));
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "{} of {} roles enabled (marked with *).\n",
        enabled,
        entries.len()
    ));
    out
}

pub fn format_role_listing_json(entries: &[RoleEntry]) -> String {
    let value = json!({ "roles": entries });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// Summarize an enable/disable request.
pub fn format_role_change(verb: &str, change: &RoleChange) -> String {
    let mut out = String::new();
    if change.changed.is_empty() {
        out.push_str(&format!("No roles {}.\n", verb));
    } else {
        out.push_str(&format!("Roles {}: {}\n", verb, change.changed.join(", ")));
    }
    if !change.unchanged.is_empty() {
        out.push_str(&format!(
            "Already {}: {}\n",
            verb,
            change.unchanged.join(", ")
        ));
    }
    out
}

pub fn format_pruned(pruned: &[String]) -> String {
    if pruned.is_empty() {
        "All enabled roles are available.\n".to_string()
    } else {
        format!("Removed unavailable roles: {}\n", pruned.join(", "))
    }
}

pub fn format_reset(previous: &[String]) -> String {
    if previous.is_empty() {
        "No roles were enabled.\n".to_string()
    } else {
        format!("Disabled all roles: {}\n", previous.join(", "))
    }
}

pub fn format_refresh_outcome(outcome: &RefreshOutcome) -> String {
    match outcome {
        RefreshOutcome::Fresh => "Remote commits were fetched recently.\n".to_string(),
        RefreshOutcome::Suppressed => {
            "Remote commits are stale, but automatic fetching is disabled.\n".to_string()
        }
        RefreshOutcome::Attempted(status) => match status {
            FetchStatus::Exited { code: Some(0) } => "Fetched remote commits.\n".to_string(),
            FetchStatus::Exited { code: Some(code) } => {
                format!("Fetch exited with status {}.\n", code)
            }
            FetchStatus::Exited { code: None } => "Fetch was interrupted.\n".to_string(),
            FetchStatus::NotStarted { reason } => format!("Fetch could not start: {}\n", reason),
        },
    }
}

pub fn format_status_text(report: &StatusReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Environment")));
    out.push_str(&format!("  Root: {}\n", report.root));
    out.push_str(&format!(
        "  Commit: {}\n",
        report.commit.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "  Last fetch: {}\n",
        report.last_fetched.as_deref().unwrap_or("never")
    ));
    if let Some(age) = report.fetch_age_secs {
        out.push_str(&format!("  Fetch age: {}\n", format_age(age)));
    }
    out.push_str(&format!("  Stale: {}\n", yes_no(report.stale)));
    out.push_str(&format!("  Auto-fetch disabled: {}\n\n", yes_no(report.opt_out)));
    out.push_str(&format!("{}\n\n", format_section_heading("Roles")));
    out.push_str(&format!(
        "  Enabled: {} of {}\n",
        report.enabled_roles, report.available_roles
    ));
    out
}

pub fn format_status_json(report: &StatusReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| json!(report).to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Coarse human-readable duration.
pub fn format_age(secs: u64) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    match secs {
        s if s >= DAY => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
        s if s >= HOUR => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s if s >= MINUTE => format!("{}m", s / MINUTE),
        s => format!("{}s", s),
    }
}
