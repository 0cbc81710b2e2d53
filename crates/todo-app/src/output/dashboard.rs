//! Dashboard output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

use crate::pages::DashboardStats;

#[derive(Serialize)]
struct DashboardOutput<'a> {
    #[serde(flatten)]
    stats: &'a DashboardStats,
    completion_percent: u8,
}

/// Formats dashboard counts as JSON.
pub fn format_dashboard_json(stats: &DashboardStats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DashboardOutput {
        stats,
        completion_percent: stats.completion_percent(),
    })
}

/// Formats dashboard counts as aligned text.
pub fn format_dashboard_table(stats: &DashboardStats, use_colors: bool) -> String {
    let percent = format!("{}%", stats.completion_percent());
    let percent = if use_colors {
        percent.bold().to_string()
    } else {
        percent
    };

    let mut output = String::new();
    output.push_str(&format!("{:<10} {}\n", "Total", stats.total));
    output.push_str(&format!("{:<10} {}\n", "Completed", stats.completed));
    output.push_str(&format!("{:<10} {}\n", "Pending", stats.pending));
    output.push_str(&format!("{:<10} {}\n", "Progress", percent));
    output
}
