mod cli;
mod json;
mod text;

pub use cli::render_cli_table;
pub use json::{render_inventory_json, render_json};
pub use text::{render_inventory_text, render_text};

use crate::model::ScanReport;
use anyhow::Result;

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `kind | file | name@version` line per finding
    Text,
    /// Human-readable table with a summary
    Table,
    /// JSON format for programmatic use
    Json,
}

impl OutputFormat {
    /// Interactive formats show per-project progress while scanning.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: {}. Use 'text', 'table', or 'json'",
                s
            )),
        }
    }
}

/// Formats a scan report.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Table => Ok(render_cli_table(report)),
        OutputFormat::Json => render_json(report),
    }
}

/// Formats an inventory. Table output is the same as text: one name per line.
pub fn render_inventory(names: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_inventory_json(names),
        OutputFormat::Text | OutputFormat::Table => Ok(render_inventory_text(names)),
    }
}
