//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::FilterSelection;

/// Quadra - Importance-Performance Analysis over employee survey data
#[derive(Parser, Debug)]
#[command(name = "quadra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input survey file (CSV or Parquet)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Demographic filter as column=value (repeatable; AND semantics).
    /// Use "All" as the value (or omit the filter) for no constraint.
    #[arg(short = 'f', long = "filter", value_parser = parse_filter_spec)]
    pub filters: Vec<FilterSelection>,

    /// Restrict the view to one likelihood-to-stay category
    /// (e.g. "Loyal Enthusiast"); "All" keeps every respondent.
    #[arg(long, default_value = "All")]
    pub ls_category: String,

    /// Restrict the view to one NPS category
    /// (e.g. "Brand Champions"); "All" keeps every respondent.
    #[arg(long, default_value = "All")]
    pub nps_category: String,

    /// Output JSON file for the full analysis.
    /// When omitted, results are only rendered to the terminal.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the interactive filter prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the input path, returning an error message when missing.
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }
}

/// Parse a `column=value` filter specification.
pub fn parse_filter_spec(s: &str) -> Result<FilterSelection, String> {
    match s.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => Ok(FilterSelection::new(
            column.trim().to_string(),
            value.trim().to_string(),
        )),
        _ => Err(format!(
            "'{}' is not a valid filter; expected column=value (e.g. gender=Female)",
            s
        )),
    }
}
