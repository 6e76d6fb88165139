//! Quadra: Importance-Performance Analysis CLI Tool
//!
//! A command-line tool for analyzing employee engagement surveys:
//! demographic filtering, respondent segmentation, and standardized
//! regression of engagement factors against overall satisfaction.

mod cli;
mod pipeline;
mod report;
mod utils;

use anyhow::Result;
use clap::Parser;
use console::style;

use cli::{prompt_filters, Cli};
use pipeline::{
    apply_filters, attach_segments, column_distribution, compute_ipa, dataset_stats,
    load_survey, validate_survey, FilterSelection, LsCategory, NpsCategory, SurveySchema,
    LS_COLUMN, NPS_COLUMN,
};
use report::{export_analysis, AnalysisReport, ExportParams};
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_info, print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let schema = SurveySchema::default();

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a survey file.")
    })?;

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(input, cli.filters.len(), cli.output.as_deref());

    // Step 1: Load dataset
    print_step_header(1, "Load Survey");
    let spinner = create_spinner("Loading dataset...");
    let df = load_survey(input, cli.infer_schema_length)?;
    validate_survey(&df, &schema)?;
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols, memory_mb) = dataset_stats(&df);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    // Step 2: Demographic filters
    print_step_header(2, "Filter Population");

    let mut selections = cli.filters.clone();
    if !cli.no_confirm && console::user_attended() {
        selections.extend(prompt_filters(&df, &schema)?);
    }

    let outcome = apply_filters(&df, &selections, &schema.filter_columns)?;
    for ignored in &outcome.ignored {
        print_warning(&format!(
            "Ignoring filter {}={} ({})",
            ignored.selection.column, ignored.selection.value, ignored.reason
        ));
    }
    if outcome.applied.is_empty() {
        print_info("No filters applied; analyzing the entire population");
    } else {
        print_success(&format!(
            "Applied {} filter(s): {} of {} respondent(s) selected",
            outcome.applied.len(),
            outcome.frame.height(),
            rows
        ));
    }

    // Step 3: Segmentation
    print_step_header(3, "Segment Respondents");
    let labeled = attach_segments(&outcome.frame, &schema)?;

    // Secondary category filters over the derived label columns,
    // unknown labels degrade to "All".
    let ls_filter = normalize_category_filter::<LsCategory>(&cli.ls_category, "LS");
    let nps_filter = normalize_category_filter::<NpsCategory>(&cli.nps_category, "NPS");
    let secondary = [
        FilterSelection::new(LS_COLUMN, ls_filter.clone()),
        FilterSelection::new(NPS_COLUMN, nps_filter.clone()),
    ];
    let derived_columns = vec![LS_COLUMN.to_string(), NPS_COLUMN.to_string()];
    let view = apply_filters(&labeled, &secondary, &derived_columns)?;
    for ignored in &view.ignored {
        print_warning(&format!(
            "Ignoring category filter {}={} ({})",
            ignored.selection.column, ignored.selection.value, ignored.reason
        ));
    }

    let ls_distribution = column_distribution(&view.frame, LS_COLUMN)?;
    let nps_distribution = column_distribution(&view.frame, NPS_COLUMN)?;
    print_success(&format!(
        "Segmented {} respondent(s) into LS and NPS categories",
        view.frame.height()
    ));

    // Step 4: Importance-Performance Analysis
    print_step_header(4, "Importance-Performance Analysis");
    let spinner = create_spinner("Fitting standardized regression...");
    let ipa = match compute_ipa(&view.frame, &schema) {
        Ok(analysis) => {
            finish_with_success(
                &spinner,
                &format!("Computed importance for {} factor(s)", analysis.records.len()),
            );
            Some(analysis)
        }
        Err(err) => {
            // A bad filter combination is not fatal; render the reason
            // and skip the quadrant chart.
            utils::finish_with_warning(&spinner, &format!("Analysis unavailable: {}", err));
            None
        }
    };

    // Display the collected report
    let analysis_report = AnalysisReport {
        total_rows: rows,
        filtered_rows: view.frame.height(),
        applied_filters: outcome.applied.clone(),
        ls_distribution: ls_distribution.clone(),
        nps_distribution: nps_distribution.clone(),
        ipa: ipa.clone(),
    };
    analysis_report.display();

    // Step 5: Export
    if let Some(output_path) = &cli.output {
        print_step_header(5, "Export Results");
        let input_display = input.display().to_string();
        let params = ExportParams {
            input_file: &input_display,
            filters: &outcome.applied,
            ls_filter: (!ls_filter.eq_ignore_ascii_case("all")).then_some(ls_filter.as_str()),
            nps_filter: (!nps_filter.eq_ignore_ascii_case("all")).then_some(nps_filter.as_str()),
            respondents_total: rows,
            respondents_filtered: view.frame.height(),
        };
        export_analysis(
            ipa.as_ref(),
            &ls_distribution,
            &nps_distribution,
            output_path,
            &params,
        )?;
        print_success(&format!("Saved to {}", output_path.display()));
    }

    print_completion();

    Ok(())
}

/// Validate a secondary category filter against the known labels.
///
/// Unknown labels are not fatal; they degrade to "All" with a warning.
fn normalize_category_filter<C: std::str::FromStr>(value: &str, axis: &str) -> String {
    if value.eq_ignore_ascii_case("all") || value.parse::<C>().is_ok() {
        value.to_string()
    } else {
        print_warning(&format!(
            "Unknown {} category '{}'; keeping all categories",
            axis, value
        ));
        "All".to_string()
    }
}
