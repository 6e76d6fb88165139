//! Terminal rendering of the analysis results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{
    group_by_quadrant, CategoryShare, FilterSelection, IpaAnalysis, Quadrant,
};

/// Everything one analysis run produced, collected for display.
#[derive(Debug)]
pub struct AnalysisReport {
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub applied_filters: Vec<FilterSelection>,
    pub ls_distribution: Vec<CategoryShare>,
    pub nps_distribution: Vec<CategoryShare>,
    pub ipa: Option<IpaAnalysis>,
}

impl AnalysisReport {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("▣").cyan(),
            style("POPULATION").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!(
            "      {} of {} respondent(s) selected",
            style(self.filtered_rows).yellow().bold(),
            self.total_rows
        );
        if self.applied_filters.is_empty() {
            println!("      No filters applied (entire population)");
        } else {
            for filter in &self.applied_filters {
                println!(
                    "      {} {} = {}",
                    style("•").dim(),
                    filter.column,
                    style(&filter.value).yellow()
                );
            }
        }

        display_distribution("LIKELIHOOD TO STAY", &self.ls_distribution);
        display_distribution("NET PROMOTER SCORE", &self.nps_distribution);

        if let Some(ipa) = &self.ipa {
            display_factor_table(ipa);
            display_quadrant_groups(ipa);
        }
    }
}

fn display_distribution(title: &str, shares: &[CategoryShare]) {
    println!();
    println!(
        "    {} {}",
        style("▣").cyan(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    if shares.is_empty() {
        println!("      {}", style("no respondents in this view").dim());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Category").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Share").add_attribute(Attribute::Bold),
    ]);
    for share in shares {
        table.add_row(vec![
            Cell::new(&share.label),
            Cell::new(share.count),
            Cell::new(format!("{:.1}%", share.percentage)),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::KeepDoingWell => Color::Green,
        Quadrant::ImprovePerformance => Color::Red,
        Quadrant::PossibleOverkill => Color::Yellow,
        Quadrant::LowPriority => Color::White,
    }
}

fn quadrant_term_color(quadrant: Quadrant) -> console::Color {
    match quadrant {
        Quadrant::KeepDoingWell => console::Color::Green,
        Quadrant::ImprovePerformance => console::Color::Red,
        Quadrant::PossibleOverkill => console::Color::Yellow,
        Quadrant::LowPriority => console::Color::White,
    }
}

fn display_factor_table(ipa: &IpaAnalysis) {
    println!();
    println!(
        "    {} {}",
        style("▣").cyan(),
        style("IMPORTANCE-PERFORMANCE ANALYSIS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Factor").add_attribute(Attribute::Bold),
        Cell::new("Dimension").add_attribute(Attribute::Bold),
        Cell::new("Importance").add_attribute(Attribute::Bold),
        Cell::new("Performance").add_attribute(Attribute::Bold),
        Cell::new("Quadrant").add_attribute(Attribute::Bold),
    ]);
    for record in &ipa.records {
        table.add_row(vec![
            Cell::new(&record.factor),
            Cell::new(&record.dimension),
            Cell::new(format!("{:.3}", record.importance)),
            Cell::new(format!("{:.3}", record.performance)),
            Cell::new(record.quadrant.label()).fg(quadrant_color(record.quadrant)),
        ]);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    println!(
        "      Midpoints: importance {} / performance {}",
        style(format!("{:.3}", ipa.importance_midpoint)).yellow(),
        style(format!("{:.3}", ipa.performance_midpoint)).yellow()
    );
}

fn display_quadrant_groups(ipa: &IpaAnalysis) {
    println!();
    println!(
        "    {} {}",
        style("▣").cyan(),
        style("FACTOR CLASSIFICATION").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    for (quadrant, members) in group_by_quadrant(&ipa.records) {
        let names = if members.is_empty() {
            style("none".to_string()).dim().to_string()
        } else {
            members.join(", ")
        };
        println!(
            "      {} {}: {}",
            style(quadrant.label()).fg(quadrant_term_color(quadrant)),
            style(format!("({})", quadrant.description())).dim(),
            names
        );
    }
}
