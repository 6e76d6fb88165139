//! Terminal styling utilities

use console::style;
use std::path::Path;

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗ ██╗   ██╗ █████╗ ██████╗ ██████╗  █████╗
    ██╔═══██╗██║   ██║██╔══██╗██╔══██╗██╔══██╗██╔══██╗
    ██║   ██║██║   ██║███████║██║  ██║██████╔╝███████║
    ██║▄▄ ██║██║   ██║██╔══██║██║  ██║██╔══██╗██╔══██║
    ╚██████╔╝╚██████╔╝██║  ██║██████╔╝██║  ██║██║  ██║
     ╚══▀▀═╝  ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("◆").magenta().bold(),
        style("Importance-Performance Analysis for employee surveys").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(input: &Path, filter_count: usize, output: Option<&Path>) {
    println!(
        "    {} Input:   {}",
        style("▸").cyan(),
        truncate_path(input, 60)
    );
    println!(
        "    {} Filters: {}",
        style("▸").cyan(),
        if filter_count == 0 {
            style("none (entire population)".to_string()).dim().to_string()
        } else {
            style(format!("{} selection(s)", filter_count))
                .yellow()
                .to_string()
        }
    );
    match output {
        Some(path) => println!(
            "    {} Export:  {}",
            style("▸").cyan(),
            truncate_path(path, 60)
        ),
        None => println!(
            "    {} Export:  {}",
            style("▸").cyan(),
            style("terminal only").dim()
        ),
    }
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", style("ℹ").cyan(), message);
}

/// Print a non-fatal warning
pub fn print_warning(message: &str) {
    println!(
        "    {} {}",
        style("!").yellow().bold(),
        style(message).yellow()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        style("▸▸").cyan(),
        style("Quadra analysis complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    if path_str.len() <= max_len {
        path_str
    } else {
        format!("...{}", &path_str[path_str.len() - max_len + 3..])
    }
}
