//! Terminal rendering of chain results.

use console::style;

use crate::api::{ChainOutput, RunError};
use crate::core::categories::CategoryResolution;

const RULE_WIDTH: usize = 80;
const SECTION_WIDTH: usize = 60;

pub fn print_banner(title: &str) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", style(title).bold());
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Prints the header preceding one query's results.
pub fn print_query_header(index: usize, query: &str) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{} {}", style(format!("TEST {}:", index)).cyan().bold(), query);
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Prints the five stage outputs as labeled sections.
pub fn print_output(output: &ChainOutput) {
    for (stage, text) in output.stages() {
        println!("\n{}:", style(stage).yellow());
        println!("{}", "-".repeat(SECTION_WIDTH));
        println!("{}", text);
    }

    match &output.category {
        CategoryResolution::Matched(_) => {}
        CategoryResolution::Fallback(label) => println!(
            "\n{}",
            style(format!("Note: chosen category not recognised, used '{}'", label)).yellow()
        ),
        CategoryResolution::Unmatched => println!(
            "\n{}",
            style("Note: chosen category is not one of the configured categories").yellow()
        ),
    }
}

pub fn print_error(err: &RunError) {
    println!("{} {}", style("Error:").red().bold(), err);
}
