use crate::core::config::ChainConfig;
use console::style;

/// Print the configured category set, marking the default.
pub fn run(config: &ChainConfig) -> Result<(), String> {
    let categories = &config.categories;
    println!("{}", style("Support Categories").bold().underlined());
    for (i, label) in categories.labels().iter().enumerate() {
        if label == categories.default_label() {
            println!("{:>2}. {} {}", i + 1, label, style("(default)").dim());
        } else {
            println!("{:>2}. {}", i + 1, label);
        }
    }
    println!(
        "\n{}: {}",
        style("Category policy").cyan(),
        config.policy
    );
    println!(
        "{}: \"{}\"",
        style("Details sentinel").cyan(),
        config.sentinel.text
    );
    Ok(())
}
