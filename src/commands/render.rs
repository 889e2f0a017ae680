use crate::api::Stage;
use crate::core::config::ChainConfig;
use crate::core::templates::render_template;
use crate::core::utils::parse_vars;

/// Render a stage prompt with variables and print it to stdout.
///
/// `categories`, `default_category` and `sentinel` are filled from the
/// configuration unless given explicitly.
pub fn run(config: &ChainConfig, stage: usize, vars: &[String]) -> Result<(), String> {
    let stage = Stage::from_number(stage)
        .ok_or_else(|| format!("No stage {}. Stages are numbered 1 to 5", stage))?;

    let categories = config.categories.as_bullets();
    let mut map = parse_vars(vars);
    map.entry("categories").or_insert(categories.as_str());
    map.entry("default_category")
        .or_insert(config.categories.default_label());
    map.entry("sentinel").or_insert(config.sentinel.text.as_str());

    let rendered = render_template(stage.template(), &map).map_err(|missing| {
        format!(
            "Missing variables for stage {}: {} (pass them with --var key=value)",
            stage.number(),
            missing.join(", ")
        )
    })?;

    println!("{}", rendered);
    Ok(())
}
