use crate::api::{BatchItem, CompletionClient, SupportChain};
use crate::core::utils::SAMPLE_QUERIES;
use crate::ui;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Load queries from a YAML list, or fall back to the built-in samples.
pub fn load_queries(file: Option<&Path>) -> Result<Vec<String>, String> {
    let Some(path) = file else {
        return Ok(SAMPLE_QUERIES.iter().map(|q| q.to_string()).collect());
    };

    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let queries: Vec<String> = serde_yaml::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let queries: Vec<String> = queries
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();
    if queries.is_empty() {
        return Err(format!("No queries found in {}", path.display()));
    }
    Ok(queries)
}

/// Run every query independently; a failed query is reported and skipped.
pub async fn run<C: CompletionClient>(
    chain: &SupportChain<C>,
    queries: &[String],
    concurrency: usize,
    json: bool,
) -> Result<(), String> {
    let items = chain.run_batch(queries, concurrency).await;

    if json {
        let rendered =
            serde_json::to_string_pretty(&json_report(&items)).map_err(|e| e.to_string())?;
        println!("{}", rendered);
        return Ok(());
    }

    ui::print_banner("CUSTOMER SUPPORT PROMPT CHAIN - RESULTS");
    for (i, item) in items.iter().enumerate() {
        ui::print_query_header(i + 1, &item.query);
        match &item.result {
            Ok(output) => ui::print_output(output),
            Err(e) => ui::print_error(e),
        }
        println!();
    }

    Ok(())
}

/// One JSON object per query: the output, or the error and the stage it stopped at.
fn json_report(items: &[BatchItem]) -> Value {
    items
        .iter()
        .map(|item| match &item.result {
            Ok(output) => json!({ "query": item.query, "output": output }),
            Err(e) => json!({
                "query": item.query,
                "error": e.to_string(),
                "failed_stage": e.stage(),
            }),
        })
        .collect()
}
