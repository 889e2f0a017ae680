use crate::api::{LlmClient, SupportChain};
use crate::cli::Cmd;
use crate::core::categories::CategoryPolicy;
use crate::core::config::AppConfig;

pub mod batch;
pub mod categories;
pub mod render;
pub mod run;

/// Dispatches the parsed command to the appropriate handler.
pub async fn dispatch(command: Cmd, config: AppConfig) -> Result<(), String> {
    match command {
        Cmd::Run {
            query,
            policy,
            json,
        } => {
            let chain = build_chain(config, policy)?;
            run::run(&chain, &query, json).await
        }
        Cmd::Batch {
            file,
            concurrency,
            policy,
            json,
        } => {
            let queries = batch::load_queries(file.as_deref())?;
            let concurrency = concurrency.unwrap_or(config.concurrency);
            let chain = build_chain(config, policy)?;
            batch::run(&chain, &queries, concurrency, json).await
        }
        Cmd::Categories => categories::run(&config.chain),
        Cmd::Render { stage, vars } => render::run(&config.chain, stage, &vars),
    }
}

/// Builds the chain, reading the credential from the environment.
fn build_chain(
    config: AppConfig,
    policy: Option<CategoryPolicy>,
) -> Result<SupportChain<LlmClient>, String> {
    let client = LlmClient::from_settings(&config.provider).map_err(|e| e.to_string())?;
    let mut chain_config = config.chain;
    if let Some(policy) = policy {
        chain_config.policy = policy;
    }
    Ok(SupportChain::new(client, chain_config))
}
