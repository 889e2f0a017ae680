//! Runs the five-stage support chain for one query or a batch of them.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::{
    error::{CompletionError, RunError},
    llm_bridge::CompletionClient,
    stage::Stage,
    ChainOutput,
};
use crate::core::categories::{CategoryPolicy, CategoryResolution};
use crate::core::config::ChainConfig;
use crate::core::templates::render_template;

/// The sequential support chain.
///
/// Holds the completion client and the immutable chain settings. A single
/// value can serve any number of queries, concurrently if the client allows.
pub struct SupportChain<C> {
    client: C,
    config: ChainConfig,
}

/// Result for one query of a batch.
#[derive(Debug)]
pub struct BatchItem {
    pub query: String,
    pub result: Result<ChainOutput, RunError>,
}

impl<C: CompletionClient> SupportChain<C> {
    pub fn new(client: C, config: ChainConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Runs all five stages for `query`.
    ///
    /// Stops at the first failing stage; nothing after it is called and no
    /// partial output is returned.
    pub async fn run(&self, query: &str) -> Result<ChainOutput, RunError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RunError::EmptyQuery);
        }

        let categories = self.config.categories.as_bullets();
        let mut vars: HashMap<&str, &str> = HashMap::from([
            ("query", query),
            ("categories", categories.as_str()),
            ("default_category", self.config.categories.default_label()),
            ("sentinel", self.config.sentinel.text.as_str()),
        ]);

        let intent = self.execute(Stage::InterpretIntent, &vars).await?;
        vars.insert(Stage::InterpretIntent.output_key(), &intent);

        let suggestions = self.execute(Stage::SuggestCategories, &vars).await?;
        vars.insert(Stage::SuggestCategories.output_key(), &suggestions);

        let chosen = self.execute(Stage::ChooseCategory, &vars).await?;
        let category = self.resolve_category(&chosen)?;
        let category_for_prompts = match &category {
            CategoryResolution::Fallback(label) => label.as_str(),
            _ => chosen.as_str(),
        };
        vars.insert(Stage::ChooseCategory.output_key(), category_for_prompts);

        let details = self.execute(Stage::ExtractDetails, &vars).await?;
        let details_required = !self.config.sentinel.matches(&details);
        vars.insert(Stage::ExtractDetails.output_key(), &details);

        let response = self.execute(Stage::DraftResponse, &vars).await?;
        drop(vars);

        info!(
            category = category.label().unwrap_or("<unmatched>"),
            details_required, "Support chain completed"
        );

        Ok(ChainOutput {
            intent,
            suggestions,
            chosen_category: chosen,
            details,
            response,
            category,
            details_required,
        })
    }

    /// Runs every query as an independent chain, at most `concurrency` at a time.
    ///
    /// Results keep the input order. A failed query is reported in its own
    /// item and does not stop the others.
    pub async fn run_batch<Q>(&self, queries: &[Q], concurrency: usize) -> Vec<BatchItem>
    where
        Q: AsRef<str>,
    {
        stream::iter(queries)
            .map(|q| async move {
                let query = q.as_ref();
                let result = self.run(query).await;
                if let Err(e) = &result {
                    tracing::error!(query, error = %e, "Support chain failed");
                }
                BatchItem {
                    query: query.to_string(),
                    result,
                }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    async fn execute(&self, stage: Stage, vars: &HashMap<&str, &str>) -> Result<String, RunError> {
        let prompt = render_template(stage.template(), vars)
            .map_err(|missing| RunError::Template { stage, missing })?;

        debug!(stage = stage.number(), prompt_len = prompt.len(), "Running stage");
        let output = self
            .client
            .complete(&prompt)
            .await
            .map_err(|source| RunError::Stage { stage, source })?;

        if output.trim().is_empty() {
            return Err(RunError::Stage {
                stage,
                source: CompletionError::EmptyResponse,
            });
        }
        Ok(output)
    }

    fn resolve_category(&self, chosen: &str) -> Result<CategoryResolution, RunError> {
        let categories = &self.config.categories;
        if let Some(label) = categories.find_in(chosen) {
            return Ok(CategoryResolution::Matched(label.to_string()));
        }

        match self.config.policy {
            CategoryPolicy::Lenient => {
                warn!(chosen, "Chosen category is not a known label, keeping it");
                Ok(CategoryResolution::Unmatched)
            }
            CategoryPolicy::Fallback => {
                warn!(
                    chosen,
                    fallback = categories.default_label(),
                    "Chosen category is not a known label, using the default"
                );
                Ok(CategoryResolution::Fallback(
                    categories.default_label().to_string(),
                ))
            }
            CategoryPolicy::Strict => Err(RunError::UnknownCategory {
                chosen: chosen.to_string(),
            }),
        }
    }
}
