//! High-level API for running the support chain.

mod error;
mod llm_bridge;
mod runner;
mod stage;

use serde::Serialize;

pub use error::{CompletionError, RunError};
pub use llm_bridge::{CompletionClient, LlmClient};
pub use runner::{BatchItem, SupportChain};
pub use stage::Stage;

use crate::core::categories::CategoryResolution;

/// Result of one successful chain run.
///
/// The five text fields are the raw stage outputs, in stage order. The
/// remaining fields are derived from them and never alter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainOutput {
    pub intent: String,
    pub suggestions: String,
    pub chosen_category: String,
    pub details: String,
    pub response: String,
    /// How the chosen category was matched against the category set.
    pub category: CategoryResolution,
    /// False when the details stage answered with the sentinel.
    pub details_required: bool,
}

impl ChainOutput {
    /// The stage outputs paired with their stages.
    pub fn stages(&self) -> [(Stage, &str); 5] {
        [
            (Stage::InterpretIntent, self.intent.as_str()),
            (Stage::SuggestCategories, self.suggestions.as_str()),
            (Stage::ChooseCategory, self.chosen_category.as_str()),
            (Stage::ExtractDetails, self.details.as_str()),
            (Stage::DraftResponse, self.response.as_str()),
        ]
    }

    pub fn output(&self, stage: Stage) -> &str {
        self.stages()[stage.number() - 1].1
    }

    /// The five outputs in stage order.
    pub fn into_stages(self) -> [String; 5] {
        [
            self.intent,
            self.suggestions,
            self.chosen_category,
            self.details,
            self.response,
        ]
    }
}
