//! Error types for the library API.

use llm::error::LLMError;
use thiserror::Error;

use super::stage::Stage;

/// Failures of a single completion call.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The prompt was empty; nothing was sent.
    #[error("Refusing to send an empty prompt")]
    EmptyPrompt,

    /// The service answered without any text.
    #[error("Completion service returned an empty response")]
    EmptyResponse,

    /// Transport, authentication, rate-limit or provider-side failure.
    #[error("LLM backend error: {0}")]
    Provider(#[from] LLMError),
}

/// Errors returned by a chain run.
#[derive(Error, Debug)]
pub enum RunError {
    /// The query was empty or whitespace only.
    #[error("Query must not be empty")]
    EmptyQuery,

    /// A stage's completion call failed; later stages were not run.
    #[error("Stage {} ({}) failed: {source}", .stage.number(), .stage.label())]
    Stage {
        stage: Stage,
        #[source]
        source: CompletionError,
    },

    /// A stage template refers to variables that were not supplied.
    #[error("Template for stage {} is missing variables: {}", .stage.number(), .missing.join(", "))]
    Template { stage: Stage, missing: Vec<String> },

    /// Under the strict policy, the chosen category is not a known label.
    #[error("Chosen category '{chosen}' is not one of the configured categories")]
    UnknownCategory { chosen: String },
}

impl RunError {
    /// The stage the run stopped at, when the error came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RunError::Stage { stage, .. } | RunError::Template { stage, .. } => Some(*stage),
            RunError::UnknownCategory { .. } => Some(Stage::ChooseCategory),
            RunError::EmptyQuery => None,
        }
    }
}
