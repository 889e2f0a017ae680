#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use support_chain::{CompletionClient, CompletionError};

/// Answers with pre-recorded results, in order, and remembers every prompt.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn ok<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::EmptyResponse))
    }
}

/// Answers by recognising which stage a prompt belongs to.
///
/// Fails the first stage of any query containing `FAIL`.
pub struct StageAwareClient;

#[async_trait]
impl CompletionClient for StageAwareClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        tokio::task::yield_now().await;
        if prompt.starts_with("Analyze the following customer query") {
            if prompt.contains("FAIL") {
                return Err(CompletionError::Provider(llm::error::LLMError::HttpError(
                    "connection reset".to_string(),
                )));
            }
            let query = prompt
                .lines()
                .find_map(|l| l.strip_prefix("Customer Query: "))
                .unwrap_or_default();
            return Ok(format!("Intent: {}", query));
        }
        let reply = if prompt.starts_with("Based on the customer's intent") {
            "1. Card Services\n2. Transaction Inquiry\n3. General Information"
        } else if prompt.starts_with("Review the suggested categories") {
            "1. Card Services\n2. The customer is asking about their card."
        } else if prompt.starts_with("Identify any additional details") {
            "No additional details required"
        } else {
            "Thank you for reaching out. We will look into this right away."
        };
        Ok(reply.to_string())
    }
}

pub const INTENT: &str =
    "1. The customer wants to apply for a personal loan.\n2. Keywords: loan, apply, personal";
pub const SUGGESTIONS: &str = "1. Loan Inquiry - asks about a loan application\n2. Account Opening - may need an account\n3. General Information - general process question";
pub const CHOSEN: &str =
    "1. Loan Inquiry\n2. The customer explicitly asks how to apply for a personal loan.";
pub const DETAILS_LIST: &str = "- Label: Loan Amount\n  Reason: determines eligible products\n  Question: How much would you like to borrow?";
pub const RESPONSE: &str = "Thank you for your interest in a personal loan. To get started, could you tell us how much you would like to borrow? Once we have that, we will walk you through the application.";
