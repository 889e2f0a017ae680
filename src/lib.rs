pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;

pub use crate::api::{ChainOutput, CompletionClient, CompletionError, LlmClient, RunError, Stage, SupportChain};
pub use crate::core::config::{AppConfig, ChainConfig, ConfigError};
