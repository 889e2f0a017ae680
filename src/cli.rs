//! Defines the command-line interface structure using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use crate::core::categories::CategoryPolicy;

#[derive(Parser)]
#[command(
    name = "support-chain",
    version,
    about = "Triage customer support queries through a five-stage LLM prompt chain"
)]
pub struct Cli {
    /// Path to config.toml (defaults to ~/.support-chain/config.toml)
    #[arg(long, global = true, env = "SUPPORT_CHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Run the chain for a single customer query
    Run {
        /// The customer's message
        query: String,
        /// Reaction to an unknown chosen category: lenient, fallback or strict
        #[arg(long)]
        policy: Option<CategoryPolicy>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the chain for several independent queries
    Batch {
        /// YAML file containing a list of queries (defaults to built-in samples)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Maximum number of queries processed at once
        #[arg(long)]
        concurrency: Option<usize>,
        /// Reaction to an unknown chosen category: lenient, fallback or strict
        #[arg(long)]
        policy: Option<CategoryPolicy>,
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured support categories
    Categories,
    /// Render a stage prompt with variable substitution (no LLM call)
    Render {
        /// Stage number, 1 to 5
        stage: usize,
        #[arg(long = "var", help = "Variable assignments in key=value format")]
        vars: Vec<String>,
    },
}
