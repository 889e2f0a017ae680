//! Building blocks shared by the API and the CLI.

pub mod categories;
pub mod config;
pub mod details;
pub mod templates;
pub mod utils;
