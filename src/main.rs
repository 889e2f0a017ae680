use clap::Parser;
use support_chain::cli::Cli;
use support_chain::commands;
use support_chain::core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    commands::dispatch(cli.command, config).await
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(verbose, rust_log.as_deref()))
        .init();
}

/// `RUST_LOG` decides the filter, `warn` when unset or unparsable.
/// Each `-v` raises the global level on top of it.
fn build_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    match verbose {
        0 => filter,
        1 => filter.add_directive(tracing::Level::INFO.into()),
        _ => filter.add_directive(tracing::Level::DEBUG.into()),
    }
}
