use crate::api::{CompletionClient, SupportChain};
use crate::ui;
use spinners::{Spinner, Spinners};

/// Run the chain for one query and print every stage.
pub async fn run<C: CompletionClient>(
    chain: &SupportChain<C>,
    query: &str,
    json: bool,
) -> Result<(), String> {
    if json {
        let output = chain.run(query).await.map_err(|e| e.to_string())?;
        let rendered = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut sp = Spinner::new(Spinners::Dots9, "Running support chain...".into());
    match chain.run(query).await {
        Ok(output) => {
            sp.stop_with_message("✔ Chain complete.".into());
            ui::print_output(&output);
            Ok(())
        }
        Err(e) => {
            sp.stop_with_message("✘ Chain failed.".into());
            Err(e.to_string())
        }
    }
}
