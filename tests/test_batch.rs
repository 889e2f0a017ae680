//! Independent queries dispatched through `run_batch`.

mod common;

use common::StageAwareClient;
use support_chain::core::categories::CategoryResolution;
use support_chain::{ChainConfig, CompletionError, RunError, Stage, SupportChain};

#[tokio::test]
async fn batch_keeps_input_order_and_isolates_failures() {
    let chain = SupportChain::new(StageAwareClient, ChainConfig::default());
    let queries = vec![
        "My debit card was charged twice".to_string(),
        "FAIL this one".to_string(),
        "Please block my lost card".to_string(),
    ];

    let items = chain.run_batch(&queries, 2).await;

    assert_eq!(items.len(), 3);
    for (item, query) in items.iter().zip(&queries) {
        assert_eq!(&item.query, query);
    }

    let first = items[0].result.as_ref().unwrap();
    assert_eq!(first.intent, "Intent: My debit card was charged twice");
    assert_eq!(first.category, CategoryResolution::Matched("Card Services".to_string()));
    assert!(!first.details_required);

    assert!(matches!(
        items[1].result,
        Err(RunError::Stage {
            stage: Stage::InterpretIntent,
            source: CompletionError::Provider(_)
        })
    ));

    let third = items[2].result.as_ref().unwrap();
    assert_eq!(third.intent, "Intent: Please block my lost card");
}

#[tokio::test]
async fn zero_concurrency_still_runs_everything() {
    let chain = SupportChain::new(StageAwareClient, ChainConfig::default());
    let items = chain.run_batch(&["Where is my statement?"], 0).await;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].result.as_ref().unwrap().stages().len(), 5);
}
