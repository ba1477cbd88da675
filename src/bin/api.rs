use std::sync::Arc;

use anyhow::Context;
use pdf_summarizer::api::{AppState, handler};
use pdf_summarizer::core::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    pdf_summarizer::setup_logging();

    let config = AppConfig::from_env().context("loading configuration")?;
    let state = Arc::new(AppState::from_config(config).context("building summarizer")?);

    lambda_runtime::run(lambda_runtime::service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
