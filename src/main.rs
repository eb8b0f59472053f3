//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into services, run UI.
//! No business logic here.

use comment_reply::adapters::ai::OpenAiAdapter;
use comment_reply::adapters::ui::TuiInputPort;
use comment_reply::ports::{GenerationPort, InputPort};
use comment_reply::shared::config::AppConfig;
use comment_reply::usecases::ReplyService;
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    // Missing key or bad values stop here, before any generation is attempted.
    let cfg = AppConfig::load()?;
    let reply_config = Arc::new(
        cfg.into_reply_config()
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );
    info!(
        model = %reply_config.model,
        url = %reply_config.api_url,
        max_tokens = reply_config.max_tokens,
        temperature = reply_config.temperature,
        top_p = reply_config.top_p,
        "reply generation configured"
    );

    comment_reply::adapters::ui::init_ui();

    // --- Generation adapter ---
    let generator: Arc<dyn GenerationPort> = Arc::new(
        OpenAiAdapter::from_config(&reply_config).map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    // --- Services ---
    let reply_service = Arc::new(ReplyService::new(generator, Arc::clone(&reply_config)));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(reply_service));

    // --- Run (main menu -> Chat / Batch / Tones / Settings) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
