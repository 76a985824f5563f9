//! Feedwatch — Binary Entrypoint
//! Loads credentials and the startup subscription set, spins up the monitor
//! engine, and runs until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedwatch::{
    config, EndpointId, MonitorEngine, StartResult, SubscriptionRequest, TelegramSink,
    TwitterClient,
};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("feedwatch=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = config::load_default()?;
    let creds = config::Credentials::from_env()?;

    let source = Arc::new(TwitterClient::new(creds.rapidapi_key));
    let sink = Arc::new(TelegramSink::new(creds.telegram_token));
    let engine = MonitorEngine::new(source, sink)
        .with_poll_interval(Duration::from_secs(cfg.poll_interval_secs));

    for entry in cfg.subscriptions {
        let request = SubscriptionRequest {
            endpoint: EndpointId(entry.chat_id),
            identity: entry.user.clone(),
            keywords: entry.keywords,
        };
        match engine.start(request) {
            StartResult::Started => {}
            StartResult::Conflict => {
                warn!(user = %entry.user, chat_id = entry.chat_id, "duplicate subscription in config, skipped");
            }
        }
    }

    info!(active = engine.active_count(), "feedwatch running, Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    let stopped = engine.stop_where(|_| true).await;
    info!(stopped, "shut down");
    Ok(())
}
