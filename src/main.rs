use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_digest::config::Config;
use news_digest::fetcher::HttpFetcher;
use news_digest::generate::generate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout only carries the final message
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_digest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load("feeds.toml")?;
    info!("Loaded {} feeds from configuration", config.feeds.len());

    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.request_timeout_secs,
    ))?);

    let report = generate(&config, fetcher).await?;

    if !report.failures.is_empty() {
        warn!("{} of {} feeds failed", report.failures.len(), config.feeds.len());
    }
    println!(
        "Saved {} ({} entries)",
        report.output_path.display(),
        report.entries
    );

    Ok(())
}
