use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::error::DigestError;
use crate::fetcher::FeedFetcher;
use crate::pipeline::{aggregate, SourceFailure};
use crate::render::render;

/// Outcome of a successful run.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_path: PathBuf,
    pub entries: usize,
    pub failures: Vec<SourceFailure>,
}

/// Fetch every configured feed and write the rendered page.
///
/// The template is read before any feed is fetched so a missing template
/// fails fast. Individual feed failures are reported but do not fail the run.
pub async fn generate(
    config: &Config,
    fetcher: Arc<dyn FeedFetcher>,
) -> Result<GenerateReport, DigestError> {
    let template = tokio::fs::read_to_string(&config.template_path)
        .await
        .map_err(|source| DigestError::TemplateRead {
            path: config.template_path.clone(),
            source,
        })?;

    info!("Fetching {} feeds", config.feeds.len());
    let aggregation = aggregate(fetcher, &config.feeds, config.queue_capacity).await;

    let document = render(&aggregation.entries, &template, &config.placeholder)?;

    tokio::fs::write(&config.output_path, document)
        .await
        .map_err(|source| DigestError::OutputWrite {
            path: config.output_path.clone(),
            source,
        })?;

    Ok(GenerateReport {
        output_path: config.output_path.clone(),
        entries: aggregation.entries.len(),
        failures: aggregation.failures,
    })
}
