use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::fetcher::{fetch_source, Entry, FeedFetcher};

/// A source that contributed no entries because its fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub url: String,
    pub error: String,
}

/// Everything gathered from one run over the configured sources.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Sorted by source key, then title, ties in arrival order
    pub entries: Vec<Entry>,
    pub failures: Vec<SourceFailure>,
}

/// Fetch every source concurrently and collect the entries.
///
/// One task is spawned per source. Tasks push entries into a bounded queue;
/// a coordinator task joins every fetch task and only then drops the last
/// sender, which closes the queue. The caller drains the queue until it is
/// closed, so no entry can be lost to an early close. A failing or panicking
/// source is recorded in [`Aggregation::failures`] and never affects its
/// siblings.
pub async fn aggregate(
    fetcher: Arc<dyn FeedFetcher>,
    urls: &[String],
    queue_capacity: usize,
) -> Aggregation {
    // A zero capacity would panic in `mpsc::channel`.
    let (tx, mut rx) = mpsc::channel::<Entry>(queue_capacity.max(1));

    let tasks: Vec<(String, JoinHandle<Option<SourceFailure>>)> = urls
        .iter()
        .map(|url| {
            let handle = tokio::spawn(fetch_task(fetcher.clone(), url.clone(), tx.clone()));
            (url.clone(), handle)
        })
        .collect();

    let coordinator = tokio::spawn(async move {
        let mut failures = Vec::new();
        for (url, handle) in tasks {
            match handle.await {
                Ok(None) => {}
                Ok(Some(failure)) => failures.push(failure),
                Err(e) => {
                    error!(source = %url, error = %e, "Fetch task did not complete");
                    failures.push(SourceFailure {
                        url,
                        error: e.to_string(),
                    });
                }
            }
        }
        // Every producer is done; closing the queue ends the drain below.
        drop(tx);
        failures
    });

    let mut entries = Vec::new();
    while let Some(entry) = rx.recv().await {
        entries.push(entry);
    }

    let failures = match coordinator.await {
        Ok(failures) => failures,
        Err(e) => {
            error!(error = %e, "Fetch coordinator did not complete");
            Vec::new()
        }
    };

    sort_entries(&mut entries);

    info!(
        sources = urls.len(),
        entries = entries.len(),
        failed = failures.len(),
        "Aggregation complete"
    );

    Aggregation { entries, failures }
}

async fn fetch_task(
    fetcher: Arc<dyn FeedFetcher>,
    url: String,
    tx: mpsc::Sender<Entry>,
) -> Option<SourceFailure> {
    match fetch_source(fetcher.as_ref(), &url).await {
        Ok(entries) => {
            for entry in entries {
                // The receiver lives until the queue is closed.
                if tx.send(entry).await.is_err() {
                    break;
                }
            }
            None
        }
        Err(e) => Some(SourceFailure {
            url,
            error: e.to_string(),
        }),
    }
}

/// Stable sort by source key, then title.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        a.source_key
            .cmp(&b.source_key)
            .then_with(|| a.title.cmp(&b.title))
    });
}
