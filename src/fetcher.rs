use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;
use tracing::{error, info};

use crate::error::{DigestError, FetchError};
use crate::source;

/// One item of a parsed feed, before it is tagged with its source key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// A normalized feed item tagged with the key of the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub source_key: String,
    pub title: String,
    pub description: String,
    pub link: String,
}

impl Entry {
    pub fn new(source_key: &str, item: FeedItem) -> Self {
        Self {
            source_key: source_key.to_string(),
            title: item.title,
            description: item.description,
            link: item.link,
        }
    }
}

/// Retrieves a feed by URL and parses it into items.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FetchError>;
}

/// Fetches feeds over HTTP and parses them with feed-rs.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("NewsDigest/1.0 (Feed Aggregator)")
            .build()
            .map_err(DigestError::HttpClient)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        let bytes = response.bytes().await?;
        parse_feed(&bytes)
    }
}

/// Parse RSS, Atom or JSON Feed bytes into items.
///
/// Missing fields become empty strings. The description is the entry
/// summary, falling back to the content body.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>, FetchError> {
    let feed = parser::parse(bytes).map_err(|e| FetchError::Parse(e.to_string()))?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry.title.map(|t| t.content).unwrap_or_default();
            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let link = entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default();

            FeedItem {
                title,
                description,
                link,
            }
        })
        .collect();

    Ok(items)
}

/// Fetch one source and tag its items with the source key.
///
/// Failures are logged here together with the source URL; the caller only
/// needs to skip the source.
pub async fn fetch_source(fetcher: &dyn FeedFetcher, url: &str) -> Result<Vec<Entry>, FetchError> {
    let key = source::resolve(url);

    let items = match fetcher.fetch(url).await {
        Ok(items) => items,
        Err(e) => {
            error!(source = %url, error = %e, "Failed to fetch feed");
            return Err(e);
        }
    };

    info!(source = %url, key = %key, count = items.len(), "Fetched feed");
    Ok(items
        .into_iter()
        .map(|item| Entry::new(&key, item))
        .collect())
}
