use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a single feed source.
///
/// These never abort a run: the pipeline logs them and the source
/// contributes no entries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, timeout)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Body could not be parsed as RSS, Atom or JSON Feed
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Other(String),
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("Failed to render items: {0}")]
    Render(#[from] askama::Error),
}
