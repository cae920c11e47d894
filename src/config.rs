use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Feed URLs, fetched concurrently on every run
    pub feeds: Vec<String>,
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Token in the template replaced by the rendered items
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Capacity of the entry queue shared by the fetch tasks
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_template_path() -> PathBuf {
    PathBuf::from("assets/template.html")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("result.html")
}

fn default_placeholder() -> String {
    "{{ITEMS}}".to_string()
}

fn default_queue_capacity() -> usize {
    100
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Build a config for the given feeds with every other field defaulted.
    pub fn with_feeds<I, S>(feeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feeds: feeds.into_iter().map(Into::into).collect(),
            template_path: default_template_path(),
            output_path: default_output_path(),
            placeholder: default_placeholder(),
            queue_capacity: default_queue_capacity(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        assert_eq!(default_template_path(), PathBuf::from("assets/template.html"));
        assert_eq!(default_output_path(), PathBuf::from("result.html"));
        assert_eq!(default_placeholder(), "{{ITEMS}}");
        assert_eq!(default_queue_capacity(), 100);
        assert_eq!(default_request_timeout_secs(), 30);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            feeds = [
                "https://feed.example.com/rss",
                "https://example.org/atom.xml",
            ]
            template_path = "site/template.html"
            output_path = "public/index.html"
            placeholder = "<!-- ITEMS -->"
            queue_capacity = 16
            request_timeout_secs = 5
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.feeds[0], "https://feed.example.com/rss");
        assert_eq!(config.feeds[1], "https://example.org/atom.xml");
        assert_eq!(config.template_path, PathBuf::from("site/template.html"));
        assert_eq!(config.output_path, PathBuf::from("public/index.html"));
        assert_eq!(config.placeholder, "<!-- ITEMS -->");
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_load_config_with_defaults() {
        let content = r#"feeds = ["https://example.com/feed.xml"]"#;

        let config = Config::from_str(content).unwrap();

        assert_eq!(config.feeds.len(), 1);
        assert_eq!(config.template_path, default_template_path());
        assert_eq!(config.output_path, default_output_path());
        assert_eq!(config.placeholder, "{{ITEMS}}");
        assert_eq!(config.queue_capacity, 100);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/feeds.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_missing_feeds() {
        let result = Config::from_str(r#"output_path = "out.html""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_feeds_list() {
        let config = Config::from_str("feeds = []").unwrap();
        assert!(config.feeds.is_empty());
    }

    #[test]
    fn test_with_feeds_applies_defaults() {
        let config = Config::with_feeds(["https://a.example.com/rss", "https://b.example.com/rss"]);

        assert_eq!(config.feeds.len(), 2);
        assert_eq!(config.placeholder, "{{ITEMS}}");
        assert_eq!(config.output_path, default_output_path());
    }
}
