use url::Url;

/// Key used when a source identifier is not a parseable URL with a host.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Derive the grouping key for a feed URL.
///
/// The key is the second dot-separated label of the host counted from the
/// left, so `feed.example.com` maps to `example`. A bare two-label host has
/// no subdomain to skip and maps to its first label (`example.com` ->
/// `example`). Single-label hosts are returned whole.
///
/// This is a heuristic, not a public-suffix lookup. Hosts under a
/// country-code second-level domain come out wrong: `bbc.co.uk` resolves to
/// `co`. Deeper hosts such as `a.b.example.com` resolve to `b`.
pub fn resolve(identifier: &str) -> String {
    let host = match Url::parse(identifier) {
        Ok(url) => match url.host_str() {
            Some(host) => host.to_string(),
            None => return UNKNOWN_SOURCE.to_string(),
        },
        Err(_) => return UNKNOWN_SOURCE.to_string(),
    };

    let labels: Vec<&str> = host.split('.').collect();
    match labels.len() {
        0 | 1 => host,
        2 => labels[0].to_string(),
        _ => labels[1].to_string(),
    }
}
