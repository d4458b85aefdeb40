use crate::util::clean_title;
use anyhow::Result;
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Response bodies larger than this are rejected outright; no real feed
/// comes close, and it keeps a hostile server from exhausting memory.
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while probing one candidate URL.
///
/// These never escape the probe boundary: every variant collapses into
/// [`ProbeOutcome::Invalid`], surviving only as a debug trace. The
/// taxonomy exists so the trace says *why* a URL was rejected.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The fetch-and-parse sequence exceeded the probe timeout
    #[error("request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Declared content type carries no XML or RSS marker
    #[error("not a feed: content type {0:?}")]
    NotFeed(String),
    /// Response body exceeded the 10MB size limit
    #[error("response too large")]
    ResponseTooLarge,
    /// Body could not be parsed as RSS or Atom
    #[error("parse error: {0}")]
    Parse(String),
    /// Syntactically a feed, but no entry had a usable title
    #[error("feed has no usable titles")]
    EmptyFeed,
}

/// Terminal classification of a single probe.
///
/// Exactly one outcome exists per URL, produced by exactly one worker, and
/// never mutated after publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The URL serves a feed with at least one usable entry title. Titles
    /// are normalized, in document order, at most `max_titles` of them.
    Valid { titles: Vec<String> },
    /// Not a feed, unreachable, timed out, or semantically empty.
    Invalid,
}

impl ProbeOutcome {
    /// True for [`ProbeOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, ProbeOutcome::Valid { .. })
    }
}

/// Probes one candidate URL: fetch, classify, parse, normalize titles.
///
/// The whole sequence runs under `timeout`; a slow or unresponsive server
/// costs at most that long. Total: any failure (network, HTTP status,
/// content type, parse, empty feed) maps to [`ProbeOutcome::Invalid`]
/// rather than an error, so one bad URL can never abort a run.
///
/// # Arguments
///
/// * `client` - HTTP client (caller controls configuration, reused across
///   probes)
/// * `url` - the candidate URL
/// * `timeout` - wall-clock bound for the entire probe
/// * `max_titles` - cap on extracted titles; entries without a usable
///   title are skipped and do not count
///
/// No side effects beyond the network call.
pub async fn probe(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    max_titles: usize,
) -> ProbeOutcome {
    let result = match tokio::time::timeout(timeout, fetch_titles(client, url, max_titles)).await
    {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout),
    };

    match result {
        Ok(titles) => {
            tracing::debug!(url = %url, count = titles.len(), "Valid feed");
            ProbeOutcome::Valid { titles }
        }
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "Probe rejected URL");
            ProbeOutcome::Invalid
        }
    }
}

/// Fetches a URL and extracts normalized titles, or says why it can't.
async fn fetch_titles(
    client: &reqwest::Client,
    url: &str,
    max_titles: usize,
) -> Result<Vec<String>, ProbeError> {
    let response = client.get(url).send().await.map_err(ProbeError::Network)?;

    if !response.status().is_success() {
        return Err(ProbeError::HttpStatus(response.status().as_u16()));
    }

    // Cheap heuristic filter before the structural parse: a feed should
    // declare an XML-ish content type.
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !content_type.contains("xml") && !content_type.contains("rss") {
        return Err(ProbeError::NotFeed(content_type));
    }

    let bytes = read_limited_bytes(response, MAX_FEED_SIZE).await?;

    let titles = extract_titles(&bytes, max_titles)
        .map_err(|e| ProbeError::Parse(e.to_string()))?;

    // "Syntactically a feed but semantically empty" is treated the same as
    // "not a feed": downstream consumers care about usable content.
    if titles.is_empty() {
        return Err(ProbeError::EmptyFeed);
    }

    Ok(titles)
}

/// Parses feed bytes and extracts up to `max_titles` normalized entry
/// titles in document order. Entries with an absent or empty raw title are
/// skipped without counting toward the limit.
fn extract_titles(bytes: &[u8], max_titles: usize) -> Result<Vec<String>> {
    let feed = feed_rs::parser::parse(bytes)?;

    let titles: Vec<String> = feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .filter(|raw| !raw.is_empty())
        .take(max_titles)
        .map(|raw| clean_title(&raw))
        .collect();

    Ok(titles)
}

/// Reads a response body with a size cap using stream-based reading.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ProbeError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ProbeError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ProbeError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ProbeError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
