use crate::config::{ConfigError, VerifierConfig};
use crate::feed::probe::{probe, ProbeOutcome};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// URL to ordered clean titles, for URLs whose probe came back `Valid`.
///
/// Invalid URLs are simply absent; callers distinguish "no usable feed"
/// by key absence. A `BTreeMap` keeps audit order and serialized output
/// deterministic.
pub type ResultMapping = BTreeMap<String, Vec<String>>;

/// Aggregate counts for one verification run. Computed once, read-only
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Number of candidate URLs dispatched.
    pub total: usize,
    /// Number of URLs that resolved to a valid feed.
    pub valid: usize,
}

impl RunStats {
    /// Share of valid URLs as a percentage. An empty run is 0%, not a
    /// division fault.
    pub fn valid_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.valid as f64 / self.total as f64 * 100.0
    }
}

/// Verifies every candidate URL concurrently and collects the results.
///
/// Fans one probe task per URL across a fixed-size pool, bounding outbound
/// connection concurrency regardless of input size; excess tasks queue
/// until a worker frees up. Probes are fully independent: a slow or
/// failing URL affects only its own outcome.
///
/// # Arguments
///
/// * `client` - HTTP client shared by all probes
/// * `urls` - deduplicated candidate URLs (set semantics, order
///   irrelevant)
/// * `config` - pool size, per-probe timeout, title cap
/// * `progress_tx` - optional channel for progress updates as
///   `(completed, total)` tuples
///
/// # Returns
///
/// The result mapping (valid URLs only) and the run statistics. The
/// future resolves only after every dispatched probe has: there is no
/// early termination and no partial result surface.
///
/// # Errors
///
/// Only configuration validation can fail, and it fails before any task
/// is dispatched. Per-URL failures are data (`Invalid` outcomes), not
/// errors.
pub async fn verify_all(
    client: reqwest::Client,
    urls: HashSet<String>,
    config: &VerifierConfig,
    progress_tx: Option<mpsc::Sender<(usize, usize)>>,
) -> Result<(ResultMapping, RunStats), ConfigError> {
    config.validate()?;

    if urls.is_empty() {
        if let Some(tx) = &progress_tx {
            let _ = tx.send((0, 0)).await;
        }
        return Ok((ResultMapping::new(), RunStats { total: 0, valid: 0 }));
    }

    let total = urls.len();
    let timeout = config.probe_timeout();
    let max_titles = config.max_titles;
    let completed = Arc::new(AtomicUsize::new(0));

    let outcomes: Vec<(String, ProbeOutcome)> = stream::iter(urls.into_iter())
        .map(|url| {
            let client = client.clone();
            let progress_tx = progress_tx.clone();
            let completed = Arc::clone(&completed);

            async move {
                let outcome = probe(&client, &url, timeout, max_titles).await;

                let done = completed.fetch_add(1, Ordering::Relaxed).saturating_add(1);
                if let Some(tx) = &progress_tx {
                    if let Err(e) = tx.send((done, total)).await {
                        tracing::warn!(
                            error = %e,
                            done = done,
                            total = total,
                            "Progress channel send failed (receiver dropped)"
                        );
                    }
                }

                (url, outcome)
            }
        })
        .buffer_unordered(config.worker_count)
        .collect()
        .await;

    // Merge on the calling task: a single owner of the mapping, with keys
    // unique per probe, so there is never more than one writer per key.
    let mut mapping = ResultMapping::new();
    for (url, outcome) in outcomes {
        if let ProbeOutcome::Valid { titles } = outcome {
            tracing::info!(url = %url, titles = titles.len(), "Valid feed");
            mapping.insert(url, titles);
        } else {
            tracing::debug!(url = %url, "Invalid feed");
        }
    }

    let stats = RunStats {
        total,
        valid: mapping.len(),
    };
    tracing::info!(
        total = stats.total,
        valid = stats.valid,
        valid_percentage = stats.valid_percentage(),
        "Verification run complete"
    );

    Ok((mapping, stats))
}
