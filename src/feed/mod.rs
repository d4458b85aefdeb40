//! Feed probing and concurrent verification.
//!
//! This module decides which candidate URLs actually serve syndication
//! feeds, and what their entries are called:
//!
//! - [`probe`] - fetch one URL, classify the response, extract normalized
//!   entry titles; total per-URL result, arbitrary failure tolerated
//! - [`verify_all`] - fan a whole URL set across a bounded worker pool and
//!   collect the per-URL outcomes into a result mapping with aggregate
//!   statistics
//!
//! # Example
//!
//! ```no_run
//! use feedcheck::{verify_all, VerifierConfig};
//! use std::collections::HashSet;
//!
//! # async fn run() -> Result<(), feedcheck::ConfigError> {
//! let urls: HashSet<String> =
//!     ["https://example.com/feed.xml".to_string()].into_iter().collect();
//!
//! let client = reqwest::Client::new();
//! let config = VerifierConfig::default();
//! let (mapping, stats) = verify_all(client, urls, &config, None).await?;
//!
//! println!("{}/{} valid", stats.valid, stats.total);
//! for (url, titles) in &mapping {
//!     println!("{url}: {titles:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod probe;
mod verifier;

pub use probe::{probe, ProbeError, ProbeOutcome};
pub use verifier::{verify_all, ResultMapping, RunStats};
