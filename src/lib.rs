//! Concurrent RSS/Atom feed verification with clean title extraction.
//!
//! `feedcheck` takes a set of candidate URLs, determines which ones serve
//! valid syndication feeds, and extracts a bounded number of normalized,
//! human-readable entry titles from each. It is an outbound-only client
//! library: no server, no storage, no CLI. Callers hand in URLs and
//! configuration and get back a result mapping, run statistics, and
//! advisory audit findings.
//!
//! # Architecture
//!
//! - [`util`] - the pure five-stage title normalization pipeline
//! - [`feed`] - per-URL probing and the bounded-concurrency scheduler
//! - [`audit`] - post-hoc sanity findings over the result mapping
//! - [`config`] - run configuration with optional TOML loading
//!
//! Per-URL failure is data, never an error: a probe that times out, hits a
//! dead host, or finds an HTML page instead of a feed resolves to an
//! `Invalid` outcome for that URL alone. The only fatal error in the crate
//! is a degenerate configuration, rejected before any work is dispatched.
//!
//! Logging goes through [`tracing`]; the library emits events and leaves
//! subscriber installation to the caller.
//!
//! # Example
//!
//! ```no_run
//! use feedcheck::{audit, verify_all, VerifierConfig};
//! use std::collections::HashSet;
//!
//! # async fn run() -> Result<(), feedcheck::ConfigError> {
//! let urls: HashSet<String> = [
//!     "https://blog.rust-lang.org/feed.xml".to_string(),
//!     "https://example.com/not-a-feed".to_string(),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = VerifierConfig::default();
//! let client = reqwest::Client::new();
//!
//! let (mapping, stats) = verify_all(client, urls, &config, None).await?;
//! println!("{} of {} URLs were valid feeds", stats.valid, stats.total);
//!
//! for finding in audit(&mapping, &config) {
//!     eprintln!("review: {finding}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod feed;
pub mod util;

pub use audit::{audit, Finding};
pub use config::{ConfigError, VerifierConfig};
pub use feed::{probe, verify_all, ProbeError, ProbeOutcome, ResultMapping, RunStats};
pub use util::clean_title;
