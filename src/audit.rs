//! Post-run sanity checks over the verification results.
//!
//! The auditor is a pure, read-only pass that flags statistically
//! suspicious entries for operator review. Findings are advisory: nothing
//! here mutates the mapping or fails the run. More involved checks (e.g.
//! comparing title similarity across feeds) can slot in later.

use crate::config::VerifierConfig;
use crate::feed::ResultMapping;
use serde::Serialize;
use std::fmt;

/// A single advisory finding about one URL's extracted titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Finding {
    /// URL present in the mapping with zero titles. The probe policy maps
    /// empty feeds to `Invalid`, so this should never occur; flagged in
    /// case it ever does.
    EmptyTitles { url: String },

    /// A title below the configured minimum length, likely a truncated or
    /// malformed extraction.
    ShortTitle { url: String, title: String },

    /// Fewer titles than expected from an otherwise-valid feed; worth a
    /// manual look at the URL for structure the extractor doesn't handle.
    SparseFeed { url: String, titles: Vec<String> },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::EmptyTitles { url } => write!(f, "no titles extracted from {url}"),
            Finding::ShortTitle { url, title } => {
                write!(f, "suspiciously short title {title:?} from {url}")
            }
            Finding::SparseFeed { url, titles } => {
                write!(f, "only {} title(s) extracted from {url}", titles.len())
            }
        }
    }
}

/// Runs the sanity checks over a result mapping.
///
/// Checks, per URL in mapping order:
///
/// 1. no titles at all (defensive, see [`Finding::EmptyTitles`]);
/// 2. titles shorter than `config.short_title_threshold` chars;
/// 3. fewer than `config.sparse_feed_threshold` titles recovered.
///
/// A URL with zero titles skips the sparse check; one finding for that
/// condition is enough.
///
/// Each finding is also emitted as a `tracing` warning for the operator.
/// Never fails and never touches the mapping.
pub fn audit(mapping: &ResultMapping, config: &VerifierConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (url, titles) in mapping {
        if titles.is_empty() {
            tracing::warn!(url = %url, "Empty titles found");
            findings.push(Finding::EmptyTitles { url: url.clone() });
            continue;
        }

        for title in titles {
            if title.chars().count() < config.short_title_threshold {
                tracing::warn!(url = %url, title = %title, "Title length issue");
                findings.push(Finding::ShortTitle {
                    url: url.clone(),
                    title: title.clone(),
                });
            }
        }

        if titles.len() < config.sparse_feed_threshold {
            tracing::warn!(
                url = %url,
                count = titles.len(),
                "Fewer titles than expected"
            );
            findings.push(Finding::SparseFeed {
                url: url.clone(),
                titles: titles.clone(),
            });
        }
    }

    tracing::debug!(findings = findings.len(), "Data sanity checks completed");
    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping_of(entries: &[(&str, &[&str])]) -> ResultMapping {
        entries
            .iter()
            .map(|(url, titles)| {
                (
                    url.to_string(),
                    titles.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    fn config() -> VerifierConfig {
        VerifierConfig::default()
    }

    #[test]
    fn test_healthy_mapping_yields_no_findings() {
        let mapping = mapping_of(&[(
            "https://example.com/feed",
            &[
                "A perfectly reasonable title",
                "Another solid headline here",
                "Third story of the day",
            ],
        )]);
        assert!(audit(&mapping, &config()).is_empty());
    }

    #[test]
    fn test_two_titles_is_sparse_three_is_not() {
        let mapping = mapping_of(&[(
            "https://sparse.example/feed",
            &["First long headline", "Second long headline"],
        )]);
        let findings = audit(&mapping, &config());
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Finding::SparseFeed { .. }));

        let mapping = mapping_of(&[(
            "https://ok.example/feed",
            &[
                "First long headline",
                "Second long headline",
                "Third long headline",
            ],
        )]);
        assert!(audit(&mapping, &config()).is_empty());
    }

    #[test]
    fn test_nine_chars_is_short_ten_is_not() {
        let mapping = mapping_of(&[(
            "https://example.com/feed",
            &["exactly 9", "exactly 10", "long enough title one", "long enough title two"],
        )]);
        let findings = audit(&mapping, &config());
        assert_eq!(
            findings,
            vec![Finding::ShortTitle {
                url: "https://example.com/feed".to_string(),
                title: "exactly 9".to_string(),
            }]
        );
    }

    #[test]
    fn test_short_title_counts_chars_not_bytes() {
        // Nine CJK chars: 27 bytes but still below the 10-char threshold.
        let mapping = mapping_of(&[(
            "https://example.com/feed",
            &[
                "\u{65e5}\u{672c}\u{8a9e}\u{65e5}\u{672c}\u{8a9e}\u{65e5}\u{672c}\u{8a9e}",
                "long enough title one",
                "long enough title two",
            ],
        )]);
        let findings = audit(&mapping, &config());
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Finding::ShortTitle { .. }));
    }

    #[test]
    fn test_empty_titles_flagged_and_skips_sparse_check() {
        let mapping = mapping_of(&[("https://broken.example/feed", &[])]);
        let findings = audit(&mapping, &config());
        assert_eq!(
            findings,
            vec![Finding::EmptyTitles {
                url: "https://broken.example/feed".to_string(),
            }]
        );
    }

    #[test]
    fn test_findings_follow_mapping_order() {
        let mapping = mapping_of(&[
            ("https://a.example/feed", &["tiny", "small too"]),
            ("https://b.example/feed", &[]),
        ]);
        let findings = audit(&mapping, &config());

        // URL a: two short titles, then the sparse finding; URL b: empty.
        assert_eq!(findings.len(), 4);
        assert!(matches!(findings[0], Finding::ShortTitle { .. }));
        assert!(matches!(findings[1], Finding::ShortTitle { .. }));
        assert!(matches!(findings[2], Finding::SparseFeed { .. }));
        assert!(matches!(findings[3], Finding::EmptyTitles { .. }));
    }

    #[test]
    fn test_custom_thresholds() {
        let config = VerifierConfig {
            short_title_threshold: 3,
            sparse_feed_threshold: 1,
            ..VerifierConfig::default()
        };
        let mapping = mapping_of(&[("https://example.com/feed", &["ok"])]);
        let findings = audit(&mapping, &config);
        assert_eq!(findings.len(), 1);
        assert!(matches!(findings[0], Finding::ShortTitle { .. }));
    }

    #[test]
    fn test_display_formats() {
        let finding = Finding::SparseFeed {
            url: "https://example.com/feed".to_string(),
            titles: vec!["one headline only".to_string()],
        };
        assert_eq!(
            finding.to_string(),
            "only 1 title(s) extracted from https://example.com/feed"
        );
    }

    #[test]
    fn test_audit_never_mutates_mapping() {
        let mapping = mapping_of(&[("https://example.com/feed", &["short"])]);
        let before = mapping.clone();
        let _ = audit(&mapping, &config());
        assert_eq!(mapping, before);
    }
}
