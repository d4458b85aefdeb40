//! Utility functions for title text cleanup.
//!
//! The centerpiece is [`clean_title`], the deterministic five-stage
//! pipeline that turns raw feed entry titles (possibly carrying embedded
//! markup, mojibake from a bad encoding round-trip, or emoji) into clean
//! display strings. The individual stages are exported as well; each is a
//! pure function usable on its own.
//!
//! # Examples
//!
//! ```
//! use feedcheck::util::clean_title;
//!
//! let title = clean_title("<em>Rust 1.80</em> released\u{2026} \u{1f389}");
//! assert_eq!(title, "Rust 1.80 released");
//! ```

mod text;

pub use text::{
    clean_title, collapse_whitespace, filter_noise, repair_mojibake, replace_artifacts,
    strip_markup,
};
