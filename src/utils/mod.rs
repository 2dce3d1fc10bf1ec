//! Utility functions shared by the index and the CLI.
//!
//! - [`trigram`] - 3-byte sequence extraction
//! - [`config`] - Config file discovery and loading
//! - [`progress`] - Progress bars (no-op without the `progress` feature)
//!
//! ```
//! use trindex::utils::{extract_trigrams, format_trigram};
//!
//! let trigrams = extract_trigrams(b"hello");
//! let shown: Vec<String> = trigrams.into_iter().map(format_trigram).collect();
//! assert_eq!(shown, ["hel", "ell", "llo"]);
//! ```

pub mod config;
pub mod progress;
pub mod trigram;

pub use config::*;
pub use trigram::*;
