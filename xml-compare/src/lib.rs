//! Command-line front end for `xml-compare-core`.
//!
//! - [`config`]: TOML options file loading
//! - [`report`]: terminal-friendly colored output

pub mod config;
pub mod report;
