//! # strdur
//!
//! A duration config value that reads back in canonical form whichever way it
//! was set:
//! - Command-line flags via `clap`
//! - YAML and TOML config files
//! - JSON text and raw JSON tokens
//! - Map-of-values decoding
//! - An 8-byte little-endian binary form

pub mod config;
pub mod constants;
pub mod errors;
pub mod settable;
pub mod string_duration;
pub mod utils;

pub use errors::{DurationError, ParseDurationError};
pub use settable::{Settable, SettableValueParser, flag_var};
pub use string_duration::StringDuration;
