//! Common utilities shared across the `finder` crates.
//!
//! For now this is only the observability bootstrap; every binary and test
//! harness goes through [`observability::init_logging`] so events land in the
//! same rolling file sink.
//!
//! ```rust
//! use finder_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     app_name: "finder-docs",
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.default_filter, "info");
//! ```

pub mod observability;
