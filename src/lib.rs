//! # Datewalk
//!
//! Datewalk is a library for locating files whose names embed a calendar date.
//!
//! ## Features
//!
//! * Date extraction - Recognize `YYYY-MM-DD` and `YYYYMMDD` dates embedded
//!   anywhere in a file path, with real calendar validation
//! * Age filtering - Keep only files dated inside a configurable window
//!   relative to a reference date
//! * Concurrent traversal - Walk directory trees with many lightweight tasks
//!   while capping the number of simultaneously open directory listings

/// Fatal configuration errors and their process exit codes
pub mod error;
/// Date extraction from file path strings
pub mod extract;
/// Age-window filtering of extracted dates
pub mod filter;
/// Output line templating with `{date}` and `{path}` tokens
pub mod format;
/// Logging setup for stderr diagnostics
pub mod telemetry;
/// Concurrent directory traversal with bounded listing concurrency
pub mod walk;
