//! # webmap - Map the web services of a network
//!
//! webmap takes a list of hosts, IP addresses and CIDR ranges, probes each
//! one over HTTP and HTTPS on a catalog of common web ports, and produces a
//! sorted inventory of everything that answered.
//!
//! ## Features
//!
//! - **Bounded Concurrency**: A fixed pool of async workers drains a shared queue
//! - **Failure Isolation**: Dead hosts, TLS errors and timeouts are dropped silently
//! - **Page Titles**: `<title>`, `<h1>` or `<h2>`, shortened to fit a table
//! - **Redirect Awareness**: 301/302 targets replace the title instead of being followed
//! - **Multiple Output Formats**: ASCII table, CSV, and JSON with full headers
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use webmap::report::build_rows;
//! use webmap::scanner::{generate_work, run_map, HttpProber, MapJobConfig, ProbeConfig};
//! use webmap::types::PortCatalog;
//!
//! #[tokio::main]
//! async fn main() {
//!     let items = generate_work(&["example.com"], &PortCatalog::fast());
//!     let prober = HttpProber::new(ProbeConfig::new(Duration::from_secs(6))).unwrap();
//!
//!     let run = run_map(Arc::new(prober), items, MapJobConfig::default()).await;
//!     for row in build_rows(&run.results) {
//!         println!("{} {}", row.status, row.base_url);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Ports, work items and target expansion
//! - [`scanner`] - Work generation, the worker pool and the HTTP prober
//! - [`report`] - Sorting results into report rows
//! - [`output`] - Console, table, CSV and JSON rendering
//! - [`config`] - Settings file handling
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ProbeError};
pub use report::ReportRow;
pub use scanner::{ProbeResult, Prober, StatusClass};
pub use types::{Port, PortCatalog, Scheme, WorkItem};
