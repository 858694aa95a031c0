//! Core library for wordprob.
//!
//! This crate provides the foundational types and functionality used by the
//! `wordprob` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`table`] - The built-in word frequency table
//! - [`probability`] - Probability and top-K arithmetic
//! - [`chart`] - Bar chart model and the [`ChartSink`] capability
//! - [`report`] - The [`ReportGenerator`] pipeline
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use wordprob_core::{RecordingSink, ReportGenerator};
//!
//! let mut sink = RecordingSink::default();
//! let mut out = Vec::new();
//! let report = ReportGenerator::default()
//!     .run(5, &mut out, &mut sink)
//!     .expect("built-in table is valid");
//!
//! assert!(String::from_utf8(out).unwrap().starts_with("top five: "));
//! assert_eq!(sink.charts[0].bars.len(), report.words.len());
//! ```
#![deny(unsafe_code)]

pub mod chart;
pub mod config;
pub mod error;
pub mod probability;
pub mod report;
pub mod table;

pub use chart::{BarColor, ChartSink, NullSink, ProbabilityChart, RecordingSink};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ReportError, ReportResult};
pub use report::{DEFAULT_TOP_K, Report, ReportGenerator};
pub use table::{CorpusStats, FrequencyEntry, FrequencyTable};
