//! Error types for wordprob-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A color value is not a `#rgb` or `#rrggbb` hex string.
    #[error("invalid color {value:?}: expected #rgb or #rrggbb")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while building or presenting a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Probabilities are undefined for an empty corpus.
    #[error("invalid total word count: must be greater than zero")]
    InvalidTotal,

    /// Labels and values do not line up one-to-one.
    #[error("length mismatch: {words} words but {values} values")]
    LengthMismatch {
        /// Number of word labels supplied.
        words: usize,
        /// Number of values supplied.
        values: usize,
    },

    /// The requested aggregate reaches past the end of the table.
    #[error("top-{k} requested but only {len} entries are available")]
    OutOfRange {
        /// Requested number of leading entries.
        k: usize,
        /// Number of entries available.
        len: usize,
    },

    /// The summary line could not be written.
    #[error("failed to write report: {0}")]
    Output(String),

    /// A chart sink failed to present the chart.
    #[error("chart rendering failed: {0}")]
    Render(String),
}

/// Result type alias using [`ReportError`].
pub type ReportResult<T> = Result<T, ReportError>;
