//! The word probability report.
//!
//! [`ReportGenerator`] owns a [`FrequencyTable`] and turns it into a
//! [`Report`]: per-word probabilities plus the aggregate probability of the
//! first K listed words. [`ReportGenerator::run`] is the whole pipeline:
//! compute, print one summary line, then hand the chart to a sink.

use std::io::Write;

use serde::Serialize;

use crate::chart::{BarColor, ChartSink, render_bar_chart};
use crate::error::{ReportError, ReportResult};
use crate::probability::{compute_probabilities, top_k_aggregate};
use crate::table::FrequencyTable;

/// Number of leading entries summed when nothing else is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// One row of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordProbability {
    /// The word.
    pub word: String,
    /// Corpus occurrences.
    pub count: u64,
    /// `count / total_word_count`.
    pub probability: f64,
}

/// Result of evaluating a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Rows in table order.
    pub words: Vec<WordProbability>,
    /// How many leading rows were summed.
    pub top_k: usize,
    /// Sum of the first `top_k` probabilities.
    pub top_k_probability: f64,
    /// Corpus size the probabilities are measured against.
    pub total_word_count: u64,
    /// Unique words in the corpus.
    pub distinct_word_count: u64,
}

impl Report {
    /// Probabilities in table order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.words.iter().map(|w| w.probability).collect()
    }

    /// The one-line summary, e.g. `top five: 0.17382823219615665`.
    pub fn summary_line(&self) -> String {
        format!(
            "top {}: {}",
            count_label(self.top_k),
            self.top_k_probability
        )
    }
}

/// English word for small counts, digits otherwise.
fn count_label(n: usize) -> String {
    const WORDS: [&str; 11] = [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    WORDS
        .get(n)
        .map_or_else(|| n.to_string(), |w| (*w).to_string())
}

/// Builds reports and charts from a single frequency table.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    table: FrequencyTable,
    color: BarColor,
}

impl ReportGenerator {
    /// Create a generator over `table`.
    pub const fn new(table: FrequencyTable) -> Self {
        Self {
            table,
            color: BarColor::DEFAULT,
        }
    }

    /// Use `color` for chart bars.
    #[must_use]
    pub const fn with_color(mut self, color: BarColor) -> Self {
        self.color = color;
        self
    }

    /// The table this generator reads.
    pub const fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Probabilities for every entry, in table order.
    pub fn probabilities(&self) -> ReportResult<Vec<f64>> {
        compute_probabilities(self.table.entries(), self.table.stats().total_word_count)
    }

    /// Evaluate the table, summing the first `top_k` probabilities.
    #[tracing::instrument(skip(self), fields(entries = self.table.len()))]
    pub fn generate(&self, top_k: usize) -> ReportResult<Report> {
        let probabilities = self.probabilities()?;
        let top_k_probability = top_k_aggregate(&probabilities, top_k)?;
        let stats = self.table.stats();

        let words = self
            .table
            .entries()
            .iter()
            .zip(probabilities)
            .map(|(entry, probability)| WordProbability {
                word: entry.word.clone(),
                count: entry.count,
                probability,
            })
            .collect();

        tracing::debug!(top_k, top_k_probability, "report generated");
        Ok(Report {
            words,
            top_k,
            top_k_probability,
            total_word_count: stats.total_word_count,
            distinct_word_count: stats.distinct_word_count,
        })
    }

    /// Present `report` as a bar chart through `sink`.
    pub fn render(&self, report: &Report, sink: &mut dyn ChartSink) -> ReportResult<()> {
        let words: Vec<&str> = report.words.iter().map(|w| w.word.as_str()).collect();
        render_bar_chart(&words, &report.probabilities(), self.color, sink)
    }

    /// Generate, write the summary line to `out`, then render the chart.
    ///
    /// Nothing is written when generation fails, and nothing is drawn when
    /// the write fails.
    #[tracing::instrument(skip(self, out, sink))]
    pub fn run<W: Write>(
        &self,
        top_k: usize,
        out: &mut W,
        sink: &mut dyn ChartSink,
    ) -> ReportResult<Report> {
        let report = self.generate(top_k)?;
        writeln!(out, "{}", report.summary_line())
            .and_then(|()| out.flush())
            .map_err(|e| ReportError::Output(e.to_string()))?;
        self.render(&report, sink)?;
        Ok(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(FrequencyTable::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RecordingSink;
    use crate::table::{CorpusStats, FrequencyEntry};

    #[test]
    fn builtin_summary_line() {
        let report = ReportGenerator::default().generate(DEFAULT_TOP_K).unwrap();
        let line = report.summary_line();
        assert!(line.starts_with("top five: 0.173828"), "{line}");
        assert_eq!(line, format!("top five: {}", report.top_k_probability));
    }

    #[test]
    fn report_carries_corpus_stats() {
        let report = ReportGenerator::default().generate(5).unwrap();
        assert_eq!(report.words.len(), 21);
        assert_eq!(report.total_word_count, 123_113_235);
        assert_eq!(report.distinct_word_count, 1_570_894);
        assert_eq!(report.words[0].word, "the");
        assert_eq!(report.words[0].count, 7_723_657);
    }

    #[test]
    fn count_labels() {
        assert_eq!(count_label(0), "zero");
        assert_eq!(count_label(3), "three");
        assert_eq!(count_label(10), "ten");
        assert_eq!(count_label(12), "12");
    }

    #[test]
    fn run_prints_then_renders() {
        let mut out = Vec::new();
        let mut sink = RecordingSink::default();
        let report = ReportGenerator::default()
            .run(5, &mut out, &mut sink)
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, format!("{}\n", report.summary_line()));
        assert_eq!(printed.lines().count(), 1);
        assert_eq!(sink.charts.len(), 1);
        assert_eq!(sink.charts[0].bars.len(), 21);
    }

    #[test]
    fn run_uses_configured_color() {
        let color: BarColor = "#ff0000".parse().unwrap();
        let mut sink = RecordingSink::default();
        ReportGenerator::default()
            .with_color(color)
            .run(5, &mut Vec::new(), &mut sink)
            .unwrap();
        assert_eq!(sink.charts[0].color, color);
    }

    #[test]
    fn out_of_range_prints_nothing_and_draws_nothing() {
        let mut out = Vec::new();
        let mut sink = RecordingSink::default();
        let err = ReportGenerator::default()
            .run(22, &mut out, &mut sink)
            .unwrap_err();

        assert_eq!(err, ReportError::OutOfRange { k: 22, len: 21 });
        assert!(out.is_empty());
        assert!(sink.charts.is_empty());
    }

    #[test]
    fn zero_total_prints_nothing() {
        let table = FrequencyTable::new(
            vec![FrequencyEntry::new(3, "a")],
            CorpusStats {
                total_word_count: 0,
                distinct_word_count: 0,
            },
        );
        let mut out = Vec::new();
        let mut sink = RecordingSink::default();
        let err = ReportGenerator::new(table)
            .run(1, &mut out, &mut sink)
            .unwrap_err();

        assert_eq!(err, ReportError::InvalidTotal);
        assert!(out.is_empty());
        assert!(sink.charts.is_empty());
    }

    #[test]
    fn report_serializes_to_json() {
        let report = ReportGenerator::default().generate(5).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top_k"], 5);
        assert_eq!(json["words"].as_array().unwrap().len(), 21);
        assert_eq!(json["words"][0]["word"], "the");
    }
}
