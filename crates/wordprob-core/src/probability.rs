//! Probability arithmetic over a frequency table.
//!
//! `probability = count / total_word_count`. The top-K aggregate is the sum
//! of the first K probabilities as listed, not the K largest.

use crate::error::{ReportError, ReportResult};
use crate::table::FrequencyEntry;

/// Convert counts to probabilities against the corpus total.
///
/// The output has the same length and order as `entries`.
#[tracing::instrument(skip(entries), fields(entries = entries.len()))]
pub fn compute_probabilities(
    entries: &[FrequencyEntry],
    total_word_count: u64,
) -> ReportResult<Vec<f64>> {
    if total_word_count == 0 {
        return Err(ReportError::InvalidTotal);
    }

    let total = total_word_count as f64;
    Ok(entries.iter().map(|e| e.count as f64 / total).collect())
}

/// Sum the first `k` probabilities in listed order.
///
/// `k == 0` yields exactly `0.0`.
#[tracing::instrument(skip(probabilities), fields(len = probabilities.len()))]
pub fn top_k_aggregate(probabilities: &[f64], k: usize) -> ReportResult<f64> {
    let head = probabilities.get(..k).ok_or(ReportError::OutOfRange {
        k,
        len: probabilities.len(),
    })?;
    // fold from +0.0: `Sum for f64` starts at -0.0 on newer toolchains
    Ok(head.iter().fold(0.0, |acc, p| acc + p))
}
