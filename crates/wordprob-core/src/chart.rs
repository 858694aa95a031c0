//! Bar chart model and the sinks that present it.
//!
//! Building a chart is pure: [`render_bar_chart`] validates its inputs,
//! assembles a [`ProbabilityChart`], and hands it to a [`ChartSink`]. Sinks
//! decide what "presenting" means. The CLI ships an interactive terminal
//! viewer; tests use [`RecordingSink`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ReportError, ReportResult};

/// Y-axis label used for every probability chart.
pub const Y_AXIS_LABEL: &str = "word probability";

/// An sRGB bar color, written as `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BarColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl BarColor {
    /// Dark grey, `#444`.
    pub const DEFAULT: Self = Self {
        r: 0x44,
        g: 0x44,
        b: 0x44,
    };
}

impl Default for BarColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for BarColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        // from_str_radix alone would accept a leading `+`
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 0x11);
                Ok(Self {
                    r: expand(0)?,
                    g: expand(1)?,
                    b: expand(2)?,
                })
            }
            6 => Ok(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for BarColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BarColor> for String {
    fn from(color: BarColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for BarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One bar: an ordinal position, its tick label, and its height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    /// Zero-based x position.
    pub position: usize,
    /// Tick label under the bar.
    pub label: String,
    /// Bar height.
    pub value: f64,
}

/// A labeled bar chart of word probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityChart {
    /// Y-axis label.
    pub y_label: String,
    /// Bars in x order.
    pub bars: Vec<Bar>,
    /// Fill color for every bar.
    pub color: BarColor,
}

impl ProbabilityChart {
    /// Pair labels with values, one bar per index.
    pub fn new<S: AsRef<str>>(labels: &[S], values: &[f64]) -> ReportResult<Self> {
        if labels.len() != values.len() {
            return Err(ReportError::LengthMismatch {
                words: labels.len(),
                values: values.len(),
            });
        }

        let bars = labels
            .iter()
            .zip(values)
            .enumerate()
            .map(|(position, (label, &value))| Bar {
                position,
                label: label.as_ref().to_string(),
                value,
            })
            .collect();

        Ok(Self {
            y_label: Y_AXIS_LABEL.to_string(),
            bars,
            color: BarColor::DEFAULT,
        })
    }

    /// Use `color` for the bars.
    #[must_use]
    pub const fn with_color(mut self, color: BarColor) -> Self {
        self.color = color;
        self
    }

    /// Tick labels in x order.
    pub fn labels(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.label.as_str()).collect()
    }

    /// Tallest bar, or `0.0` for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }
}

/// Something that can present a chart.
///
/// Implementations may block (an interactive viewer waits for the user) or
/// return immediately.
pub trait ChartSink {
    /// Present `chart`.
    fn render(&mut self, chart: &ProbabilityChart) -> ReportResult<()>;
}

/// Keeps every chart it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Charts received, oldest first.
    pub charts: Vec<ProbabilityChart>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, chart: &ProbabilityChart) -> ReportResult<()> {
        self.charts.push(chart.clone());
        Ok(())
    }
}

/// Discards charts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ChartSink for NullSink {
    fn render(&mut self, chart: &ProbabilityChart) -> ReportResult<()> {
        tracing::debug!(bars = chart.bars.len(), "chart discarded");
        Ok(())
    }
}

/// Build a chart from parallel label and value slices and present it.
///
/// Fails with [`ReportError::LengthMismatch`] before touching the sink when
/// the slices differ in length.
#[tracing::instrument(skip_all, fields(words = words.len(), values = probabilities.len()))]
pub fn render_bar_chart<S: AsRef<str>>(
    words: &[S],
    probabilities: &[f64],
    color: BarColor,
    sink: &mut dyn ChartSink,
) -> ReportResult<()> {
    let chart = ProbabilityChart::new(words, probabilities)?.with_color(color);
    sink.render(&chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::compute_probabilities;
    use crate::table::FrequencyTable;

    #[test]
    fn twenty_one_words_make_twenty_one_bars() {
        let table = FrequencyTable::builtin();
        let probs = compute_probabilities(table.entries(), table.stats().total_word_count).unwrap();
        let words = table.words();

        let mut sink = RecordingSink::default();
        render_bar_chart(&words, &probs, BarColor::DEFAULT, &mut sink).unwrap();

        assert_eq!(sink.charts.len(), 1);
        let chart = &sink.charts[0];
        assert_eq!(chart.bars.len(), 21);
        assert_eq!(chart.labels(), words);
        for (i, bar) in chart.bars.iter().enumerate() {
            assert_eq!(bar.position, i);
            assert_eq!(bar.value, probs[i]);
        }
        assert_eq!(chart.y_label, "word probability");
    }

    #[test]
    fn mismatched_lengths_never_reach_the_sink() {
        let table = FrequencyTable::builtin();
        let words = table.words();
        let probs = vec![0.01; 20];

        let mut sink = RecordingSink::default();
        let err = render_bar_chart(&words, &probs, BarColor::DEFAULT, &mut sink).unwrap_err();

        assert_eq!(
            err,
            ReportError::LengthMismatch {
                words: 21,
                values: 20
            }
        );
        assert!(sink.charts.is_empty());
    }

    #[test]
    fn empty_chart_has_zero_max() {
        let chart = ProbabilityChart::new::<&str>(&[], &[]).unwrap();
        assert!(chart.bars.is_empty());
        assert_eq!(chart.max_value(), 0.0);
    }

    #[test]
    fn null_sink_accepts_anything() {
        let chart = ProbabilityChart::new(&["a"], &[0.5]).unwrap();
        assert!(NullSink.render(&chart).is_ok());
    }

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!("#444".parse::<BarColor>().unwrap(), BarColor::DEFAULT);
        assert_eq!(
            "#1a2B3c".parse::<BarColor>().unwrap(),
            BarColor {
                r: 0x1a,
                g: 0x2b,
                b: 0x3c
            }
        );
    }

    #[test]
    fn rejects_bad_colors() {
        for bad in ["444", "#44", "#gggggg", "#12345", "", "#ééé", "#+1+2+3", "#+ab"] {
            assert!(bad.parse::<BarColor>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn color_displays_as_long_hex() {
        assert_eq!(BarColor::DEFAULT.to_string(), "#444444");
    }
}
