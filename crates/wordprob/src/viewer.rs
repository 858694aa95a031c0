//! Interactive terminal bar chart.
//!
//! Takes over the terminal (raw mode, alternate screen), draws the chart,
//! and blocks until the user presses `q`, `Esc` or `Enter`. The terminal is
//! restored on every exit path, including draw errors.
//!
//! Word labels are drawn in a tick area under the bars rather than by
//! ratatui, which cuts each label to the bar width. When the longest word is
//! wider than a bar, labels alternate over as many rows as needed to print
//! every word in full.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph},
};
use tracing::debug;
use wordprob_core::{BarColor, ChartSink, ProbabilityChart, ReportError, ReportResult};

/// Bar heights are stored as integers; probabilities are scaled to parts per million.
const VALUE_SCALE: f64 = 1_000_000.0;

const BAR_GAP: u16 = 1;

const HELP: &str = " q / Esc / Enter: close";

/// A [`ChartSink`] that shows the chart full-screen in the terminal.
#[derive(Debug, Default)]
pub struct TerminalViewer;

impl ChartSink for TerminalViewer {
    fn render(&mut self, chart: &ProbabilityChart) -> ReportResult<()> {
        if !io::stdout().is_terminal() {
            return Err(ReportError::Render(
                "stdout is not a terminal (use --no-chart)".to_string(),
            ));
        }
        debug!(bars = chart.bars.len(), "opening chart viewer");
        show(chart).map_err(|e| ReportError::Render(e.to_string()))
    }
}

/// Leaves raw mode and the alternate screen when dropped.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, Show);
    }
}

fn show(chart: &ProbabilityChart) -> io::Result<()> {
    let _guard = ScreenGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut terminal, chart)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    chart: &ProbabilityChart,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, chart))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(
                key.code,
                KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter
            )
        {
            return Ok(());
        }
    }
}

fn draw(f: &mut Frame, chart: &ProbabilityChart) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(f.area());

    let block = Block::bordered().title(chart.y_label.as_str());
    let inner = block.inner(body);
    f.render_widget(block, body);

    let width = bar_width(chart.bars.len(), body.width);
    let ticks = tick_lines(&chart.labels(), width);
    let tick_height = u16::try_from(ticks.len()).unwrap_or(u16::MAX);
    let [plot, tick_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(tick_height)]).areas(inner);

    f.render_widget(chart_widget(chart, width), plot);
    f.render_widget(
        Paragraph::new(ticks.into_iter().map(Line::from).collect::<Vec<_>>()),
        tick_area,
    );
    f.render_widget(Paragraph::new(HELP).style(Style::new().dim()), footer);
}

const fn to_color(color: BarColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn scaled(value: f64) -> u64 {
    (value * VALUE_SCALE).round() as u64
}

/// One ratatui bar per chart bar. Labels are left to [`tick_lines`].
fn bars(chart: &ProbabilityChart) -> Vec<Bar<'_>> {
    chart
        .bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(scaled(bar.value))
                .text_value(format!("{:.2}%", bar.value * 100.0))
        })
        .collect()
}

/// Rows needed so that no label is cut or runs into its neighbor.
///
/// A label no wider than its bar fits on a single row. Otherwise labels
/// alternate over `n` rows, giving each one `n` bar slots minus a space.
fn tick_rows(longest: usize, bar_width: u16) -> usize {
    let width = usize::from(bar_width);
    if longest <= width {
        1
    } else {
        (longest + 1).div_ceil(width + usize::from(BAR_GAP))
    }
}

/// Tick label rows, each word starting under its own bar.
fn tick_lines(labels: &[&str], bar_width: u16) -> Vec<String> {
    let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = tick_rows(longest, bar_width);
    let step = usize::from(bar_width) + usize::from(BAR_GAP);

    let mut lines = vec![String::new(); rows];
    let mut columns = vec![0_usize; rows];
    for (i, label) in labels.iter().enumerate() {
        let row = i % rows;
        let len = label.chars().count();
        // centered when it fits under the bar
        let offset = i * step + usize::from(bar_width).saturating_sub(len) / 2;
        let pad = offset.saturating_sub(columns[row]);
        lines[row].push_str(&" ".repeat(pad));
        lines[row].push_str(label);
        columns[row] += pad + len;
    }
    lines
}

/// Widest bars that fit `width` columns inside the border.
fn bar_width(bar_count: usize, width: u16) -> u16 {
    let count = u16::try_from(bar_count.max(1)).unwrap_or(u16::MAX);
    let inner = width.saturating_sub(2);
    let gaps = BAR_GAP.saturating_mul(count - 1);
    (inner.saturating_sub(gaps) / count).max(1)
}

fn chart_widget(chart: &ProbabilityChart, width: u16) -> BarChart<'_> {
    let color = to_color(chart.color);
    let bars = bars(chart);

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .bar_style(Style::new().fg(color))
        .value_style(Style::new().fg(Color::White).bg(color))
        .max(scaled(chart.max_value()).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use wordprob_core::ReportGenerator;

    fn builtin_chart() -> ProbabilityChart {
        let generator = ReportGenerator::default();
        let report = generator.generate(5).unwrap();
        let words: Vec<&str> = report.words.iter().map(|w| w.word.as_str()).collect();
        ProbabilityChart::new(&words, &report.probabilities()).unwrap()
    }

    /// Rendered rows with the side borders stripped.
    fn rendered_rows(width: u16, height: u16) -> Vec<String> {
        let chart = builtin_chart();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, &chart)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(usize::from(width))
            .map(|row| {
                row[1..row.len() - 1]
                    .iter()
                    .map(|cell| cell.symbol())
                    .collect()
            })
            .collect()
    }

    /// Words read back from the tick rows, in bar order.
    fn rendered_tick_words(width: u16, height: u16) -> Vec<String> {
        let rows = rendered_rows(width, height);
        let tick_count = tick_rows(4, bar_width(21, width));
        // last row is the help line, the one above it the bottom border
        let bottom = usize::from(height) - 2;
        let per_row: Vec<Vec<&str>> = rows[bottom - tick_count..bottom]
            .iter()
            .map(|row| row.split_whitespace().collect())
            .collect();

        (0..21)
            .map(|i| per_row[i % tick_count][i / tick_count].to_string())
            .collect()
    }

    fn rendered_text(width: u16, height: u16) -> String {
        let chart = builtin_chart();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, &chart)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn one_bar_per_word() {
        let chart = builtin_chart();
        assert_eq!(bars(&chart).len(), 21);
        assert_eq!(chart.labels().len(), 21);
    }

    #[test]
    fn scales_to_parts_per_million() {
        assert_eq!(scaled(0.0), 0);
        assert_eq!(scaled(0.5), 500_000);
        assert_eq!(scaled(1.0), 1_000_000);
    }

    #[test]
    fn bar_width_fills_available_space() {
        // 118 inner columns, 20 gaps
        assert_eq!(bar_width(21, 120), 4);
        assert_eq!(bar_width(21, 10), 1);
        assert_eq!(bar_width(0, 80), 78);
    }

    #[test]
    fn draws_axis_title_and_help() {
        let text = rendered_text(120, 30);
        assert!(text.contains("word probability"));
        assert!(text.contains("q / Esc / Enter: close"));
    }

    #[test]
    fn every_word_labeled_at_80_columns() {
        assert_eq!(bar_width(21, 80), 2);
        let expected = builtin_chart().labels().join(" ");
        assert_eq!(rendered_tick_words(80, 24).join(" "), expected);
    }

    #[test]
    fn every_word_labeled_at_120_columns() {
        assert_eq!(tick_rows(4, bar_width(21, 120)), 1);
        let expected = builtin_chart().labels().join(" ");
        assert_eq!(rendered_tick_words(120, 30).join(" "), expected);
    }

    #[test]
    fn tick_rows_grow_as_bars_narrow() {
        assert_eq!(tick_rows(4, 4), 1);
        assert_eq!(tick_rows(4, 2), 2);
        assert_eq!(tick_rows(4, 1), 3);
        assert_eq!(tick_rows(0, 1), 1);
    }

    #[test]
    fn tick_labels_start_under_their_bars() {
        let lines = tick_lines(&["that", "of", "with"], 2);
        assert_eq!(lines, vec!["that  with".to_string(), "   of".to_string()]);

        let lines = tick_lines(&["a", "the"], 4);
        assert_eq!(lines, vec![" a   the".to_string()]);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let _ = rendered_text(5, 3);
    }

    #[test]
    fn maps_bar_color() {
        assert_eq!(to_color(BarColor::DEFAULT), Color::Rgb(0x44, 0x44, 0x44));
    }
}
