//! Report command: top-K probability line and word probability chart.

use std::io;

use anyhow::Context;
use clap::Args;
use tracing::{debug, instrument};

use wordprob_core::{ChartSink, Config, NullSink, ReportGenerator};

use crate::viewer::TerminalViewer;

/// Arguments for the `report` subcommand.
#[derive(Args, Debug, Default)]
pub struct ReportArgs {
    /// Number of leading words to add up [default: 5, or `top_k` from config]
    #[arg(long, value_name = "K")]
    pub top: Option<usize>,

    /// Print the summary without opening the chart viewer
    #[arg(long)]
    pub no_chart: bool,
}

/// Print the top-K probability line, then show the chart.
///
/// With `--json` the full report is printed instead and the chart is skipped,
/// since the viewer would take over the same stdout the JSON is written to.
#[instrument(name = "cmd_report", skip_all, fields(top = ?args.top, no_chart = args.no_chart))]
pub fn cmd_report(args: ReportArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let top_k = args.top.unwrap_or_else(|| config.top_k());
    debug!(top_k, json = global_json, "executing report command");

    let generator = ReportGenerator::default().with_color(config.bar_color());

    if global_json {
        let report = generator
            .generate(top_k)
            .context("failed to compute word probabilities")?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut sink: Box<dyn ChartSink> = if args.no_chart {
        Box::new(NullSink)
    } else {
        Box::new(TerminalViewer)
    };

    generator
        .run(top_k, &mut io::stdout(), sink.as_mut())
        .context("failed to produce word probability report")?;

    Ok(())
}
