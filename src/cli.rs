//! CLI definition and pipeline orchestration.

use clap::Parser;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_candle_adapter::JsonCandleAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::raw_result_adapter::load_raw_result;
use crate::domain::equity::DEFAULT_STARTING_BALANCE;
use crate::domain::error::NormalizerError;
use crate::domain::extract::RawParts;
use crate::domain::report::{Report, ReportRequest, DEFAULT_CHART_PAIR};
use crate::ports::candle_port::CandlePort;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

const CONFIG_SECTION: &str = "normalizer";

#[derive(Parser, Debug)]
#[command(
    name = "backtest-normalizer",
    about = "Normalize raw backtest output into a chart-ready report"
)]
pub struct Cli {
    /// Path to the raw backtest result JSON
    #[arg(long)]
    pub raw: PathBuf,
    /// Strategy name
    #[arg(long)]
    pub strategy: String,
    /// Timeframe, e.g. 15m
    #[arg(long)]
    pub timeframe: String,
    /// Comma-separated pairs, e.g. BTC/USDT,ETH/USDT
    #[arg(long)]
    pub pairs: String,
    /// Timerange label, e.g. 20240101-20251231
    #[arg(long)]
    pub timerange: String,
    /// Output path for the normalized report
    #[arg(long)]
    pub out: PathBuf,
    /// Candle data root holding `<exchange>/<PAIR>-<timeframe>.json[.gz]`
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// INI settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Balance the equity curve starts from
    #[arg(long)]
    pub starting_balance: Option<f64>,
    /// Log pipeline detail to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub trades: usize,
    pub candles: usize,
    pub equity_points: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote normalized output to {} (trades={}, tv_ohlc={}, tv_equity={})",
            self.output_path.display(),
            self.trades,
            self.candles,
            self.equity_points
        )
    }
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);
    match execute(&cli) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Installs the stderr subscriber; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, NormalizerError> {
    FileConfigAdapter::from_file(path).map_err(|e| NormalizerError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Merges CLI flags over INI settings over built-in defaults.
pub fn build_request(cli: &Cli, config: &dyn ConfigPort) -> ReportRequest {
    let mut request = ReportRequest::new(&cli.strategy, &cli.timeframe, &cli.pairs, &cli.timerange);
    request.starting_balance = cli.starting_balance.unwrap_or_else(|| {
        config.get_double(CONFIG_SECTION, "starting_balance", DEFAULT_STARTING_BALANCE)
    });
    request.preferred_chart_pair = config
        .get_string(CONFIG_SECTION, "chart_pair")
        .unwrap_or_else(|| DEFAULT_CHART_PAIR.to_string());
    request
}

pub fn resolve_data_dir(cli: &Cli, config: &dyn ConfigPort) -> Option<PathBuf> {
    cli.data_dir
        .clone()
        .or_else(|| config.get_string(CONFIG_SECTION, "data_dir").map(PathBuf::from))
}

/// Wires the file adapters and runs the pipeline.
///
/// The raw input is checked before anything else so a missing file fails the
/// run before any setting is read or any output is written.
pub fn execute(cli: &Cli) -> Result<RunSummary, NormalizerError> {
    let raw = load_raw_result(&cli.raw)?;
    tracing::debug!(path = %cli.raw.display(), "raw result loaded");

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };
    let request = build_request(cli, &config);
    let candle_adapter = resolve_data_dir(cli, &config).map(JsonCandleAdapter::new);

    run_pipeline(
        raw,
        &request,
        candle_adapter.as_ref().map(|a| a as &dyn CandlePort),
        &JsonReportAdapter::new(),
        &cli.out,
    )
}

/// Normalizes one raw result and writes the report.
pub fn run_pipeline(
    raw: Value,
    request: &ReportRequest,
    candle_port: Option<&dyn CandlePort>,
    report_port: &dyn ReportPort,
    output_path: &Path,
) -> Result<RunSummary, NormalizerError> {
    let candles = match candle_port {
        Some(port) => port.load_candles(&request.chart_pair(), &request.timeframe),
        None => Vec::new(),
    };

    let report = Report::build(RawParts::from_raw(raw, &request.strategy), request, candles);
    report_port.write(&report, output_path)?;

    Ok(RunSummary {
        output_path: output_path.to_path_buf(),
        trades: report.trades.len(),
        candles: report.tv_ohlc.len(),
        equity_points: report.tv_equity.len(),
    })
}
