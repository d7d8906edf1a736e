//! CLI definition and run orchestration.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::env_config_adapter::EnvConfigAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::http_trading_adapter::HttpTradingAdapter;
use crate::domain::connection::ConnectionConfig;
use crate::domain::error::FxFetchError;
use crate::domain::fetch_plan::FetchPlan;
use crate::domain::session::SessionManager;
use crate::ports::config_port::ConfigPort;
use crate::ports::trading_port::TradingPort;

/// With no flags, fetches USD/JPY m1 and H1 bars for the last 45 days into `FX/`.
#[derive(Parser, Debug, Default)]
#[command(name = "fxfetch", about = "Download historical FX bars to CSV")]
pub struct Cli {
    /// INI run profile with a [fetch] section
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub ticker: Option<String>,
    /// Repeat to fetch several timeframes
    #[arg(long = "timeframe")]
    pub timeframes: Vec<String>,
    /// Lookback window in days
    #[arg(long)]
    pub days: Option<u32>,
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Exit nonzero when the run fails
    #[arg(long)]
    pub strict: bool,
}

/// Outcome of one timeframe in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeSummary {
    pub timeframe: String,
    pub rows: usize,
    pub path: Option<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    run_with(&cli, &EnvConfigAdapter::load())
}

/// Runs against an already loaded environment. Failures are logged and exit 0
/// unless `--strict` is set.
pub fn run_with(cli: &Cli, env: &EnvConfigAdapter) -> ExitCode {
    match execute(cli, env) {
        Ok(summaries) => {
            let saved = summaries.iter().filter(|s| s.rows > 0).count();
            info!("Run complete: {saved} of {} timeframes saved", summaries.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Exception: {e}");
            if cli.strict {
                (&e).into()
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

/// Builds the plan and connection from `env` (and `--config`), then runs the plan.
pub fn execute(cli: &Cli, env: &EnvConfigAdapter) -> Result<Vec<TimeframeSummary>, FxFetchError> {
    let profile = match &cli.config {
        Some(path) => {
            info!("Loading run profile from {}", path.display());
            Some(FileConfigAdapter::from_file(path)?)
        }
        None => None,
    };
    let plan_source: &dyn ConfigPort = match &profile {
        Some(p) => p,
        None => env,
    };
    let plan = apply_overrides(FetchPlan::from_config(plan_source)?, cli)?;

    let connection = ConnectionConfig::from_config(env);
    connection.validate()?;
    let adapter = HttpTradingAdapter::from_config(env)?;

    let mut manager = SessionManager::new(connection, adapter).with_output_dir(&plan.output_dir);
    run_plan(&mut manager, &plan)
}

pub fn apply_overrides(mut plan: FetchPlan, cli: &Cli) -> Result<FetchPlan, FxFetchError> {
    if let Some(ticker) = &cli.ticker {
        plan.ticker = ticker.trim().to_string();
    }
    if !cli.timeframes.is_empty() {
        plan.timeframes = cli
            .timeframes
            .iter()
            .map(|tf| tf.trim().to_string())
            .filter(|tf| !tf.is_empty())
            .collect();
    }
    if let Some(days) = cli.days {
        plan.lookback_days = days;
    }
    if let Some(dir) = &cli.output_dir {
        plan.output_dir = dir.clone();
    }
    plan.validate()?;
    Ok(plan)
}

/// Fetches every timeframe of `plan` inside one session.
///
/// The session is closed before returning, whether or not a fetch failed.
pub fn run_plan<T: TradingPort>(
    manager: &mut SessionManager<T>,
    plan: &FetchPlan,
) -> Result<Vec<TimeframeSummary>, FxFetchError> {
    let session = manager.scoped()?;

    let mut summaries = Vec::with_capacity(plan.timeframes.len());
    for timeframe in &plan.timeframes {
        let saved = session.fetch_and_save(&plan.ticker, timeframe, plan.lookback_days, None)?;
        let summary = match saved {
            Some(saved) => {
                info!("Retrieved {} rows for {} {}", saved.len(), plan.ticker, timeframe);
                TimeframeSummary {
                    timeframe: timeframe.clone(),
                    rows: saved.len(),
                    path: Some(saved.path),
                }
            }
            None => TimeframeSummary {
                timeframe: timeframe.clone(),
                rows: 0,
                path: None,
            },
        };
        summaries.push(summary);
    }
    Ok(summaries)
}
