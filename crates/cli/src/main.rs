//! OPcache check plugin
//!
//! Queries an OPcache status script over HTTP and prints one Centreon/Nagios status
//! line with performance data. The exit code carries the status.

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use opcache_lib::{
    observability::{init_logging, CheckLogger},
    run_check, unknown_for, CheckConfig, EvaluationResult, HttpFetcher, SampleSource, Status,
};
use tracing::{debug, warn};

use config::Cli;

const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // usage errors must not read as WARNING/CRITICAL to the supervisor
            if e.use_stderr() {
                Status::Unknown.exit()
            }
            Status::Ok.exit()
        }
    };

    init_logging(cli.debug);

    let result = match run(&cli) {
        Ok(result) => result,
        Err(e) => EvaluationResult::unknown(format_args!("{:#}", e)),
    };

    println!("{}", result);
    result.status.exit()
}

fn run(cli: &Cli) -> Result<EvaluationResult> {
    let config = cli.check_config();
    for kind in config.thresholds.inverted() {
        warn!(
            metric = kind.name(),
            "Warning threshold above critical threshold, only critical can trigger"
        );
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    Ok(runtime.block_on(check(&config, cli.debug)))
}

async fn check(config: &CheckConfig, debug_output: bool) -> EvaluationResult {
    let fetcher = match HttpFetcher::new(&config.fetch) {
        Ok(fetcher) => fetcher,
        Err(e) => return unknown_for(&e),
    };

    let logger = CheckLogger::new(fetcher.location());
    logger.log_startup(PLUGIN_VERSION, config.fetch.timeout_secs);
    debug!(thresholds = ?config.thresholds, "Thresholds configured");

    let outcome = run_check(&fetcher, &config.thresholds).await;
    if debug_output {
        output::print_debug(&fetcher.location(), &outcome);
    }

    logger.log_result(&outcome.result);
    outcome.result
}
