//! Logging infrastructure for the check plugin
//!
//! Logs are written to stderr: stdout belongs to the plugin status line.

use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::evaluator::{EvaluationResult, Status};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the debug flag. Calling this twice is harmless.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Structured events for one check run
#[derive(Clone)]
pub struct CheckLogger {
    endpoint: String,
}

impl CheckLogger {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn log_startup(&self, version: &str, timeout_secs: u64) {
        debug!(
            event = "check_started",
            endpoint = %self.endpoint,
            version = %version,
            timeout_secs,
            "Starting OPcache check"
        );
    }

    pub fn log_result(&self, result: &EvaluationResult) {
        match result.status {
            Status::Unknown => warn!(
                event = "check_finished",
                endpoint = %self.endpoint,
                status = %result.status,
                code = result.code(),
                "OPcache check could not evaluate the endpoint"
            ),
            _ => info!(
                event = "check_finished",
                endpoint = %self.endpoint,
                status = %result.status,
                code = result.code(),
                metrics = result.metrics.len(),
                "OPcache check finished"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "debug");
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);

        let logger = CheckLogger::new("http://localhost/opcache.php");
        logger.log_startup("0.1.0", 30);
        logger.log_result(&EvaluationResult::invalid_response_code(0));
    }
}
