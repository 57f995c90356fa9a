//! Command-line configuration for the check plugin

use clap::Parser;
use opcache_lib::{FetchConfig, CheckConfig, ThresholdConfig, Thresholds, DEFAULT_TIMEOUT_SECS};

/// OPcache plugin for Centreon
///
/// Queries an OPcache status script and reports memory, interned-string, key-slot and
/// miss ratios. Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.
#[derive(Parser, Debug, Clone)]
#[command(name = "check-opcache")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// Output debug information (do not use with Centreon)
    #[arg(long, short)]
    pub debug: bool,

    /// Protocol (http or https)
    #[arg(long, env = "OPCACHE_PROTO")]
    pub proto: String,

    /// Hostname, optionally with :port
    #[arg(long, env = "OPCACHE_HOSTNAME")]
    pub hostname: String,

    /// Relative URL of the status script
    #[arg(long, env = "OPCACHE_URLPATH")]
    pub urlpath: String,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, env = "OPCACHE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Memory used warning level (in %)
    #[arg(long, env = "OPCACHE_WARNING_MEMORY", default_value_t = 80)]
    pub warning_memory: u32,

    /// Memory used critical level (in %)
    #[arg(long, env = "OPCACHE_CRITICAL_MEMORY", default_value_t = 90)]
    pub critical_memory: u32,

    /// String memory used warning level (in %)
    #[arg(long, env = "OPCACHE_WARNING_STRING_MEMORY", default_value_t = 80)]
    pub warning_string_memory: u32,

    /// String memory used critical level (in %)
    #[arg(long, env = "OPCACHE_CRITICAL_STRING_MEMORY", default_value_t = 90)]
    pub critical_string_memory: u32,

    /// Cached keys used warning level (in %)
    #[arg(long, env = "OPCACHE_WARNING_CACHED_KEYS", default_value_t = 80)]
    pub warning_cached_keys: u32,

    /// Cached keys used critical level (in %)
    #[arg(long, env = "OPCACHE_CRITICAL_CACHED_KEYS", default_value_t = 90)]
    pub critical_cached_keys: u32,

    /// Missed rate warning level (in %)
    #[arg(long, env = "OPCACHE_WARNING_MISSED", default_value_t = 5)]
    pub warning_missed: u32,

    /// Missed rate critical level (in %)
    #[arg(long, env = "OPCACHE_CRITICAL_MISSED", default_value_t = 10)]
    pub critical_missed: u32,
}

impl Cli {
    pub fn check_config(&self) -> CheckConfig {
        CheckConfig {
            fetch: FetchConfig::new(&self.proto, &self.hostname, &self.urlpath)
                .with_timeout(self.timeout),
            thresholds: ThresholdConfig {
                memory: Thresholds::new(self.warning_memory, self.critical_memory),
                string_memory: Thresholds::new(
                    self.warning_string_memory,
                    self.critical_string_memory,
                ),
                cached_keys: Thresholds::new(self.warning_cached_keys, self.critical_cached_keys),
                missed: Thresholds::new(self.warning_missed, self.critical_missed),
            },
        }
    }
}
