//! OPcache check library
//!
//! This crate provides the core functionality for:
//! - Fetching and decoding OPcache status samples over HTTP
//! - Computing utilization rates and evaluating them against thresholds
//! - Rendering monitoring-plugin status lines with performance data
//! - Logging setup for the plugin binary

pub mod check;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod models;
pub mod observability;
pub mod wire;

pub use check::{run_check, unknown_for, CheckConfig, CheckOutcome};
pub use error::{FetchError, ParseError, PerfDataError};
pub use evaluator::{
    evaluate, EvaluationResult, Metric, MetricKind, PerfData, PerfValue, Status,
    ThresholdConfig, Thresholds,
};
pub use fetcher::{FetchConfig, HttpFetcher, RawResponse, SampleSource, DEFAULT_TIMEOUT_SECS};
pub use models::{RawSample, FIELD_COUNT, SENTINEL_STATUS};
