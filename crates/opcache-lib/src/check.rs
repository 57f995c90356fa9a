//! One complete check run: fetch, decode, evaluate

use tracing::warn;

use crate::error::FetchError;
use crate::evaluator::{evaluate, EvaluationResult, ThresholdConfig};
use crate::fetcher::{FetchConfig, RawResponse, SampleSource};
use crate::models::RawSample;
use crate::wire;

/// Everything a check run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub fetch: FetchConfig,
    pub thresholds: ThresholdConfig,
}

/// Intermediate values and final result of a run
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Response as received; absent when the transport failed
    pub response: Option<RawResponse>,
    /// Decoded sample; absent when the body was malformed
    pub sample: Option<RawSample>,
    pub result: EvaluationResult,
}

/// Map a failed run to its UNKNOWN result
///
/// Transport failures go through the sentinel status so they render as `[000]`.
pub fn unknown_for(err: &FetchError) -> EvaluationResult {
    match err {
        FetchError::Timeout(_) | FetchError::Transport(_) => {
            EvaluationResult::invalid_response_code(RawSample::unreachable().http_status)
        }
        FetchError::Parse(e) => {
            EvaluationResult::unknown(format_args!("Malformed response body ({})", e))
        }
        FetchError::InvalidUrl(e) => {
            EvaluationResult::unknown(format_args!("Invalid endpoint URL ({})", e))
        }
        FetchError::Client(e) => {
            EvaluationResult::unknown(format_args!("HTTP client setup failed ({})", e))
        }
    }
}

/// Fetch one response from `source` and evaluate it
///
/// Never fails: every error is folded into an UNKNOWN result.
pub async fn run_check<S>(source: &S, thresholds: &ThresholdConfig) -> CheckOutcome
where
    S: SampleSource + ?Sized,
{
    let response = match source.fetch().await {
        Ok(response) => response,
        Err(err) => {
            let sample = err.is_transport().then(RawSample::unreachable);
            return CheckOutcome {
                response: None,
                sample,
                result: unknown_for(&err),
            };
        }
    };

    let sample = match wire::decode_response(&response.body, response.http_status) {
        Ok(sample) => sample,
        Err(err) => {
            warn!(error = %err, "Malformed OPcache status body");
            return CheckOutcome {
                response: Some(response),
                sample: None,
                result: unknown_for(&FetchError::Parse(err)),
            };
        }
    };

    let result = evaluate(&sample, thresholds);

    CheckOutcome {
        response: Some(response),
        sample: Some(sample),
        result,
    }
}
