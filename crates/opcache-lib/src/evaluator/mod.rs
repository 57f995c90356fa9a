//! Threshold evaluation of OPcache samples
//!
//! This module provides:
//! - Rate computation for the four OPcache ratios
//! - Per-metric threshold classification
//! - Worst-case aggregation into one plugin status
//! - Status line rendering with performance data

mod metric;
mod report;
mod status;
mod thresholds;

pub use metric::{rate, Metric, MetricKind};
pub use report::{EvaluationResult, PerfData, PerfValue};
pub use status::Status;
pub use thresholds::{ThresholdConfig, Thresholds};

use tracing::debug;

use crate::models::RawSample;

/// Evaluate one sample against the configured thresholds
///
/// A sample whose HTTP status is not 200 yields UNKNOWN without computing any metric.
/// Otherwise the overall status is the worst level reached by any metric.
pub fn evaluate(sample: &RawSample, thresholds: &ThresholdConfig) -> EvaluationResult {
    if !sample.is_ok() {
        debug!(http_status = sample.http_status, "Invalid response code");
        return EvaluationResult::invalid_response_code(sample.http_status);
    }

    let metrics: Vec<Metric> = MetricKind::DISPLAY_ORDER
        .iter()
        .map(|kind| Metric::from_sample(*kind, sample, thresholds.for_kind(*kind)))
        .collect();

    let mut overall = Status::Ok;
    for metric in &metrics {
        let level = metric.level();
        debug!(
            metric = metric.kind.name(),
            rate = metric.rate,
            warning = metric.thresholds.warning,
            critical = metric.thresholds.critical,
            level = %level,
            "Evaluated metric"
        );
        overall = overall.escalate(level);
    }

    EvaluationResult::from_metrics(overall, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: [f64; 9]) -> RawSample {
        RawSample::new(values, 200)
    }

    #[test]
    fn test_all_below_warning_is_ok() {
        let result = evaluate(
            &sample([10.0, 90.0, 10.0, 100.0, 99.0, 1.0, 10.0, 90.0, 0.0]),
            &ThresholdConfig::default(),
        );
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.code(), 0);
        assert!(result.message.starts_with("OK: Memory: 10.00% "));
    }

    #[test]
    fn test_memory_critical_alone_is_critical() {
        let result = evaluate(
            &sample([95.0, 5.0, 10.0, 100.0, 99.0, 1.0, 10.0, 90.0, 0.0]),
            &ThresholdConfig::default(),
        );
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.code(), 2);
        for label in ["Memory: ", "String memory: ", "Cached keys: ", "Missed: "] {
            assert!(result.message.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_reference_sample() {
        let result = evaluate(
            &sample([85.0, 15.0, 90.0, 100.0, 5.0, 95.0, 70.0, 30.0, 0.0]),
            &ThresholdConfig::default(),
        );

        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.code(), 2);
        assert_eq!(
            result.message,
            "CRITICAL: Memory: 85.00% String memory: 70.00% Cached keys: 90.00% Missed: 95.00% | \
             'cache_memory'=85.00% 'cache_memory_string'=70.00% \
             'cache_cached_keys'=90.00% 'cache_missed'=95.00%"
        );

        let levels: Vec<Status> = result.metrics.iter().map(Metric::level).collect();
        assert_eq!(
            levels,
            vec![Status::Warning, Status::Ok, Status::Critical, Status::Critical]
        );
    }

    #[test]
    fn test_warning_is_not_downgraded_by_later_ok() {
        // memory at warning, every later metric ok
        let result = evaluate(
            &sample([80.0, 20.0, 10.0, 100.0, 99.0, 1.0, 10.0, 90.0, 0.0]),
            &ThresholdConfig::default(),
        );
        assert_eq!(result.status, Status::Warning);
        assert_eq!(result.code(), 1);
    }

    #[test]
    fn test_later_warning_does_not_override_critical() {
        // memory critical, missed at warning
        let result = evaluate(
            &sample([90.0, 10.0, 10.0, 100.0, 94.0, 6.0, 10.0, 90.0, 0.0]),
            &ThresholdConfig::default(),
        );
        assert_eq!(result.status, Status::Critical);
    }

    #[test]
    fn test_overall_is_pointwise_maximum() {
        let thresholds = ThresholdConfig::default();
        let grid = [0.0, 4.0, 5.0, 9.0, 10.0, 50.0, 80.0, 85.0, 90.0, 100.0];
        for &mem in &grid {
            for &keys in &grid {
                for &missed in &grid {
                    let s = sample([
                        mem,
                        100.0 - mem,
                        keys,
                        100.0,
                        100.0 - missed,
                        missed,
                        0.0,
                        1.0,
                        0.0,
                    ]);
                    let result = evaluate(&s, &thresholds);
                    let expected = result
                        .metrics
                        .iter()
                        .map(Metric::level)
                        .max()
                        .unwrap_or_default();
                    assert_eq!(result.status, expected);
                }
            }
        }
    }

    #[test]
    fn test_inclusive_thresholds() {
        let thresholds = ThresholdConfig {
            memory: Thresholds::new(50, 75),
            ..ThresholdConfig::default()
        };
        let at_warning = evaluate(
            &sample([50.0, 50.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            &thresholds,
        );
        assert_eq!(at_warning.status, Status::Warning);

        let at_critical = evaluate(
            &sample([75.0, 25.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            &thresholds,
        );
        assert_eq!(at_critical.status, Status::Critical);
    }

    #[test]
    fn test_empty_counters_evaluate_to_zero() {
        let result = evaluate(&sample([0.0; 9]), &ThresholdConfig::default());
        assert_eq!(result.status, Status::Ok);
        assert!(result.metrics.iter().all(|m| m.rate == 0.0));
        assert!(result.message.ends_with("'cache_missed'=0.00%"));
    }

    #[test]
    fn test_non_200_is_unknown_regardless_of_values() {
        let result = evaluate(
            &RawSample::new([95.0, 5.0, 90.0, 100.0, 5.0, 95.0, 70.0, 30.0, 0.0], 404),
            &ThresholdConfig::default(),
        );
        assert_eq!(result.status, Status::Unknown);
        assert_eq!(result.code(), 3);
        assert_eq!(result.message, "UNKNOWN: [404] Invalid response code");
        assert!(result.metrics.is_empty());
    }
}
