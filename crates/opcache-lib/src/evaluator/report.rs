//! Status line rendering and performance data

use std::fmt;
use std::str::FromStr;

use super::{Metric, MetricKind, Status};
use crate::error::PerfDataError;

/// One `'name'=value%` token of the performance-data trailer
#[derive(Debug, Clone, PartialEq)]
pub struct PerfValue {
    pub name: String,
    pub value: f64,
}

impl fmt::Display for PerfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'={:.2}%", self.name, self.value)
    }
}

/// Performance-data trailer, the part of the status line after `|`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerfData(pub Vec<PerfValue>);

impl PerfData {
    pub fn from_metrics(metrics: &[Metric]) -> Self {
        let values = MetricKind::PERFDATA_ORDER
            .iter()
            .filter_map(|kind| metrics.iter().find(|m| m.kind == *kind))
            .map(|m| PerfValue {
                name: m.kind.perf_name().to_string(),
                value: m.rate,
            })
            .collect();
        Self(values)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl FromStr for PerfData {
    type Err = PerfDataError;

    /// Parse a trailer such as `'cache_memory'=85.00% 'cache_missed'=1.5%`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = Vec::new();
        for token in s.split_whitespace() {
            let (name, value) = token
                .split_once('=')
                .ok_or_else(|| PerfDataError::MissingValue(token.to_string()))?;
            let name = name.trim_matches('\'');
            if name.is_empty() {
                return Err(PerfDataError::MissingLabel(token.to_string()));
            }
            let number = value.trim_end_matches('%');
            let value = number
                .parse::<f64>()
                .map_err(|_| PerfDataError::InvalidValue(token.to_string()))?;
            values.push(PerfValue {
                name: name.to_string(),
                value,
            });
        }
        Ok(Self(values))
    }
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub status: Status,
    pub message: String,
    /// Metrics in display order; empty when no sample could be evaluated
    pub metrics: Vec<Metric>,
}

impl EvaluationResult {
    pub fn code(&self) -> i32 {
        self.status.code()
    }

    /// UNKNOWN result carrying a free-form reason
    pub fn unknown(reason: impl fmt::Display) -> Self {
        Self {
            status: Status::Unknown,
            message: format!("{}: {}", Status::Unknown, reason),
            metrics: Vec::new(),
        }
    }

    /// UNKNOWN result for a response that did not carry status 200
    pub fn invalid_response_code(http_status: u16) -> Self {
        Self::unknown(format_args!("[{:03}] Invalid response code", http_status))
    }

    pub(crate) fn from_metrics(status: Status, metrics: Vec<Metric>) -> Self {
        let mut message = format!("{}: ", status);
        for metric in &metrics {
            message.push_str(&metric.summary());
            message.push(' ');
        }
        message.push_str("| ");
        message.push_str(&PerfData::from_metrics(&metrics).to_string());

        Self {
            status,
            message,
            metrics,
        }
    }

    /// Trailer of the rendered message, if any
    pub fn perfdata(&self) -> Option<&str> {
        self.message.split_once(" | ").map(|(_, trailer)| trailer)
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
