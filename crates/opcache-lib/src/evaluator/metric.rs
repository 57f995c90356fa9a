//! Rate metrics derived from a raw sample

use super::{Status, Thresholds};
use crate::models::RawSample;

/// The four evaluated ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Memory,
    StringMemory,
    CachedKeys,
    Missed,
}

impl MetricKind {
    /// Order of the human-readable part of the status line
    pub const DISPLAY_ORDER: [MetricKind; 4] = [
        MetricKind::Memory,
        MetricKind::StringMemory,
        MetricKind::CachedKeys,
        MetricKind::Missed,
    ];

    /// Order of the performance-data trailer
    pub const PERFDATA_ORDER: [MetricKind; 4] = [
        MetricKind::Memory,
        MetricKind::StringMemory,
        MetricKind::CachedKeys,
        MetricKind::Missed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Memory => "memory",
            MetricKind::StringMemory => "string_memory",
            MetricKind::CachedKeys => "cached_keys",
            MetricKind::Missed => "missed",
        }
    }

    /// Prefix shown before the rate in the status line
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Memory => "Memory: ",
            MetricKind::StringMemory => "String memory: ",
            MetricKind::CachedKeys => "Cached keys: ",
            MetricKind::Missed => "Missed: ",
        }
    }

    /// Performance-data token name
    pub fn perf_name(self) -> &'static str {
        match self {
            MetricKind::Memory => "cache_memory",
            MetricKind::StringMemory => "cache_memory_string",
            MetricKind::CachedKeys => "cache_cached_keys",
            MetricKind::Missed => "cache_missed",
        }
    }

    /// (primary, secondary) counts feeding the rate
    pub fn operands(self, sample: &RawSample) -> (f64, f64) {
        match self {
            MetricKind::Memory => (sample.used_memory(), sample.free_memory()),
            MetricKind::StringMemory => (sample.used_string_memory(), sample.free_string_memory()),
            MetricKind::CachedKeys => (sample.used_key_slots(), sample.free_key_slots()),
            MetricKind::Missed => (sample.misses(), sample.hits()),
        }
    }
}

/// Share of `primary` in `primary + secondary`, as a percentage rounded to 2 decimals
///
/// Exact ties round to even. An empty pair yields 0.
pub fn rate(primary: f64, secondary: f64) -> f64 {
    let total = primary + secondary;
    if total <= 0.0 {
        return 0.0;
    }
    round2(primary * 100.0 / total)
}

fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// One evaluated ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub kind: MetricKind,
    pub rate: f64,
    pub thresholds: Thresholds,
}

impl Metric {
    pub fn from_sample(kind: MetricKind, sample: &RawSample, thresholds: Thresholds) -> Self {
        let (primary, secondary) = kind.operands(sample);
        Self {
            kind,
            rate: rate(primary, secondary),
            thresholds,
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn level(&self) -> Status {
        self.thresholds.classify(self.rate)
    }

    /// `<label><rate>%`, as printed in the status line
    pub fn summary(&self) -> String {
        format!("{}{:.2}%", self.label(), self.rate)
    }
}
