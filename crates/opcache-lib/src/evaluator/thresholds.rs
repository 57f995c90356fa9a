//! Warning/critical bounds per metric

use super::metric::MetricKind;
use super::Status;

/// Inclusive percentage bounds for one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: u32,
    pub critical: u32,
}

impl Thresholds {
    pub const fn new(warning: u32, critical: u32) -> Self {
        Self { warning, critical }
    }

    /// Level reached by `rate`; both bounds trigger at equality
    pub fn classify(&self, rate: f64) -> Status {
        if rate >= f64::from(self.critical) {
            Status::Critical
        } else if rate >= f64::from(self.warning) {
            Status::Warning
        } else {
            Status::Ok
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.warning <= self.critical
    }
}

/// Thresholds for every evaluated metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub memory: Thresholds,
    pub string_memory: Thresholds,
    pub cached_keys: Thresholds,
    pub missed: Thresholds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            memory: Thresholds::new(80, 90),
            string_memory: Thresholds::new(80, 90),
            cached_keys: Thresholds::new(80, 90),
            missed: Thresholds::new(5, 10),
        }
    }
}

impl ThresholdConfig {
    pub fn for_kind(&self, kind: MetricKind) -> Thresholds {
        match kind {
            MetricKind::Memory => self.memory,
            MetricKind::StringMemory => self.string_memory,
            MetricKind::CachedKeys => self.cached_keys,
            MetricKind::Missed => self.missed,
        }
    }

    /// Metrics whose warning bound lies above the critical one
    ///
    /// Such pairs still evaluate: critical is checked first, so the warning level is
    /// unreachable for them.
    pub fn inverted(&self) -> Vec<MetricKind> {
        MetricKind::DISPLAY_ORDER
            .into_iter()
            .filter(|kind| !self.for_kind(*kind).is_ordered())
            .collect()
    }
}
