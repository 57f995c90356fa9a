//! Core data models for the OPcache check

use serde::{Deserialize, Serialize};

/// Number of numeric fields carried by a status body
pub const FIELD_COUNT: usize = 9;

/// HTTP status recorded when the request never produced a response
pub const SENTINEL_STATUS: u16 = 0;

/// Status code of a successful OPcache status response
pub const STATUS_OK: u16 = 200;

/// One decoded OPcache status response
///
/// Field positions as emitted by the status endpoint:
/// 0. used memory
/// 1. free memory
/// 2. used key slots
/// 3. total key slots
/// 4. cache hits
/// 5. cache misses
/// 6. used interned-string bytes
/// 7. free interned-string bytes
/// 8. reserved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    pub values: [f64; FIELD_COUNT],
    pub http_status: u16,
}

impl RawSample {
    pub fn new(values: [f64; FIELD_COUNT], http_status: u16) -> Self {
        Self {
            values,
            http_status,
        }
    }

    /// Sample for a response whose body was not decoded
    pub fn status_only(http_status: u16) -> Self {
        Self {
            values: [0.0; FIELD_COUNT],
            http_status,
        }
    }

    /// Sample recorded when the transport failed before any response arrived
    pub fn unreachable() -> Self {
        Self::status_only(SENTINEL_STATUS)
    }

    pub fn is_ok(&self) -> bool {
        self.http_status == STATUS_OK
    }

    pub fn used_memory(&self) -> f64 {
        self.values[0]
    }

    pub fn free_memory(&self) -> f64 {
        self.values[1]
    }

    pub fn used_key_slots(&self) -> f64 {
        self.values[2]
    }

    pub fn total_key_slots(&self) -> f64 {
        self.values[3]
    }

    pub fn hits(&self) -> f64 {
        self.values[4]
    }

    pub fn misses(&self) -> f64 {
        self.values[5]
    }

    pub fn used_string_memory(&self) -> f64 {
        self.values[6]
    }

    pub fn free_string_memory(&self) -> f64 {
        self.values[7]
    }

    /// Key slots not in use; saturates at zero if the endpoint reports more used than total
    pub fn free_key_slots(&self) -> f64 {
        (self.total_key_slots() - self.used_key_slots()).max(0.0)
    }
}
