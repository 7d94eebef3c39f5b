//! Rate table for trenching performance and depth penalties.
//!
//! The constants below are the contract rates for a machine billed against a
//! 7.5 km monthly target. A [`RateTable`] carries the same values as data so a
//! deployment can override them from JSON without touching the calculators.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

// ============================================================================
// Distance Constants
// ============================================================================

/// Monthly trenching target (km). Exactly this distance is neutral.
pub const MONTHLY_TARGET_KM: f64 = 7.5;

/// Below this monthly distance (km) the higher penalty rate applies.
pub const CRITICAL_DISTANCE_KM: f64 = 5.0;

/// Above this monthly distance (km) the second incentive tier applies.
pub const EXCELLENT_DISTANCE_KM: f64 = 10.0;

/// Size of one billing segment (km), i.e. 250 m.
pub const SEGMENT_KM: f64 = 0.25;

/// Penalty per segment when the month closes under 5 km.
pub const CRITICAL_PENALTY_PER_SEGMENT: f64 = 42_000.0;

/// Penalty per segment when the month closes in [5, 7.5) km.
pub const WARNING_PENALTY_PER_SEGMENT: f64 = 40_000.0;

/// Incentive per segment between 7.5 and 10 km.
pub const GOOD_INCENTIVE_PER_SEGMENT: f64 = 42_000.0;

/// Incentive per segment beyond 10 km.
pub const EXCELLENT_INCENTIVE_PER_SEGMENT: f64 = 45_000.0;

// ============================================================================
// Depth Constants
// ============================================================================

/// Standard trench depth (cm).
pub const STANDARD_DEPTH_CM: f64 = 165.0;

/// Lowest depth (cm) that is still only a minor violation.
pub const MINOR_DEPTH_FLOOR_CM: f64 = 150.0;

/// Lowest depth (cm) that is still only a major violation.
pub const MAJOR_DEPTH_FLOOR_CM: f64 = 120.0;

/// Flat penalty per minor-violation event.
pub const MINOR_DEPTH_PENALTY: f64 = 500.0;

/// Flat penalty per major-violation event.
pub const MAJOR_DEPTH_PENALTY: f64 = 1_100.0;

/// Full set of thresholds and rates used by the calculators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default, rename_all = "camelCase")]
pub struct RateTable {
    pub monthly_target_km: f64,
    pub critical_distance_km: f64,
    pub excellent_distance_km: f64,
    pub segment_km: f64,
    pub critical_penalty_per_segment: f64,
    pub warning_penalty_per_segment: f64,
    pub good_incentive_per_segment: f64,
    pub excellent_incentive_per_segment: f64,
    pub standard_depth_cm: f64,
    pub minor_depth_floor_cm: f64,
    pub major_depth_floor_cm: f64,
    pub minor_depth_penalty: f64,
    pub major_depth_penalty: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            monthly_target_km: MONTHLY_TARGET_KM,
            critical_distance_km: CRITICAL_DISTANCE_KM,
            excellent_distance_km: EXCELLENT_DISTANCE_KM,
            segment_km: SEGMENT_KM,
            critical_penalty_per_segment: CRITICAL_PENALTY_PER_SEGMENT,
            warning_penalty_per_segment: WARNING_PENALTY_PER_SEGMENT,
            good_incentive_per_segment: GOOD_INCENTIVE_PER_SEGMENT,
            excellent_incentive_per_segment: EXCELLENT_INCENTIVE_PER_SEGMENT,
            standard_depth_cm: STANDARD_DEPTH_CM,
            minor_depth_floor_cm: MINOR_DEPTH_FLOOR_CM,
            major_depth_floor_cm: MAJOR_DEPTH_FLOOR_CM,
            minor_depth_penalty: MINOR_DEPTH_PENALTY,
            major_depth_penalty: MAJOR_DEPTH_PENALTY,
        }
    }
}

impl RateTable {
    /// Load a rate table from JSON. Keys that are omitted keep their default.
    pub fn from_json(text: &str) -> Result<Self, CalcError> {
        let table: RateTable = serde_json::from_str(text)
            .map_err(|e| CalcError::InvalidRateTable(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every value is finite, rates are non-negative and the
    /// thresholds are ordered.
    pub fn validate(&self) -> Result<(), CalcError> {
        let values = [
            ("monthlyTargetKm", self.monthly_target_km),
            ("criticalDistanceKm", self.critical_distance_km),
            ("excellentDistanceKm", self.excellent_distance_km),
            ("segmentKm", self.segment_km),
            ("criticalPenaltyPerSegment", self.critical_penalty_per_segment),
            ("warningPenaltyPerSegment", self.warning_penalty_per_segment),
            ("goodIncentivePerSegment", self.good_incentive_per_segment),
            ("excellentIncentivePerSegment", self.excellent_incentive_per_segment),
            ("standardDepthCm", self.standard_depth_cm),
            ("minorDepthFloorCm", self.minor_depth_floor_cm),
            ("majorDepthFloorCm", self.major_depth_floor_cm),
            ("minorDepthPenalty", self.minor_depth_penalty),
            ("majorDepthPenalty", self.major_depth_penalty),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::InvalidRateTable(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.segment_km <= 0.0 {
            return Err(CalcError::InvalidRateTable(
                "segmentKm must be positive".to_string(),
            ));
        }
        if !(self.critical_distance_km < self.monthly_target_km
            && self.monthly_target_km < self.excellent_distance_km)
        {
            return Err(CalcError::InvalidRateTable(
                "distance thresholds must satisfy critical < target < excellent".to_string(),
            ));
        }
        if !(self.major_depth_floor_cm < self.minor_depth_floor_cm
            && self.minor_depth_floor_cm < self.standard_depth_cm)
        {
            return Err(CalcError::InvalidRateTable(
                "depth thresholds must satisfy major < minor < standard".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default contract rates, for foreign callers that cannot call `Default`.
#[uniffi::export]
pub fn default_rate_table() -> RateTable {
    RateTable::default()
}

/// Parse and validate a JSON rate table override.
#[uniffi::export]
pub fn rate_table_from_json(text: String) -> Result<RateTable, CalcError> {
    RateTable::from_json(&text)
}
