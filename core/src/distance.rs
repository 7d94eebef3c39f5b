//! Monthly distance penalty and incentive calculation.
//!
//! A machine's cumulative trenched distance for the month is compared with the
//! monthly target and converted into whole 250 m segments. Shortfall segments
//! round up and excess segments round down.

use tracing::{debug, warn};

use crate::error::{ensure_non_negative, CalcError};
use crate::rates::RateTable;

/// Classification of a month's cumulative distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum DistanceBand {
    /// Under 5 km - penalised at the higher rate
    Critical,
    /// 5 to 7.5 km (exclusive) - penalised at the standard rate
    Warning,
    /// Exactly on target
    Neutral,
    /// Over 7.5 up to 10 km - single-tier incentive
    Good,
    /// Over 10 km - two-tier incentive
    Excellent,
}

impl DistanceBand {
    pub fn classify(distance_km: f64, rates: &RateTable) -> Self {
        if distance_km < rates.critical_distance_km {
            DistanceBand::Critical
        } else if distance_km < rates.monthly_target_km {
            DistanceBand::Warning
        } else if distance_km == rates.monthly_target_km {
            DistanceBand::Neutral
        } else if distance_km <= rates.excellent_distance_km {
            DistanceBand::Good
        } else {
            DistanceBand::Excellent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistanceBand::Critical => "Critical",
            DistanceBand::Warning => "Warning",
            DistanceBand::Neutral => "On Target",
            DistanceBand::Good => "Good",
            DistanceBand::Excellent => "Excellent",
        }
    }
}

/// Penalty owed for closing the month short of target.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct PenaltyBreakdown {
    /// Distance missing from the target (km)
    pub shortfall_km: f64,
    /// Shortfall in whole segments, rounded up
    pub segments: u64,
    pub rate_per_segment: f64,
    pub total_penalty: f64,
}

/// One rate tier of an incentive.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct IncentiveTier {
    pub band: DistanceBand,
    pub segments: u64,
    pub rate_per_segment: f64,
    pub amount: f64,
}

/// Incentive earned for closing the month beyond target.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct IncentiveBreakdown {
    /// Distance beyond the target (km)
    pub excess_km: f64,
    /// Total whole segments across all tiers, rounded down per tier
    pub segments: u64,
    pub tiers: Vec<IncentiveTier>,
    pub total_incentive: f64,
}

/// Band plus whichever adjustment applies. At most one of `penalty` and
/// `incentive` is set; both are `None` exactly on target.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DistanceAdjustment {
    pub monthly_total_distance_km: f64,
    pub band: DistanceBand,
    pub penalty: Option<PenaltyBreakdown>,
    pub incentive: Option<IncentiveBreakdown>,
}

impl DistanceAdjustment {
    pub fn penalty_amount(&self) -> Option<f64> {
        self.penalty.as_ref().map(|p| p.total_penalty)
    }

    pub fn incentive_amount(&self) -> Option<f64> {
        self.incentive.as_ref().map(|i| i.total_incentive)
    }
}

fn checked_distance(distance_km: f64) -> Result<f64, CalcError> {
    ensure_non_negative("monthly_total_distance", distance_km).inspect_err(|e| {
        warn!(distance_km, error = %e, "rejected monthly distance");
    })
}

/// Convert a rounded segment count to an integer, rejecting counts past `u64`.
fn segment_count(rounded: f64) -> Result<u64, CalcError> {
    // 2^64 is exactly representable, so `<` keeps the cast lossless.
    if rounded.is_finite() && rounded >= 0.0 && rounded < u64::MAX as f64 {
        Ok(rounded as u64)
    } else {
        Err(CalcError::invalid_input(
            "monthly_total_distance",
            format!("{} segments is out of range", rounded),
        ))
    }
}

/// Whole segments covering `km`, rounded up.
fn segments_ceil(km: f64, segment_km: f64) -> Result<u64, CalcError> {
    segment_count((km / segment_km).ceil())
}

/// Whole segments contained in `km`, rounded down.
fn segments_floor(km: f64, segment_km: f64) -> Result<u64, CalcError> {
    segment_count((km / segment_km).floor())
}

fn incentive_tier(band: DistanceBand, segments: u64, rate_per_segment: f64) -> IncentiveTier {
    IncentiveTier {
        band,
        segments,
        rate_per_segment,
        amount: segments as f64 * rate_per_segment,
    }
}

fn penalty_for(
    rates: &RateTable,
    distance_km: f64,
) -> Result<Option<PenaltyBreakdown>, CalcError> {
    let distance_km = checked_distance(distance_km)?;
    if distance_km >= rates.monthly_target_km {
        return Ok(None);
    }

    let shortfall_km = rates.monthly_target_km - distance_km;
    let segments = segments_ceil(shortfall_km, rates.segment_km)?;
    let rate_per_segment = if distance_km < rates.critical_distance_km {
        rates.critical_penalty_per_segment
    } else {
        rates.warning_penalty_per_segment
    };
    let total_penalty = segments as f64 * rate_per_segment;

    debug!(
        distance_km,
        shortfall_km,
        segments,
        rate_per_segment,
        total_penalty,
        "distance penalty"
    );

    Ok(Some(PenaltyBreakdown {
        shortfall_km,
        segments,
        rate_per_segment,
        total_penalty,
    }))
}

fn incentive_for(
    rates: &RateTable,
    distance_km: f64,
) -> Result<Option<IncentiveBreakdown>, CalcError> {
    let distance_km = checked_distance(distance_km)?;
    if distance_km <= rates.monthly_target_km {
        return Ok(None);
    }

    let excess_km = distance_km - rates.monthly_target_km;
    let tiers = if distance_km <= rates.excellent_distance_km {
        let segments = segments_floor(excess_km, rates.segment_km)?;
        vec![incentive_tier(
            DistanceBand::Good,
            segments,
            rates.good_incentive_per_segment,
        )]
    } else {
        let good_segments = segments_floor(
            rates.excellent_distance_km - rates.monthly_target_km,
            rates.segment_km,
        )?;
        let excellent_segments =
            segments_floor(distance_km - rates.excellent_distance_km, rates.segment_km)?;
        vec![
            incentive_tier(
                DistanceBand::Good,
                good_segments,
                rates.good_incentive_per_segment,
            ),
            incentive_tier(
                DistanceBand::Excellent,
                excellent_segments,
                rates.excellent_incentive_per_segment,
            ),
        ]
    };

    let segments = tiers
        .iter()
        .try_fold(0u64, |acc, t| acc.checked_add(t.segments))
        .ok_or_else(|| {
            CalcError::invalid_input(
                "monthly_total_distance",
                format!("{} km exceeds the countable segment range", distance_km),
            )
        })?;
    let total_incentive: f64 = tiers.iter().map(|t| t.amount).sum();

    debug!(
        distance_km,
        excess_km,
        segments,
        total_incentive,
        "distance incentive"
    );

    Ok(Some(IncentiveBreakdown {
        excess_km,
        segments,
        tiers,
        total_incentive,
    }))
}

/// Compute the shortfall penalty, or `None` when the target was reached.
pub fn calculate_penalty_with_rates(
    rates: &RateTable,
    distance_km: f64,
) -> Result<Option<PenaltyBreakdown>, CalcError> {
    rates.validate()?;
    penalty_for(rates, distance_km)
}

/// Compute the tiered incentive, or `None` when the target was not exceeded.
pub fn calculate_incentive_with_rates(
    rates: &RateTable,
    distance_km: f64,
) -> Result<Option<IncentiveBreakdown>, CalcError> {
    rates.validate()?;
    incentive_for(rates, distance_km)
}

pub fn calculate_distance_adjustment_with_rates(
    rates: &RateTable,
    monthly_total_distance_km: f64,
) -> Result<DistanceAdjustment, CalcError> {
    rates.validate()?;
    let penalty = penalty_for(rates, monthly_total_distance_km)?;
    let incentive = incentive_for(rates, monthly_total_distance_km)?;
    Ok(DistanceAdjustment {
        monthly_total_distance_km,
        band: DistanceBand::classify(monthly_total_distance_km, rates),
        penalty,
        incentive,
    })
}

/// Shortfall penalty at the default contract rates.
#[uniffi::export]
pub fn calculate_penalty(distance_km: f64) -> Result<Option<PenaltyBreakdown>, CalcError> {
    calculate_penalty_with_rates(&RateTable::default(), distance_km)
}

/// Tiered incentive at the default contract rates.
#[uniffi::export]
pub fn calculate_incentive(distance_km: f64) -> Result<Option<IncentiveBreakdown>, CalcError> {
    calculate_incentive_with_rates(&RateTable::default(), distance_km)
}

/// Band, penalty and incentive for a month at the default contract rates.
#[uniffi::export]
pub fn calculate_distance_adjustment(
    monthly_total_distance_km: f64,
) -> Result<DistanceAdjustment, CalcError> {
    calculate_distance_adjustment_with_rates(&RateTable::default(), monthly_total_distance_km)
}
