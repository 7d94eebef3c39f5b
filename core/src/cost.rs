//! Net payable figure for a machine over a reporting period.

use tracing::debug;

use crate::depth::DepthPenaltySummary;
use crate::distance::DistanceAdjustment;
use crate::error::{ensure_finite, ensure_non_negative, CalcError};

/// Net cost with each component itemised.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct NetCostBreakdown {
    pub machine_rent: f64,
    pub distance_penalty: f64,
    pub distance_incentive: f64,
    pub depth_penalty: f64,
    pub net_cost: f64,
}

impl NetCostBreakdown {
    pub fn compute(
        machine_rent: f64,
        adjustment: &DistanceAdjustment,
        depth: &DepthPenaltySummary,
    ) -> Result<Self, CalcError> {
        let distance_penalty = adjustment.penalty_amount().unwrap_or(0.0);
        let distance_incentive = adjustment.incentive_amount().unwrap_or(0.0);
        let net_cost = calculate_net_cost(
            machine_rent,
            adjustment.penalty_amount(),
            adjustment.incentive_amount(),
            depth.total_depth_penalty,
        )?;
        Ok(NetCostBreakdown {
            machine_rent,
            distance_penalty,
            distance_incentive,
            depth_penalty: depth.total_depth_penalty,
            net_cost,
        })
    }
}

/// `rent + penalty - incentive + depth penalty`, absent terms counting as zero.
#[uniffi::export]
pub fn calculate_net_cost(
    machine_rent: f64,
    penalty: Option<f64>,
    incentive: Option<f64>,
    depth_penalty_total: f64,
) -> Result<f64, CalcError> {
    let rent = ensure_non_negative("machine_rent", machine_rent)?;
    let penalty = ensure_finite("penalty", penalty.unwrap_or(0.0))?;
    let incentive = ensure_finite("incentive", incentive.unwrap_or(0.0))?;
    let depth = ensure_finite("depth_penalty_total", depth_penalty_total)?;

    let net_cost = rent - incentive + penalty + depth;
    debug!(rent, penalty, incentive, depth, net_cost, "net cost");
    Ok(net_cost)
}
