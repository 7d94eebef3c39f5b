//! Monthly machine report assembly.
//!
//! Every presenter (dashboard cards, depth table, PDF export) renders a
//! [`MonthlyReport`]; none of them classify bands or apply rates themselves.

use tracing::info;

use crate::cost::NetCostBreakdown;
use crate::daily::{summarize_daily_records, DailyRecord, DailySummary};
use crate::depth::{calculate_depth_penalty_breakdown_with_rates, DepthEvent, DepthPenaltySummary};
use crate::distance::{calculate_distance_adjustment_with_rates, DistanceAdjustment};
use crate::error::{ensure_non_negative, CalcError};
use crate::format::{format_currency, format_depth, format_distance};
use crate::rates::RateTable;

/// Billing-month input for one machine.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MonthlyPerformanceRecord {
    /// Cumulative trenched distance for the month (km)
    pub monthly_total_distance: f64,
    pub machine_rent: f64,
    /// One entry per worked day, chronological
    pub daily_distances: Vec<DailyRecord>,
}

/// One pre-formatted row of the depth table.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DepthTableRow {
    pub event_id: String,
    pub depth: String,
    pub shortfall: String,
    pub status: String,
    pub penalty: String,
    pub latlong: String,
    pub created_at: String,
    pub is_critical: bool,
}

/// Headline figures formatted for display.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FormattedFigures {
    pub monthly_distance: String,
    pub machine_rent: String,
    pub distance_penalty: Option<String>,
    pub distance_incentive: Option<String>,
    pub depth_penalty: String,
    pub net_cost: String,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct MonthlyReport {
    pub band_label: String,
    pub adjustment: DistanceAdjustment,
    pub depth: DepthPenaltySummary,
    pub depth_rows: Vec<DepthTableRow>,
    pub daily: DailySummary,
    pub cost: NetCostBreakdown,
    pub formatted: FormattedFigures,
}

fn depth_rows(summary: &DepthPenaltySummary) -> Vec<DepthTableRow> {
    summary
        .details
        .iter()
        .zip(&summary.assessments)
        .map(|(event, assessment)| DepthTableRow {
            event_id: assessment.event_id.clone(),
            depth: format_depth(assessment.depth_cm),
            shortfall: format_depth(assessment.shortfall_cm),
            status: assessment.band.label().to_string(),
            penalty: format_currency(assessment.penalty_amount),
            latlong: event.latlong.clone(),
            created_at: event.created_at.clone(),
            is_critical: assessment.is_critical,
        })
        .collect()
}

pub fn build_monthly_report_with_rates(
    rates: &RateTable,
    record: &MonthlyPerformanceRecord,
    depth_events: &[DepthEvent],
) -> Result<MonthlyReport, CalcError> {
    rates.validate()?;
    let machine_rent = ensure_non_negative("machine_rent", record.machine_rent)?;

    let adjustment =
        calculate_distance_adjustment_with_rates(rates, record.monthly_total_distance)?;
    let depth = calculate_depth_penalty_breakdown_with_rates(rates, depth_events)?;
    let daily = summarize_daily_records(&record.daily_distances, rates.monthly_target_km)?;
    let cost = NetCostBreakdown::compute(machine_rent, &adjustment, &depth)?;

    let formatted = FormattedFigures {
        monthly_distance: format_distance(record.monthly_total_distance),
        machine_rent: format_currency(machine_rent),
        distance_penalty: adjustment.penalty_amount().map(format_currency),
        distance_incentive: adjustment.incentive_amount().map(format_currency),
        depth_penalty: format_currency(depth.total_depth_penalty),
        net_cost: format_currency(cost.net_cost),
    };

    info!(
        band = adjustment.band.label(),
        distance_km = record.monthly_total_distance,
        depth_events = depth.total_depth_events,
        critical_depth_events = depth.critical_events,
        net_cost = cost.net_cost,
        "monthly report built"
    );

    Ok(MonthlyReport {
        band_label: adjustment.band.label().to_string(),
        depth_rows: depth_rows(&depth),
        adjustment,
        depth,
        daily,
        cost,
        formatted,
    })
}

/// Assemble a monthly report at the default contract rates.
#[uniffi::export]
pub fn build_monthly_report(
    record: MonthlyPerformanceRecord,
    depth_events: Vec<DepthEvent>,
) -> Result<MonthlyReport, CalcError> {
    build_monthly_report_with_rates(&RateTable::default(), &record, &depth_events)
}

/// Assemble a monthly report against a configured rate table.
#[uniffi::export]
pub fn build_monthly_report_with_rate_table(
    rates: RateTable,
    record: MonthlyPerformanceRecord,
    depth_events: Vec<DepthEvent>,
) -> Result<MonthlyReport, CalcError> {
    build_monthly_report_with_rates(&rates, &record, &depth_events)
}
