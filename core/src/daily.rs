//! Day-by-day progress against the monthly target.

use time::macros::format_description;
use time::Date;
use tracing::{debug, warn};

use crate::error::{ensure_non_negative, CalcError};

/// Distance trenched on one worked day.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DailyRecord {
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    pub total_distance: f64,
}

/// A daily record measured against that month's daily share of the target.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DailyProgress {
    pub date: String,
    pub total_distance_km: f64,
    pub daily_target_km: f64,
    pub meets_daily_requirement: bool,
    pub difference_km: f64,
}

/// Progress rows for a month plus their totals.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DailySummary {
    pub rows: Vec<DailyProgress>,
    pub days_met: u64,
    pub days_missed: u64,
    pub cumulative_distance_km: f64,
}

/// Parse the calendar date of a record. A trailing time part is ignored.
pub fn parse_record_date(text: &str) -> Result<Date, CalcError> {
    let trimmed = text.trim();
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    Date::parse(date_part, format_description!("[year]-[month]-[day]"))
        .map_err(|e| CalcError::invalid_input("date", format!("'{}': {}", text, e)))
}

pub fn days_in_month(date: Date) -> u8 {
    date.month().length(date.year())
}

/// The monthly target spread evenly over the days of the record's month.
pub fn daily_target_km(monthly_target_km: f64, date: Date) -> f64 {
    monthly_target_km / days_in_month(date) as f64
}

pub fn assess_daily_record(
    record: &DailyRecord,
    monthly_target_km: f64,
) -> Result<DailyProgress, CalcError> {
    let date = parse_record_date(&record.date)?;
    let total_distance_km = ensure_non_negative("total_distance", record.total_distance)
        .inspect_err(|e| warn!(date = %record.date, error = %e, "rejected daily record"))?;

    let target = daily_target_km(monthly_target_km, date);
    Ok(DailyProgress {
        date: record.date.clone(),
        total_distance_km,
        daily_target_km: target,
        meets_daily_requirement: total_distance_km >= target,
        difference_km: total_distance_km - target,
    })
}

pub fn summarize_daily_records(
    records: &[DailyRecord],
    monthly_target_km: f64,
) -> Result<DailySummary, CalcError> {
    let rows = records
        .iter()
        .map(|r| assess_daily_record(r, monthly_target_km))
        .collect::<Result<Vec<_>, _>>()?;

    let days_met = rows.iter().filter(|r| r.meets_daily_requirement).count() as u64;
    let cumulative_distance_km: f64 = rows.iter().map(|r| r.total_distance_km).sum();
    let summary = DailySummary {
        days_missed: rows.len() as u64 - days_met,
        days_met,
        cumulative_distance_km,
        rows,
    };

    debug!(
        days = summary.rows.len(),
        days_met = summary.days_met,
        cumulative_distance_km = summary.cumulative_distance_km,
        "daily progress"
    );
    Ok(summary)
}

/// Daily progress rows against the default 7.5 km monthly target.
#[uniffi::export]
pub fn summarize_daily_distances(records: Vec<DailyRecord>) -> Result<DailySummary, CalcError> {
    summarize_daily_records(&records, crate::rates::MONTHLY_TARGET_KM)
}
