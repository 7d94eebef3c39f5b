//! Stateless compute core for trenching performance reports.
//!
//! Given a machine's monthly trenched distance, its depth readings and its
//! rent, this crate computes the tiered distance penalty or incentive, the
//! per-event depth penalties and the net payable amount. All functions are
//! pure; fetching data and rendering the results belong to the caller.
//!
//! # Example
//!
//! ```
//! use trenchwork_compute::{calculate_distance_adjustment, calculate_net_cost, format_currency};
//!
//! let adjustment = calculate_distance_adjustment(6.0).expect("distance is valid");
//! let net = calculate_net_cost(
//!     100_000.0,
//!     adjustment.penalty_amount(),
//!     adjustment.incentive_amount(),
//!     1_600.0,
//! )
//! .expect("amounts are finite");
//! assert_eq!(format_currency(net), "₹3,41,600");
//! ```

pub mod cost;
pub mod daily;
pub mod depth;
pub mod distance;
pub mod error;
pub mod format;
pub mod payload;
pub mod rates;
pub mod report;

uniffi::setup_scaffolding!();

pub use cost::{calculate_net_cost, NetCostBreakdown};
pub use daily::{
    assess_daily_record, summarize_daily_distances, summarize_daily_records, DailyProgress,
    DailyRecord, DailySummary,
};
pub use depth::{
    assess_depth_event, calculate_depth_penalty_breakdown,
    calculate_depth_penalty_breakdown_with_rates, DepthAssessment, DepthBand, DepthEvent,
    DepthPenaltySummary,
};
pub use distance::{
    calculate_distance_adjustment, calculate_distance_adjustment_with_rates, calculate_incentive,
    calculate_penalty, DistanceAdjustment, DistanceBand, IncentiveBreakdown, IncentiveTier,
    PenaltyBreakdown,
};
pub use error::CalcError;
pub use format::{format_currency, format_depth, format_distance};
pub use payload::{daily_records_from_json, depth_events_from_json, LatLong};
pub use rates::RateTable;
pub use report::{
    build_monthly_report, build_monthly_report_with_rates, DepthTableRow, FormattedFigures,
    MonthlyPerformanceRecord, MonthlyReport,
};
