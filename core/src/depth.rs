//! Trench depth classification and per-event penalties.
//!
//! Each depth measurement is compared with the 165 cm standard and charged a
//! flat amount by band. Critical readings are counted and flagged but carry no
//! amount of their own.

use tracing::{debug, warn};

use crate::error::{ensure_finite, CalcError};
use crate::rates::RateTable;

/// Severity of a single depth reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum DepthBand {
    /// 165 cm or deeper
    Standard,
    /// 150-164 cm
    Minor,
    /// 120-149 cm
    Major,
    /// Under 120 cm
    Critical,
}

impl DepthBand {
    pub fn classify(depth_cm: f64, rates: &RateTable) -> Self {
        if depth_cm >= rates.standard_depth_cm {
            DepthBand::Standard
        } else if depth_cm >= rates.minor_depth_floor_cm {
            DepthBand::Minor
        } else if depth_cm >= rates.major_depth_floor_cm {
            DepthBand::Major
        } else {
            DepthBand::Critical
        }
    }

    /// Flat amount charged for one event in this band.
    pub fn penalty(&self, rates: &RateTable) -> f64 {
        match self {
            DepthBand::Standard | DepthBand::Critical => 0.0,
            DepthBand::Minor => rates.minor_depth_penalty,
            DepthBand::Major => rates.major_depth_penalty,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepthBand::Standard => "Standard",
            DepthBand::Minor => "Minor Violation",
            DepthBand::Major => "Major Violation",
            DepthBand::Critical => "Critical",
        }
    }
}

/// A trench depth measurement reported from the field.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DepthEvent {
    pub id: String,
    pub depth: f64,
    /// "lat,lng" as captured by the survey app
    pub latlong: String,
    pub created_at: String,
}

/// Classification of one event, as shown in a depth table row.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DepthAssessment {
    pub event_id: String,
    pub depth_cm: f64,
    pub band: DepthBand,
    /// How far the reading falls short of the standard depth, for display only
    pub shortfall_cm: f64,
    pub penalty_amount: f64,
    pub is_critical: bool,
}

/// Aggregate of all depth events for a reporting period.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DepthPenaltySummary {
    pub total_depth_events: u64,
    pub details: Vec<DepthEvent>,
    pub assessments: Vec<DepthAssessment>,
    pub standard_events: u64,
    /// Minor-band events and their amount
    pub penalty500_events: u64,
    pub penalty500_amount: f64,
    /// Major-band events and their amount
    pub penalty1100_events: u64,
    pub penalty1100_amount: f64,
    /// Critical-band events; not part of `total_depth_penalty`
    pub critical_events: u64,
    pub total_depth_penalty: f64,
}

impl DepthPenaltySummary {
    pub fn empty() -> Self {
        DepthPenaltySummary {
            total_depth_events: 0,
            details: Vec::new(),
            assessments: Vec::new(),
            standard_events: 0,
            penalty500_events: 0,
            penalty500_amount: 0.0,
            penalty1100_events: 0,
            penalty1100_amount: 0.0,
            critical_events: 0,
            total_depth_penalty: 0.0,
        }
    }

    pub fn has_critical_events(&self) -> bool {
        self.critical_events > 0
    }
}

fn assess(rates: &RateTable, event: &DepthEvent) -> Result<DepthAssessment, CalcError> {
    let depth_cm = ensure_finite("depth", event.depth).map_err(|_| {
        warn!(event_id = %event.id, depth = event.depth, "rejected depth event");
        CalcError::invalid_input(
            "depth",
            format!("event {} has non-finite depth {}", event.id, event.depth),
        )
    })?;

    let band = DepthBand::classify(depth_cm, rates);
    Ok(DepthAssessment {
        event_id: event.id.clone(),
        depth_cm,
        band,
        shortfall_cm: (rates.standard_depth_cm - depth_cm).max(0.0),
        penalty_amount: band.penalty(rates),
        is_critical: band == DepthBand::Critical,
    })
}

pub fn assess_depth_event_with_rates(
    rates: &RateTable,
    event: &DepthEvent,
) -> Result<DepthAssessment, CalcError> {
    rates.validate()?;
    assess(rates, event)
}

pub fn calculate_depth_penalty_breakdown_with_rates(
    rates: &RateTable,
    events: &[DepthEvent],
) -> Result<DepthPenaltySummary, CalcError> {
    rates.validate()?;
    let mut summary = DepthPenaltySummary::empty();

    for event in events {
        let assessment = assess(rates, event)?;
        match assessment.band {
            DepthBand::Standard => summary.standard_events += 1,
            DepthBand::Minor => summary.penalty500_events += 1,
            DepthBand::Major => summary.penalty1100_events += 1,
            DepthBand::Critical => summary.critical_events += 1,
        }
        summary.assessments.push(assessment);
    }

    summary.total_depth_events = events.len() as u64;
    summary.details = events.to_vec();
    summary.penalty500_amount = summary.penalty500_events as f64 * rates.minor_depth_penalty;
    summary.penalty1100_amount = summary.penalty1100_events as f64 * rates.major_depth_penalty;
    summary.total_depth_penalty = summary.penalty500_amount + summary.penalty1100_amount;

    if summary.has_critical_events() {
        warn!(
            critical_events = summary.critical_events,
            "depth events below the critical floor"
        );
    }
    debug!(
        events = summary.total_depth_events,
        minor = summary.penalty500_events,
        major = summary.penalty1100_events,
        total = summary.total_depth_penalty,
        "depth penalty breakdown"
    );

    Ok(summary)
}

/// Band, shortfall and amount for one event at the default rates.
#[uniffi::export]
pub fn assess_depth_event(event: DepthEvent) -> Result<DepthAssessment, CalcError> {
    assess_depth_event_with_rates(&RateTable::default(), &event)
}

/// Per-band counts and amounts for a set of events at the default rates.
#[uniffi::export]
pub fn calculate_depth_penalty_breakdown(
    events: Vec<DepthEvent>,
) -> Result<DepthPenaltySummary, CalcError> {
    calculate_depth_penalty_breakdown_with_rates(&RateTable::default(), &events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, depth: f64) -> DepthEvent {
        DepthEvent {
            id: id.to_string(),
            depth,
            latlong: "23.2599,77.4126".to_string(),
            created_at: "2024-06-03T10:15:00Z".to_string(),
        }
    }

    #[test]
    fn test_depth_band_boundaries() {
        let rates = RateTable::default();
        assert_eq!(DepthBand::classify(165.0, &rates), DepthBand::Standard);
        assert_eq!(DepthBand::classify(200.0, &rates), DepthBand::Standard);
        assert_eq!(DepthBand::classify(164.0, &rates), DepthBand::Minor);
        assert_eq!(DepthBand::classify(150.0, &rates), DepthBand::Minor);
        assert_eq!(DepthBand::classify(149.0, &rates), DepthBand::Major);
        assert_eq!(DepthBand::classify(149.5, &rates), DepthBand::Major);
        assert_eq!(DepthBand::classify(120.0, &rates), DepthBand::Major);
        assert_eq!(DepthBand::classify(119.0, &rates), DepthBand::Critical);
        assert_eq!(DepthBand::classify(-4.0, &rates), DepthBand::Critical);
    }

    #[test]
    fn test_band_penalties() {
        let rates = RateTable::default();
        assert_eq!(DepthBand::Standard.penalty(&rates), 0.0);
        assert_eq!(DepthBand::Minor.penalty(&rates), 500.0);
        assert_eq!(DepthBand::Major.penalty(&rates), 1_100.0);
        assert_eq!(DepthBand::Critical.penalty(&rates), 0.0);
    }

    #[test]
    fn test_assess_event() {
        let assessment = assess_depth_event(event("d-1", 145.0)).unwrap();
        assert_eq!(assessment.band, DepthBand::Major);
        assert_eq!(assessment.shortfall_cm, 20.0);
        assert_eq!(assessment.penalty_amount, 1_100.0);
        assert!(!assessment.is_critical);

        let assessment = assess_depth_event(event("d-2", 170.0)).unwrap();
        assert_eq!(assessment.shortfall_cm, 0.0);
        assert_eq!(assessment.penalty_amount, 0.0);

        let assessment = assess_depth_event(event("d-3", 110.0)).unwrap();
        assert!(assessment.is_critical);
        assert_eq!(assessment.shortfall_cm, 55.0);
        assert_eq!(assessment.penalty_amount, 0.0);
    }

    #[test]
    fn test_breakdown_mixed_events() {
        let events = vec![
            event("a", 165.0),
            event("b", 160.0),
            event("c", 145.0),
            event("d", 110.0),
        ];
        let summary = calculate_depth_penalty_breakdown(events.clone()).unwrap();

        assert_eq!(summary.total_depth_events, 4);
        assert_eq!(summary.details, events);
        assert_eq!(summary.standard_events, 1);
        assert_eq!(summary.penalty500_events, 1);
        assert_eq!(summary.penalty500_amount, 500.0);
        assert_eq!(summary.penalty1100_events, 1);
        assert_eq!(summary.penalty1100_amount, 1_100.0);
        assert_eq!(summary.critical_events, 1);
        assert_eq!(summary.total_depth_penalty, 1_600.0);
        assert!(summary.has_critical_events());
        assert_eq!(summary.assessments.len(), 4);
        assert_eq!(summary.assessments[3].event_id, "d");
    }

    #[test]
    fn test_breakdown_empty() {
        let summary = calculate_depth_penalty_breakdown(vec![]).unwrap();
        assert_eq!(summary, DepthPenaltySummary::empty());
        assert!(!summary.has_critical_events());
    }

    #[test]
    fn test_with_rates_rejects_invalid_table() {
        let rates = RateTable {
            minor_depth_floor_cm: 170.0,
            ..RateTable::default()
        };
        assert!(matches!(
            assess_depth_event_with_rates(&rates, &event("a", 160.0)),
            Err(CalcError::InvalidRateTable(_))
        ));
        assert!(matches!(
            calculate_depth_penalty_breakdown_with_rates(&rates, &[event("a", 160.0)]),
            Err(CalcError::InvalidRateTable(_))
        ));
    }

    #[test]
    fn test_breakdown_rejects_nan_depth() {
        let events = vec![event("ok", 160.0), event("bad", f64::NAN)];
        let err = calculate_depth_penalty_breakdown(events).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
