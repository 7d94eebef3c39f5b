//! Decoding of survey API payloads into calculator inputs.
//!
//! The field apps are not consistent about number encoding: depths and daily
//! distances arrive either as JSON numbers or as strings such as `"152 cm"`,
//! and record lists arrive either bare or wrapped in `{ "data": [...] }`.
//!
//! # Example
//!
//! ```
//! use trenchwork_compute::payload::depth_events_from_json;
//!
//! let events = depth_events_from_json(
//!     r#"{ "data": [{ "id": 7, "depth": "148 cm", "latlong": "23.25,77.41", "created_at": "2024-06-03" }] }"#,
//! )
//! .expect("payload should decode");
//! assert_eq!(events[0].id, "7");
//! assert_eq!(events[0].depth, 148.0);
//! ```

pub mod parser;

pub use parser::{parse_decimal, parse_depth_cm, parse_lat_long, LatLong};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::daily::DailyRecord;
use crate::depth::DepthEvent;
use crate::error::CalcError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> Envelope<T> {
    fn into_records(self) -> Vec<T> {
        match self {
            Envelope::Bare(records) | Envelope::Wrapped { data: records } => records,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Integer(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Integer(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Deserialize)]
struct RawDepthEvent {
    id: RawId,
    depth: NumberOrText,
    #[serde(default)]
    latlong: String,
    #[serde(default, alias = "createdAt")]
    created_at: String,
}

#[derive(Deserialize)]
struct RawDailyRecord {
    date: String,
    #[serde(alias = "total_distance", rename = "totalDistance")]
    total_distance: NumberOrText,
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, CalcError> {
    serde_json::from_str::<Envelope<T>>(text)
        .map(Envelope::into_records)
        .map_err(|e| CalcError::MalformedPayload(e.to_string()))
}

impl NumberOrText {
    fn into_depth(self) -> Result<f64, CalcError> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(text) => parse_depth_cm(&text),
        }
    }

    fn into_decimal(self, field: &str) -> Result<f64, CalcError> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(text) => parse_decimal(field, &text),
        }
    }
}

impl TryFrom<RawDepthEvent> for DepthEvent {
    type Error = CalcError;

    fn try_from(raw: RawDepthEvent) -> Result<Self, Self::Error> {
        let depth = raw.depth.into_depth()?;
        if !raw.latlong.trim().is_empty() {
            parse_lat_long(&raw.latlong)?;
        }
        Ok(DepthEvent {
            id: raw.id.into_string(),
            depth,
            latlong: raw.latlong,
            created_at: raw.created_at,
        })
    }
}

impl TryFrom<RawDailyRecord> for DailyRecord {
    type Error = CalcError;

    fn try_from(raw: RawDailyRecord) -> Result<Self, Self::Error> {
        Ok(DailyRecord {
            date: raw.date,
            total_distance: raw.total_distance.into_decimal("total_distance")?,
        })
    }
}

/// Decode depth events from a survey API response body.
#[uniffi::export]
pub fn depth_events_from_json(text: &str) -> Result<Vec<DepthEvent>, CalcError> {
    let events = decode::<RawDepthEvent>(text)?
        .into_iter()
        .map(DepthEvent::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = events.len(), "decoded depth events");
    Ok(events)
}

/// Decode daily distance records from a machine report response body.
#[uniffi::export]
pub fn daily_records_from_json(text: &str) -> Result<Vec<DailyRecord>, CalcError> {
    let records = decode::<RawDailyRecord>(text)?
        .into_iter()
        .map(DailyRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    debug!(count = records.len(), "decoded daily records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_events_bare_array() {
        let json = r#"[
            { "id": 1, "depth": 160, "latlong": "23.25,77.41", "created_at": "2024-06-03T10:00:00Z" },
            { "id": "abc", "depth": "145.5", "latlong": "", "createdAt": "2024-06-04" }
        ]"#;
        let events = depth_events_from_json(json).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].depth, 160.0);
        assert_eq!(events[1].id, "abc");
        assert_eq!(events[1].depth, 145.5);
        assert_eq!(events[1].created_at, "2024-06-04");
    }

    #[test]
    fn test_depth_events_wrapped() {
        let json = r#"{ "data": [{ "id": 9, "depth": "110 cm" }] }"#;
        let events = depth_events_from_json(json).unwrap();
        assert_eq!(events[0].depth, 110.0);
        assert_eq!(events[0].latlong, "");
    }

    #[test]
    fn test_depth_events_bad_depth() {
        let json = r#"[{ "id": 1, "depth": "shallow" }]"#;
        let err = depth_events_from_json(json).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "depth"));
    }

    #[test]
    fn test_depth_events_bad_latlong() {
        let json = r#"[{ "id": 1, "depth": 150, "latlong": "north" }]"#;
        let err = depth_events_from_json(json).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "latlong"));
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            depth_events_from_json("{ \"rows\": [] }"),
            Err(CalcError::MalformedPayload(_))
        ));
        assert!(matches!(
            daily_records_from_json("oops"),
            Err(CalcError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_daily_records() {
        let json = r#"{ "data": [
            { "date": "2024-06-01", "totalDistance": 0.3 },
            { "date": "2024-06-02", "total_distance": "0.22" }
        ] }"#;
        let records = daily_records_from_json(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_distance, 0.3);
        assert_eq!(records[1].total_distance, 0.22);
    }
}
