use nom::{
    bytes::complete::tag_no_case,
    character::complete::{char, multispace0},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{delimited, separated_pair, terminated},
    IResult, Parser,
};

use crate::error::CalcError;

/// A surveyed coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, uniffi::Record)]
pub struct LatLong {
    pub lat: f64,
    pub lng: f64,
}

fn ws<'a, O, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn depth_value(input: &str) -> IResult<&str, f64> {
    terminated(ws(double), opt(ws(tag_no_case("cm")))).parse(input)
}

fn lat_long_pair(input: &str) -> IResult<&str, (f64, f64)> {
    separated_pair(ws(double), char(','), ws(double)).parse(input)
}

/// Parse a depth reading such as `152`, `152.5` or `152 cm`.
#[uniffi::export]
pub fn parse_depth_cm(text: &str) -> Result<f64, CalcError> {
    let (_, depth) = all_consuming(depth_value)
        .parse(text)
        .map_err(|e| CalcError::invalid_input("depth", format!("'{}': {}", text, e)))?;

    if !depth.is_finite() {
        return Err(CalcError::invalid_input(
            "depth",
            format!("'{}' is not a finite number", text),
        ));
    }
    Ok(depth)
}

/// Parse a bare decimal number such as `0.25`.
pub fn parse_decimal(field: &str, text: &str) -> Result<f64, CalcError> {
    let (_, value) = all_consuming(ws(double))
        .parse(text)
        .map_err(|e| CalcError::invalid_input(field, format!("'{}': {}", text, e)))?;

    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            format!("'{}' is not a finite number", text),
        ));
    }
    Ok(value)
}

/// Parse a `lat,lng` coordinate string.
#[uniffi::export]
pub fn parse_lat_long(text: &str) -> Result<LatLong, CalcError> {
    let (_, (lat, lng)) = all_consuming(lat_long_pair)
        .parse(text)
        .map_err(|e| CalcError::invalid_input("latlong", format!("'{}': {}", text, e)))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(CalcError::invalid_input(
            "latlong",
            format!("latitude {} out of range", lat),
        ));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CalcError::invalid_input(
            "latlong",
            format!("longitude {} out of range", lng),
        ));
    }
    Ok(LatLong { lat, lng })
}
