//! Field-level grammar for ACARS packet tokens.
//!
//! Packet bodies are loosely structured, space-delimited text. This module
//! provides the validated newtypes shared by the message sub-grammars —
//! callsigns, airport codes, coordinates, altitudes, and the two fixed-width
//! time formats — plus whitespace token splitting.
//!
//! Every type converts both ways: [`FromStr`] parses a wire token (failing
//! with [`ParseError::InvalidField`]) and [`Display`](fmt::Display) renders
//! the canonical token, so parsing and rendering are mutually inverse.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Split a packet body into whitespace-delimited tokens.
///
/// Leading/trailing whitespace is ignored; there is no quoting or escaping.
pub fn tokens(body: &str) -> Vec<&str> {
    body.split_whitespace().collect()
}

// ---------------------------------------------------------------------------
// Callsign
// ---------------------------------------------------------------------------

/// A validated station callsign (e.g. `"DLH123"` or `"EDDF"`).
///
/// Stations are addressed by an ICAO flight number or a short facility/org
/// code: 3 to 8 uppercase ASCII alphanumeric characters.
///
/// # Examples
///
/// ```
/// use hoppielink_models::Callsign;
///
/// let cs: Callsign = "DLH123".parse().unwrap();
/// assert_eq!(cs.to_string(), "DLH123");
///
/// assert!("dlh123".parse::<Callsign>().is_err());
/// assert!("A".parse::<Callsign>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Callsign(String);

impl Callsign {
    /// Create a new callsign **without validation**.
    ///
    /// Prefer [`TryFrom`] or [`FromStr`] when the input is untrusted.
    pub fn new(callsign: &str) -> Self {
        Self(callsign.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ParseError> {
        if (3..=8).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            Ok(())
        } else {
            Err(ParseError::invalid(
                "callsign",
                s,
                "must be 3 to 8 uppercase ASCII alphanumeric characters",
            ))
        }
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Callsign {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl FromStr for Callsign {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

// ---------------------------------------------------------------------------
// AirportCode
// ---------------------------------------------------------------------------

/// A validated four-letter ICAO airport code (e.g. `"EDDF"`, `"KJFK"`).
///
/// Used by progress messages for the departure and arrival fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AirportCode(String);

impl AirportCode {
    /// Create a new airport code **without validation**.
    pub fn new(code: &str) -> Self {
        Self(code.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ParseError> {
        if s.len() == 4 && s.bytes().all(|b| b.is_ascii_uppercase()) {
            Ok(())
        } else {
            Err(ParseError::invalid(
                "airport code",
                s,
                "must be exactly 4 uppercase ASCII letters",
            ))
        }
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for AirportCode {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl FromStr for AirportCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

// ---------------------------------------------------------------------------
// Latitude / Longitude
// ---------------------------------------------------------------------------

/// Snap a coordinate to the 1e-4 degree grid used by the wire rendering.
fn quantize(degrees: f64) -> f64 {
    (degrees * 1e4).round() / 1e4
}

/// A latitude in signed decimal degrees, validated to ±90.
///
/// Renders with four decimal places, the usual precision of ADS-C position
/// reports; construction quantizes to that precision so rendering and
/// re-parsing recover the same value.
///
/// # Examples
///
/// ```
/// use hoppielink_models::Latitude;
///
/// let lat: Latitude = "-10.0000".parse().unwrap();
/// assert_eq!(lat.degrees(), -10.0);
/// assert_eq!(lat.to_string(), "-10.0000");
///
/// assert!("91.0".parse::<Latitude>().is_err());
/// assert!("north".parse::<Latitude>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Latitude(f64);

impl Latitude {
    /// Create a latitude from decimal degrees, rejecting values outside ±90.
    ///
    /// The value is quantized to the rendered 1e-4 degree precision.
    pub fn new(degrees: f64) -> Result<Self, ParseError> {
        if (-90.0..=90.0).contains(&degrees) {
            Ok(Self(quantize(degrees)))
        } else {
            Err(ParseError::invalid(
                "latitude",
                degrees.to_string(),
                "must be within -90 to 90 degrees",
            ))
        }
    }

    /// Return the value in decimal degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl FromStr for Latitude {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s
            .parse()
            .map_err(|_| ParseError::invalid("latitude", s, "not a decimal number"))?;
        Self::new(degrees).map_err(|_| {
            ParseError::invalid("latitude", s, "must be within -90 to 90 degrees")
        })
    }
}

/// A longitude in signed decimal degrees, validated to ±180.
///
/// Renders with four decimal places and quantizes on construction, like
/// [`Latitude`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Longitude(f64);

impl Longitude {
    /// Create a longitude from decimal degrees, rejecting values outside ±180.
    ///
    /// The value is quantized to the rendered 1e-4 degree precision.
    pub fn new(degrees: f64) -> Result<Self, ParseError> {
        if (-180.0..=180.0).contains(&degrees) {
            Ok(Self(quantize(degrees)))
        } else {
            Err(ParseError::invalid(
                "longitude",
                degrees.to_string(),
                "must be within -180 to 180 degrees",
            ))
        }
    }

    /// Return the value in decimal degrees.
    pub fn degrees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl FromStr for Longitude {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: f64 = s
            .parse()
            .map_err(|_| ParseError::invalid("longitude", s, "not a decimal number"))?;
        Self::new(degrees).map_err(|_| {
            ParseError::invalid("longitude", s, "must be within -180 to 180 degrees")
        })
    }
}

// ---------------------------------------------------------------------------
// Altitude
// ---------------------------------------------------------------------------

/// An altitude in feet.
///
/// Only numeric validity is enforced; the service imposes no altitude range.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Altitude(i32);

impl Altitude {
    /// Create a new altitude from a value in feet.
    pub fn new(feet: i32) -> Self {
        Self(feet)
    }

    /// Return the value in feet.
    pub fn feet(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for Altitude {
    fn from(feet: i32) -> Self {
        Self(feet)
    }
}

impl FromStr for Altitude {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let feet: i32 = s
            .parse()
            .map_err(|_| ParseError::invalid("altitude", s, "not an integer number of feet"))?;
        Ok(Self(feet))
    }
}

// ---------------------------------------------------------------------------
// ReportTime
// ---------------------------------------------------------------------------

/// A six-digit `HHMMSS` UTC timestamp as carried by ADS-C reports.
///
/// # Examples
///
/// ```
/// use hoppielink_models::ReportTime;
///
/// let t: ReportTime = "011820".parse().unwrap();
/// assert_eq!(t.to_string(), "011820");
///
/// assert!("0118".parse::<ReportTime>().is_err());
/// assert!("0118ZZ".parse::<ReportTime>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportTime(NaiveTime);

impl ReportTime {
    /// Create a report time from a [`NaiveTime`] (sub-second precision is
    /// dropped on rendering).
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Return the wrapped time of day.
    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ReportTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H%M%S"))
    }
}

impl FromStr for ReportTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::invalid(
                "timestamp",
                s,
                "must be exactly 6 digits (HHMMSS)",
            ));
        }
        let time = NaiveTime::parse_from_str(s, "%H%M%S")
            .map_err(|_| ParseError::invalid("timestamp", s, "not a valid HHMMSS time of day"))?;
        Ok(Self(time))
    }
}

// ---------------------------------------------------------------------------
// OooiTime
// ---------------------------------------------------------------------------

/// A four-digit `HHMM` UTC time as carried by progress (OOOI) messages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OooiTime(NaiveTime);

impl OooiTime {
    /// Create an OOOI time from a [`NaiveTime`] (seconds are dropped on
    /// rendering).
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Return the wrapped time of day.
    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for OooiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H%M"))
    }
}

impl FromStr for OooiTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::invalid(
                "time",
                s,
                "must be exactly 4 digits (HHMM)",
            ));
        }
        let time = NaiveTime::parse_from_str(s, "%H%M")
            .map_err(|_| ParseError::invalid("time", s, "not a valid HHMM time of day"))?;
        Ok(Self(time))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_ignore_surrounding_whitespace() {
        assert_eq!(tokens("  REPORT  CANCEL "), vec!["REPORT", "CANCEL"]);
        assert_eq!(tokens(""), Vec::<&str>::new());
    }

    #[test]
    fn callsign_accepts_flight_numbers_and_org_codes() {
        assert!("DLH123".parse::<Callsign>().is_ok());
        assert!("ATC".parse::<Callsign>().is_ok());
        assert!("SERVER".parse::<Callsign>().is_ok());
    }

    #[test]
    fn callsign_rejects_bad_shapes() {
        for bad in ["", "AB", "TOOLONGNAME", "dlh123", "DLH 12"] {
            assert!(bad.parse::<Callsign>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn airport_code_validation() {
        assert!("EDDF".parse::<AirportCode>().is_ok());
        assert!("eddf".parse::<AirportCode>().is_err());
        assert!("EDD".parse::<AirportCode>().is_err());
    }

    #[test]
    fn latitude_parses_signed_decimals() {
        let lat: Latitude = "-10.0000".parse().unwrap();
        assert!((lat.degrees() - -10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn latitude_rejects_out_of_range_and_garbage() {
        assert!(matches!(
            "90.5".parse::<Latitude>(),
            Err(ParseError::InvalidField { field: "latitude", .. })
        ));
        assert!("nan".parse::<Latitude>().is_err());
        assert!("10N".parse::<Latitude>().is_err());
    }

    #[test]
    fn longitude_range_is_wider_than_latitude() {
        assert!("120.0".parse::<Longitude>().is_ok());
        assert!("180.0".parse::<Longitude>().is_ok());
        assert!("-181.0".parse::<Longitude>().is_err());
    }

    #[test]
    fn coordinates_quantize_to_the_rendered_precision() {
        let lat = Latitude::new(10.12346).unwrap();
        assert_eq!(lat.to_string(), "10.1235");
        assert_eq!(lat.to_string().parse::<Latitude>().unwrap(), lat);

        let lon = Longitude::new(-73.987654).unwrap();
        assert_eq!(lon.to_string().parse::<Longitude>().unwrap(), lon);
    }

    #[test]
    fn coordinate_rendering_uses_four_decimals() {
        let lat = Latitude::new(-10.0).unwrap();
        let lon = Longitude::new(10.0).unwrap();
        assert_eq!(lat.to_string(), "-10.0000");
        assert_eq!(lon.to_string(), "10.0000");
    }

    #[test]
    fn altitude_parses_plain_integers() {
        assert_eq!("3000".parse::<Altitude>().unwrap(), Altitude::new(3000));
        assert_eq!("-100".parse::<Altitude>().unwrap(), Altitude::new(-100));
        assert!("FL300".parse::<Altitude>().is_err());
    }

    #[test]
    fn report_time_roundtrip() {
        let t: ReportTime = "011820".parse().unwrap();
        assert_eq!(t.to_string(), "011820");
        assert_eq!(t.to_string().parse::<ReportTime>().unwrap(), t);
    }

    #[test]
    fn report_time_rejects_wrong_length_and_content() {
        assert!("0118".parse::<ReportTime>().is_err());
        assert!("01182000".parse::<ReportTime>().is_err());
        assert!("01:18:20".parse::<ReportTime>().is_err());
        // 25th hour is six digits but not a time of day.
        assert!("251820".parse::<ReportTime>().is_err());
    }

    #[test]
    fn oooi_time_roundtrip() {
        let t: OooiTime = "1820".parse().unwrap();
        assert_eq!(t.to_string(), "1820");
        assert!("182".parse::<OooiTime>().is_err());
        assert!("2560".parse::<OooiTime>().is_err());
    }
}
