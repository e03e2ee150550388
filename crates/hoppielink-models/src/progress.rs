//! OOOI progress report payload.
//!
//! A progress packet carries the departure/arrival airport pair followed by
//! the out-off-on-in movement times that are known so far, plus an optional
//! ETA:
//!
//! ```text
//! EDDF/EDDH OUT/1200 OFF/1210 ON/1455 IN/1502 ETA/1500
//! ```
//!
//! Only `OUT` is mandatory; the later movement times build on each other
//! (`ON` requires `OFF`, `IN` requires `ON`).

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::fields::{AirportCode, OooiTime};

/// The payload of a `progress` message.
///
/// # Examples
///
/// ```
/// use hoppielink_models::ProgressPayload;
///
/// let dep = "EDDF".parse().unwrap();
/// let arr = "EDDH".parse().unwrap();
/// let progress = ProgressPayload::new(
///     dep,
///     arr,
///     "1200".parse().unwrap(),
///     Some("1210".parse().unwrap()),
///     None,
///     None,
///     Some("1455".parse().unwrap()),
/// )
/// .unwrap();
/// assert_eq!(progress.packet(), "EDDF/EDDH OUT/1200 OFF/1210 ETA/1455");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressPayload {
    departure: AirportCode,
    arrival: AirportCode,
    time_out: OooiTime,
    time_off: Option<OooiTime>,
    time_on: Option<OooiTime>,
    time_in: Option<OooiTime>,
    eta: Option<OooiTime>,
}

impl ProgressPayload {
    /// Create a progress payload, validating the OOOI sequence.
    ///
    /// `time_on` without `time_off`, or `time_in` without `time_on`, is a
    /// field validation error: an aircraft cannot land before taking off.
    #[allow(clippy::similar_names)]
    pub fn new(
        departure: AirportCode,
        arrival: AirportCode,
        time_out: OooiTime,
        time_off: Option<OooiTime>,
        time_on: Option<OooiTime>,
        time_in: Option<OooiTime>,
        eta: Option<OooiTime>,
    ) -> Result<Self, ParseError> {
        if time_on.is_some() && time_off.is_none() {
            return Err(ParseError::invalid(
                "time on",
                time_on.map(|t| t.to_string()).unwrap_or_default(),
                "requires a time off",
            ));
        }
        if time_in.is_some() && time_on.is_none() {
            return Err(ParseError::invalid(
                "time in",
                time_in.map(|t| t.to_string()).unwrap_or_default(),
                "requires a time on",
            ));
        }
        Ok(Self {
            departure,
            arrival,
            time_out,
            time_off,
            time_on,
            time_in,
            eta,
        })
    }

    /// Departure airport.
    pub fn departure(&self) -> &AirportCode {
        &self.departure
    }

    /// Arrival airport.
    pub fn arrival(&self) -> &AirportCode {
        &self.arrival
    }

    /// Out-of-the-gate time (always present).
    pub fn time_out(&self) -> OooiTime {
        self.time_out
    }

    /// Takeoff time, once airborne.
    pub fn time_off(&self) -> Option<OooiTime> {
        self.time_off
    }

    /// Landing time, once on the ground.
    pub fn time_on(&self) -> Option<OooiTime> {
        self.time_on
    }

    /// In-the-gate time, once parked.
    pub fn time_in(&self) -> Option<OooiTime> {
        self.time_in
    }

    /// Estimated time of arrival.
    pub fn eta(&self) -> Option<OooiTime> {
        self.eta
    }

    /// Render the canonical packet body.
    pub fn packet(&self) -> String {
        let mut out = format!(
            "{}/{} OUT/{}",
            self.departure, self.arrival, self.time_out
        );
        for (key, time) in [
            ("OFF", self.time_off),
            ("ON", self.time_on),
            ("IN", self.time_in),
            ("ETA", self.eta),
        ] {
            if let Some(time) = time {
                // Infallible; writing to a String cannot fail.
                let _ = write!(out, " {key}/{time}");
            }
        }
        out
    }
}

impl fmt::Display for ProgressPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.packet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airports() -> (AirportCode, AirportCode) {
        ("EDDF".parse().unwrap(), "EDDH".parse().unwrap())
    }

    #[test]
    fn minimal_packet_has_only_out() {
        let (dep, arr) = airports();
        let progress =
            ProgressPayload::new(dep, arr, "1200".parse().unwrap(), None, None, None, None)
                .unwrap();
        assert_eq!(progress.packet(), "EDDF/EDDH OUT/1200");
    }

    #[test]
    fn full_oooi_packet() {
        let (dep, arr) = airports();
        let progress = ProgressPayload::new(
            dep,
            arr,
            "1200".parse().unwrap(),
            Some("1210".parse().unwrap()),
            Some("1455".parse().unwrap()),
            Some("1502".parse().unwrap()),
            None,
        )
        .unwrap();
        assert_eq!(
            progress.packet(),
            "EDDF/EDDH OUT/1200 OFF/1210 ON/1455 IN/1502"
        );
    }

    #[test]
    fn oooi_sequence_is_enforced() {
        let (dep, arr) = airports();
        let on_without_off = ProgressPayload::new(
            dep.clone(),
            arr.clone(),
            "1200".parse().unwrap(),
            None,
            Some("1455".parse().unwrap()),
            None,
            None,
        );
        assert!(on_without_off.is_err());

        let in_without_on = ProgressPayload::new(
            dep,
            arr,
            "1200".parse().unwrap(),
            Some("1210".parse().unwrap()),
            None,
            Some("1502".parse().unwrap()),
            None,
        );
        assert!(in_without_on.is_err());
    }
}
