//! ADS-C (Automatic Dependent Surveillance–Contract) payloads.
//!
//! Three sub-grammars share the `ads-c` wire type, distinguished by their
//! leading keywords and token count:
//!
//! ```text
//! REQUEST PERIODIC <interval>
//! REPORT CANCEL
//! REPORT <callsign> <HHMMSS> <lat> <lon> <alt>
//! ```
//!
//! The keyword/arity dispatch itself lives in [`crate::parse`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fields::{Altitude, Callsign, Latitude, Longitude, ReportTime};

// ---------------------------------------------------------------------------
// AdscPositionReport
// ---------------------------------------------------------------------------

/// A single periodic ADS-C position report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdscPositionReport {
    /// The reporting aircraft's callsign.
    pub callsign: Callsign,
    /// UTC time of the report (HHMMSS).
    pub time: ReportTime,
    /// Position latitude, decimal degrees.
    pub latitude: Latitude,
    /// Position longitude, decimal degrees.
    pub longitude: Longitude,
    /// Pressure altitude in feet.
    pub altitude: Altitude,
}

impl fmt::Display for AdscPositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.callsign, self.time, self.latitude, self.longitude, self.altitude
        )
    }
}

// ---------------------------------------------------------------------------
// AdscPayload
// ---------------------------------------------------------------------------

/// The payload of an `ads-c` message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AdscPayload {
    /// Request a periodic reporting contract (`REQUEST PERIODIC <interval>`).
    PeriodicContractRequest {
        /// Reporting period in seconds; always positive.
        interval: u32,
    },
    /// Cancel the periodic contract (`REPORT CANCEL`).
    PeriodicContractCancellation,
    /// A periodic position report under an active contract.
    PeriodicReport(AdscPositionReport),
}

impl AdscPayload {
    /// Render the canonical packet body for this ADS-C variant.
    pub fn packet(&self) -> String {
        match self {
            AdscPayload::PeriodicContractRequest { interval } => {
                format!("REQUEST PERIODIC {interval}")
            }
            AdscPayload::PeriodicContractCancellation => "REPORT CANCEL".to_string(),
            AdscPayload::PeriodicReport(report) => format!("REPORT {report}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_request_packet() {
        let payload = AdscPayload::PeriodicContractRequest { interval: 120 };
        assert_eq!(payload.packet(), "REQUEST PERIODIC 120");
    }

    #[test]
    fn cancellation_packet() {
        assert_eq!(
            AdscPayload::PeriodicContractCancellation.packet(),
            "REPORT CANCEL"
        );
    }

    #[test]
    fn report_packet() {
        let report = AdscPositionReport {
            callsign: Callsign::new("DLH123"),
            time: "011820".parse().unwrap(),
            latitude: Latitude::new(-10.0).unwrap(),
            longitude: Longitude::new(10.0).unwrap(),
            altitude: Altitude::new(3000),
        };
        assert_eq!(
            AdscPayload::PeriodicReport(report).packet(),
            "REPORT DLH123 011820 -10.0000 10.0000 3000"
        );
    }
}
