//! CPDLC (Controller–Pilot Data Link Communications) payload.
//!
//! On the wire a CPDLC packet is a slash-delimited record:
//!
//! ```text
//! /data2/<min>/<mrn>/<response attr>/<message text>
//! ```
//!
//! where `<mrn>` is empty for a dialogue-opening message and the message
//! text may itself contain slashes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// ResponseAttribute
// ---------------------------------------------------------------------------

/// ICAO response attribute — dictates which replies are valid for closing
/// a CPDLC dialogue.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
pub enum ResponseAttribute {
    /// Wilco / Unable / Standby.
    WU,
    /// Affirm / Negative / Standby.
    AN,
    /// Roger / Unable / Standby.
    R,
    /// Any CPDLC message carrying the requested data closes the dialogue.
    Y,
    /// No response required — dialogue closed immediately.
    N,
    /// Not Enabled (FANS 1/A specific) — system closes immediately.
    NE,
}

// ---------------------------------------------------------------------------
// CpdlcPayload
// ---------------------------------------------------------------------------

/// A single CPDLC message element with its dialogue bookkeeping numbers.
///
/// # Examples
///
/// ```
/// use hoppielink_models::{CpdlcPayload, ResponseAttribute};
///
/// let msg = CpdlcPayload::new(2, None, ResponseAttribute::WU, "CLIMB TO FL350").unwrap();
/// assert_eq!(msg.packet(), "/data2/2//WU/CLIMB TO FL350");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CpdlcPayload {
    min: u8,
    mrn: Option<u8>,
    response_attr: ResponseAttribute,
    text: String,
}

impl CpdlcPayload {
    /// Create a CPDLC payload, validating the dialogue numbers.
    ///
    /// `min` and `mrn` are Message Identification / Reference Numbers and
    /// must be within 0–63; `mrn` is `None` for a dialogue-opening message.
    pub fn new(
        min: u8,
        mrn: Option<u8>,
        response_attr: ResponseAttribute,
        text: &str,
    ) -> Result<Self, ParseError> {
        if min > 63 {
            return Err(ParseError::invalid(
                "message identification number",
                min.to_string(),
                "must be within 0 to 63",
            ));
        }
        if let Some(mrn) = mrn {
            if mrn > 63 {
                return Err(ParseError::invalid(
                    "message reference number",
                    mrn.to_string(),
                    "must be within 0 to 63",
                ));
            }
        }
        Ok(Self {
            min,
            mrn,
            response_attr,
            text: text.to_string(),
        })
    }

    /// Message Identification Number (0–63), assigned by the sender.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Message Reference Number — the MIN of the message being replied to.
    pub fn mrn(&self) -> Option<u8> {
        self.mrn
    }

    /// The expected-reply attribute.
    pub fn response_attr(&self) -> ResponseAttribute {
        self.response_attr
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the canonical `/data2/…` packet body.
    pub fn packet(&self) -> String {
        let mrn = self.mrn.map(|m| m.to_string()).unwrap_or_default();
        format!(
            "/data2/{}/{}/{}/{}",
            self.min, mrn, self.response_attr, self.text
        )
    }
}

impl fmt::Display for CpdlcPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.packet())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packet_with_and_without_mrn() {
        let opening = CpdlcPayload::new(5, None, ResponseAttribute::Y, "REQUEST FL350").unwrap();
        assert_eq!(opening.packet(), "/data2/5//Y/REQUEST FL350");

        let reply = CpdlcPayload::new(6, Some(5), ResponseAttribute::N, "UNABLE").unwrap();
        assert_eq!(reply.packet(), "/data2/6/5/N/UNABLE");
    }

    #[test]
    fn dialogue_numbers_are_bounded() {
        assert!(CpdlcPayload::new(64, None, ResponseAttribute::N, "X").is_err());
        assert!(CpdlcPayload::new(0, Some(64), ResponseAttribute::N, "X").is_err());
        assert!(CpdlcPayload::new(63, Some(63), ResponseAttribute::N, "X").is_ok());
    }

    #[test]
    fn response_attribute_wire_tags() {
        assert_eq!(ResponseAttribute::WU.to_string(), "WU");
        assert_eq!("AN".parse::<ResponseAttribute>(), Ok(ResponseAttribute::AN));
        assert!("W/U".parse::<ResponseAttribute>().is_err());
    }
}
