//! Packet-body parsers: the inverse of each payload's `packet()` rendering.
//!
//! Dispatch is keyword + arity driven and **committed**: once a grammar's
//! keyword pattern has matched, field failures surface as
//! [`ParseError::InvalidField`] instead of falling through to another
//! grammar. Only inputs matching no keyword pattern at all produce
//! [`ParseError::UnknownFormat`], so callers can distinguish "not this
//! protocol" from "this protocol but malformed".

use crate::adsc::{AdscPayload, AdscPositionReport};
use crate::cpdlc::CpdlcPayload;
use crate::error::ParseError;
use crate::fields::{self, AirportCode, Callsign, OooiTime};
use crate::message::{
    AcarsMessage, MessageType, Payload, PingPayload, PositionPayload, TelexPayload,
};
use crate::progress::ProgressPayload;

/// Parse a raw station-to-station packet into a typed [`AcarsMessage`].
///
/// `msg_type` is the wire type tag accompanying the packet; `from` and `to`
/// are the station callsigns from the transport record.
///
/// # Errors
///
/// [`ParseError::UnknownFormat`] when the body matches no known grammar for
/// the type, [`ParseError::InvalidField`] when a grammar matched but a field
/// failed validation. Both are recoverable; no partially constructed message
/// is ever returned.
pub fn parse_packet(
    msg_type: MessageType,
    from: &str,
    to: &str,
    packet: &str,
) -> Result<AcarsMessage, ParseError> {
    let from: Callsign = from.parse()?;
    let to: Callsign = to.parse()?;
    let payload = parse_payload(msg_type, packet)?;
    Ok(AcarsMessage::new(from, to, payload))
}

/// Parse a packet body under a known wire type tag.
pub fn parse_payload(msg_type: MessageType, packet: &str) -> Result<Payload, ParseError> {
    match msg_type {
        MessageType::Telex => TelexPayload::new(packet).map(Payload::Telex),
        MessageType::Progress => parse_progress(packet).map(Payload::Progress),
        MessageType::Position => Ok(Payload::Position(PositionPayload::new(packet))),
        MessageType::Cpdlc => parse_cpdlc(packet).map(Payload::Cpdlc),
        MessageType::AdsC => parse_adsc(packet).map(Payload::Adsc),
        MessageType::Poll => Ok(Payload::Poll),
        MessageType::Peek => Ok(Payload::Peek),
        MessageType::Ping => parse_ping(packet).map(Payload::Ping),
    }
}

/// Parse an ADS-C packet body.
///
/// Grammars in priority order, more specific first:
///
/// 1. `REQUEST PERIODIC <interval>` — the `REQUEST PERIODIC` keywords commit
///    the dispatch; a missing, extra, or non-numeric interval token is a
///    field error.
/// 2. `REPORT CANCEL` (exactly two tokens).
/// 3. `REPORT <callsign> <HHMMSS> <lat> <lon> <alt>` (exactly six tokens);
///    bad timestamp/coordinate/altitude fields propagate as field errors,
///    never silently downgraded to another variant.
/// 4. Anything else — including `REQUEST` with an unknown second keyword,
///    and `REPORT` at an arity that selects neither sub-grammar — is an
///    unknown format.
pub fn parse_adsc(packet: &str) -> Result<AdscPayload, ParseError> {
    match fields::tokens(packet).as_slice() {
        ["REQUEST", "PERIODIC", rest @ ..] => {
            let [interval] = rest else {
                return Err(ParseError::invalid(
                    "reporting interval",
                    packet,
                    "expected exactly one interval token",
                ));
            };
            let interval: u32 = interval.parse().map_err(|_| {
                ParseError::invalid(
                    "reporting interval",
                    *interval,
                    "must be a positive integer",
                )
            })?;
            if interval == 0 {
                return Err(ParseError::invalid(
                    "reporting interval",
                    "0",
                    "must be a positive integer",
                ));
            }
            Ok(AdscPayload::PeriodicContractRequest { interval })
        }
        ["REPORT", "CANCEL"] => Ok(AdscPayload::PeriodicContractCancellation),
        ["REPORT", callsign, time, latitude, longitude, altitude] => {
            Ok(AdscPayload::PeriodicReport(AdscPositionReport {
                callsign: callsign.parse()?,
                time: time.parse()?,
                latitude: latitude.parse()?,
                longitude: longitude.parse()?,
                altitude: altitude.parse()?,
            }))
        }
        _ => Err(ParseError::unknown(packet)),
    }
}

/// Parse a CPDLC `/data2/<min>/<mrn>/<response attr>/<text>` packet body.
///
/// The `/data2/` prefix commits the dispatch; the message text keeps any
/// embedded slashes.
pub fn parse_cpdlc(packet: &str) -> Result<CpdlcPayload, ParseError> {
    let Some(rest) = packet.strip_prefix("/data2/") else {
        return Err(ParseError::unknown(packet));
    };
    let mut sections = rest.splitn(4, '/');
    let (Some(min), Some(mrn), Some(attr), Some(text)) = (
        sections.next(),
        sections.next(),
        sections.next(),
        sections.next(),
    ) else {
        return Err(ParseError::invalid(
            "cpdlc packet",
            packet,
            "expected /data2/<min>/<mrn>/<response attr>/<text>",
        ));
    };
    let min: u8 = min.parse().map_err(|_| {
        ParseError::invalid(
            "message identification number",
            min,
            "must be an integer within 0 to 63",
        )
    })?;
    let mrn: Option<u8> = if mrn.is_empty() {
        None
    } else {
        Some(mrn.parse().map_err(|_| {
            ParseError::invalid(
                "message reference number",
                mrn,
                "must be an integer within 0 to 63",
            )
        })?)
    };
    let response_attr = attr.parse().map_err(|_| {
        ParseError::invalid(
            "response attribute",
            attr,
            "must be one of WU, AN, R, Y, N, NE",
        )
    })?;
    CpdlcPayload::new(min, mrn, response_attr, text)
}

/// Parse an OOOI progress packet body.
///
/// A first token of the shape `DEP/ARR` commits the dispatch; the remaining
/// tokens must be `OUT/`, `OFF/`, `ON/`, `IN/`, or `ETA/` times, each at
/// most once, with `OUT` mandatory.
pub fn parse_progress(packet: &str) -> Result<ProgressPayload, ParseError> {
    let tokens = fields::tokens(packet);
    let Some((first, rest)) = tokens.split_first() else {
        return Err(ParseError::unknown(packet));
    };
    let Some((dep, arr)) = first.split_once('/') else {
        return Err(ParseError::unknown(packet));
    };
    // The airport pair is the keyword pattern; a first token that is not
    // DEP/ARR selects no grammar rather than failing a committed one.
    let (Ok(departure), Ok(arrival)) = (dep.parse::<AirportCode>(), arr.parse::<AirportCode>())
    else {
        return Err(ParseError::unknown(packet));
    };

    let mut time_out: Option<OooiTime> = None;
    let mut time_off: Option<OooiTime> = None;
    let mut time_on: Option<OooiTime> = None;
    let mut time_in: Option<OooiTime> = None;
    let mut eta: Option<OooiTime> = None;
    for token in rest {
        let Some((key, value)) = token.split_once('/') else {
            return Err(ParseError::invalid(
                "progress field",
                *token,
                "expected KEY/HHMM",
            ));
        };
        let slot = match key {
            "OUT" => &mut time_out,
            "OFF" => &mut time_off,
            "ON" => &mut time_on,
            "IN" => &mut time_in,
            "ETA" => &mut eta,
            _ => {
                return Err(ParseError::invalid(
                    "progress field",
                    *token,
                    "unknown field key",
                ));
            }
        };
        if slot.is_some() {
            return Err(ParseError::invalid(
                "progress field",
                *token,
                "field given more than once",
            ));
        }
        *slot = Some(value.parse()?);
    }
    let Some(time_out) = time_out else {
        return Err(ParseError::invalid(
            "time out",
            packet,
            "OUT time is mandatory",
        ));
    };
    ProgressPayload::new(departure, arrival, time_out, time_off, time_on, time_in, eta)
}

/// Parse a ping packet body: `*`, or zero or more station callsigns.
pub fn parse_ping(packet: &str) -> Result<PingPayload, ParseError> {
    if packet.trim() == "*" {
        return Ok(PingPayload::All);
    }
    let stations = fields::tokens(packet)
        .into_iter()
        .map(str::parse)
        .collect::<Result<Vec<Callsign>, _>>()?;
    Ok(PingPayload::Stations(stations))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpdlc::ResponseAttribute;
    use crate::fields::{Altitude, Latitude, Longitude};

    #[test]
    fn periodic_contract_request() {
        let msg = parse_packet(MessageType::AdsC, "ATC", "DLH123", "REQUEST PERIODIC 120").unwrap();
        assert_eq!(
            msg.payload,
            Payload::Adsc(AdscPayload::PeriodicContractRequest { interval: 120 })
        );
    }

    #[test]
    fn periodic_report() {
        let msg = parse_packet(
            MessageType::AdsC,
            "DLH123",
            "ATC",
            "REPORT DLH123 011820 -10.0000 10.00000 3000",
        )
        .unwrap();
        let Payload::Adsc(AdscPayload::PeriodicReport(report)) = msg.payload else {
            panic!("expected a periodic report, got {:?}", msg.payload);
        };
        assert_eq!(report.callsign.as_str(), "DLH123");
        assert_eq!(report.time.to_string(), "011820");
        assert_eq!(report.latitude, Latitude::new(-10.0).unwrap());
        assert_eq!(report.longitude, Longitude::new(10.0).unwrap());
        assert_eq!(report.altitude, Altitude::new(3000));
    }

    #[test]
    fn periodic_contract_cancellation() {
        let msg = parse_packet(MessageType::AdsC, "DLH123", "ATC", "REPORT CANCEL").unwrap();
        assert_eq!(
            msg.payload,
            Payload::Adsc(AdscPayload::PeriodicContractCancellation)
        );
    }

    #[test]
    fn unknown_request_keyword_is_unknown_format() {
        // Second token selects no sub-grammar under REQUEST.
        assert!(matches!(
            parse_adsc("REQUEST EVENT"),
            Err(ParseError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn bad_interval_is_a_field_error_not_unknown_format() {
        // The REQUEST PERIODIC keywords commit the dispatch.
        assert!(matches!(
            parse_adsc("REQUEST PERIODIC abc"),
            Err(ParseError::InvalidField { field: "reporting interval", .. })
        ));
        assert!(matches!(
            parse_adsc("REQUEST PERIODIC 0"),
            Err(ParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_adsc("REQUEST PERIODIC"),
            Err(ParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_adsc("REQUEST PERIODIC 120 240"),
            Err(ParseError::InvalidField { .. })
        ));
    }

    #[test]
    fn bad_report_fields_propagate_as_field_errors() {
        assert!(matches!(
            parse_adsc("REPORT DLH123 0118 -10.0 10.0 3000"),
            Err(ParseError::InvalidField { field: "timestamp", .. })
        ));
        assert!(matches!(
            parse_adsc("REPORT DLH123 011820 -95.0 10.0 3000"),
            Err(ParseError::InvalidField { field: "latitude", .. })
        ));
        assert!(matches!(
            parse_adsc("REPORT DLH123 011820 -10.0 10.0 THREE"),
            Err(ParseError::InvalidField { field: "altitude", .. })
        ));
    }

    #[test]
    fn report_at_other_arities_is_unknown_format() {
        assert!(matches!(
            parse_adsc("REPORT DLH123 011820"),
            Err(ParseError::UnknownFormat { .. })
        ));
        assert!(matches!(
            parse_adsc(""),
            Err(ParseError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn adsc_roundtrip() {
        for packet in [
            "REQUEST PERIODIC 120",
            "REPORT CANCEL",
            "REPORT DLH123 011820 -10.0000 10.0000 3000",
        ] {
            let payload = parse_adsc(packet).unwrap();
            assert_eq!(payload.packet(), packet);
            assert_eq!(parse_adsc(&payload.packet()).unwrap(), payload);
        }
    }

    #[test]
    fn report_with_high_precision_coordinates_roundtrips() {
        let report = AdscPositionReport {
            callsign: Callsign::new("DLH123"),
            time: "011820".parse().unwrap(),
            latitude: Latitude::new(10.12345).unwrap(),
            longitude: Longitude::new(-73.987654).unwrap(),
            altitude: Altitude::new(3000),
        };
        let payload = AdscPayload::PeriodicReport(report);
        assert_eq!(parse_adsc(&payload.packet()).unwrap(), payload);
    }

    #[test]
    fn cpdlc_roundtrip_with_and_without_mrn() {
        for packet in [
            "/data2/2//WU/CLIMB TO FL350",
            "/data2/3/2/N/WILCO",
            "/data2/10//Y/REQUEST DIRECT TO EDDF VIA N0450/F350",
        ] {
            let payload = parse_cpdlc(packet).unwrap();
            assert_eq!(payload.packet(), packet);
        }
    }

    #[test]
    fn cpdlc_prefix_mismatch_is_unknown_format() {
        assert!(matches!(
            parse_cpdlc("CLIMB TO FL350"),
            Err(ParseError::UnknownFormat { .. })
        ));
        assert!(matches!(
            parse_cpdlc("/data3/1//N/HELLO"),
            Err(ParseError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn cpdlc_field_errors_after_committed_prefix() {
        assert!(matches!(
            parse_cpdlc("/data2/XX//WU/CLIMB"),
            Err(ParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_cpdlc("/data2/1//Q/CLIMB"),
            Err(ParseError::InvalidField { field: "response attribute", .. })
        ));
        assert!(matches!(
            parse_cpdlc("/data2/1/WU"),
            Err(ParseError::InvalidField { field: "cpdlc packet", .. })
        ));
    }

    #[test]
    fn cpdlc_fields_are_extracted() {
        let payload = parse_cpdlc("/data2/6/5/AN/AFFIRM").unwrap();
        assert_eq!(payload.min(), 6);
        assert_eq!(payload.mrn(), Some(5));
        assert_eq!(payload.response_attr(), ResponseAttribute::AN);
        assert_eq!(payload.text(), "AFFIRM");
    }

    #[test]
    fn progress_roundtrip() {
        for packet in [
            "EDDF/EDDH OUT/1200",
            "EDDF/EDDH OUT/1200 OFF/1210 ETA/1455",
            "EDDF/EDDH OUT/1200 OFF/1210 ON/1455 IN/1502",
        ] {
            let payload = parse_progress(packet).unwrap();
            assert_eq!(payload.packet(), packet);
        }
    }

    #[test]
    fn progress_without_airport_pair_is_unknown_format() {
        assert!(matches!(
            parse_progress("OUT/1200"),
            Err(ParseError::UnknownFormat { .. })
        ));
        assert!(matches!(
            parse_progress(""),
            Err(ParseError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn progress_field_errors_after_committed_airport_pair() {
        assert!(parse_progress("EDDF/EDDH").is_err()); // OUT missing
        assert!(matches!(
            parse_progress("EDDF/EDDH OUT/1200 OUT/1300"),
            Err(ParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_progress("EDDF/EDDH OUT/1200 VIA/1300"),
            Err(ParseError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_progress("EDDF/EDDH OUT/12"),
            Err(ParseError::InvalidField { .. })
        ));
        // ON without OFF violates the OOOI sequence.
        assert!(matches!(
            parse_progress("EDDF/EDDH OUT/1200 ON/1455"),
            Err(ParseError::InvalidField { .. })
        ));
    }

    #[test]
    fn ping_bodies() {
        assert_eq!(parse_ping("*").unwrap(), PingPayload::All);
        assert_eq!(parse_ping("").unwrap(), PingPayload::Stations(vec![]));
        let stations = parse_ping("EDDF DLH123").unwrap();
        assert_eq!(
            stations,
            PingPayload::Stations(vec![Callsign::new("EDDF"), Callsign::new("DLH123")])
        );
        assert!(parse_ping("bad station").is_err());
    }

    #[test]
    fn telex_and_position_pass_text_through() {
        let msg = parse_packet(MessageType::Telex, "DLH123", "ATC", "REQUEST DESCENT").unwrap();
        assert_eq!(msg.packet(), "REQUEST DESCENT");

        let msg = parse_packet(MessageType::Position, "DLH123", "ATC", "OVH EDDF FL350").unwrap();
        assert_eq!(msg.packet(), "OVH EDDF FL350");
    }

    #[test]
    fn overlong_telex_is_rejected() {
        let long = "A".repeat(221);
        assert!(matches!(
            parse_payload(MessageType::Telex, &long),
            Err(ParseError::InvalidField { field: "telex text", .. })
        ));
    }

    #[test]
    fn full_roundtrip_through_render_and_reparse() {
        let messages = [
            parse_packet(MessageType::AdsC, "ATC", "DLH123", "REQUEST PERIODIC 60").unwrap(),
            parse_packet(MessageType::Cpdlc, "ATC", "DLH123", "/data2/1//WU/DESCEND TO FL80")
                .unwrap(),
            parse_packet(MessageType::Progress, "DLH123", "OPS", "EDDF/EDDH OUT/1200 ETA/1300")
                .unwrap(),
            parse_packet(MessageType::Ping, "DLH123", "SERVER", "*").unwrap(),
        ];
        for msg in messages {
            let reparsed = parse_packet(
                msg.message_type(),
                msg.from.as_str(),
                msg.to.as_str(),
                &msg.packet(),
            )
            .unwrap();
            assert_eq!(reparsed, msg);
        }
    }
}
