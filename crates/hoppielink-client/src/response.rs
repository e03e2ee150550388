//! Service response envelope parsing.
//!
//! The service answers every request with a plain-text body:
//!
//! ```text
//! ok
//! ok {42 ATC ads-c {REQUEST PERIODIC 120}} {43 OPS telex {HOWGOZIT}}
//! error {invalid logon code}
//! ```
//!
//! The `ok` data section is a sequence of brace-delimited groups; peek and
//! poll entries nest the raw packet in a further brace pair, which may
//! itself contain braces. Framing errors (a bad status word, unbalanced
//! braces, a truncated record head) are [`ClientError::Response`]; they
//! concern the whole response, unlike per-record *message* parse failures
//! which the caller can skip individually.

use hoppielink_models::InboundRecord;

use crate::error::ClientError;

// ---------------------------------------------------------------------------
// ServiceResponse
// ---------------------------------------------------------------------------

/// A parsed response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    /// Request accepted; the data groups (unbraced content, in order).
    Success {
        /// Top-level brace-group contents of the data section.
        data: Vec<String>,
    },
    /// The service rejected the request.
    Error {
        /// The reason given by the service.
        reason: String,
    },
}

impl ServiceResponse {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self, ClientError> {
        let body = body.trim();
        if let Some(rest) = body.strip_prefix("error") {
            // The status word must stand alone: "errored out" is not an
            // error response.
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let reason = match split_groups(rest) {
                    Ok(groups) => groups.join(" "),
                    // Some deployments return the reason without braces.
                    Err(_) => rest.trim().to_string(),
                };
                return Ok(ServiceResponse::Error { reason });
            }
        }
        if let Some(rest) = body.strip_prefix("ok") {
            return Ok(ServiceResponse::Success {
                data: split_groups(rest)?,
            });
        }
        Err(ClientError::response(format!(
            "expected ok/error status, got \"{}\"",
            body.chars().take(32).collect::<String>()
        )))
    }
}

/// Split a data section into its top-level `{…}` group contents.
///
/// Nested braces are kept verbatim inside their group; non-whitespace
/// outside any group or unbalanced braces fail the whole envelope.
fn split_groups(section: &str) -> Result<Vec<String>, ClientError> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (idx, ch) in section.char_indices() {
        match ch {
            '{' => {
                if depth == 0 {
                    start = idx + 1;
                }
                depth += 1;
            }
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ClientError::response("unbalanced braces"))?;
                if depth == 0 {
                    groups.push(section[start..idx].to_string());
                }
            }
            ch if depth == 0 && !ch.is_whitespace() => {
                return Err(ClientError::response(format!(
                    "unexpected content outside braces: \"{ch}\""
                )));
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ClientError::response("unbalanced braces"));
    }
    Ok(groups)
}

// ---------------------------------------------------------------------------
// Record extraction
// ---------------------------------------------------------------------------

/// Extract peek entries (`{id from type {packet}}`) from the data groups.
///
/// Every entry carries its server-side message id; an entry without one is
/// a framing error.
pub fn peek_records(data: &[String]) -> Result<Vec<(u64, InboundRecord)>, ClientError> {
    data.iter()
        .map(|group| {
            let (token, rest) = group
                .trim_start()
                .split_once(char::is_whitespace)
                .ok_or_else(|| ClientError::response("record is missing its id"))?;
            let id = token.parse::<u64>().map_err(|_| {
                ClientError::response(format!("record id \"{token}\" is not an integer"))
            })?;
            Ok((id, record_from_group(rest)?))
        })
        .collect()
}

/// Extract poll entries (`{from type {packet}}`) from the data groups.
pub fn poll_records(data: &[String]) -> Result<Vec<InboundRecord>, ClientError> {
    data.iter().map(|group| record_from_group(group)).collect()
}

/// Extract the station list from a ping response's data groups.
pub fn ping_stations(data: &[String]) -> Vec<String> {
    data.iter()
        .flat_map(|group| group.split_whitespace())
        .map(str::to_string)
        .collect()
}

fn record_from_group(group: &str) -> Result<InboundRecord, ClientError> {
    let (head, packet_part) = match group.find('{') {
        Some(idx) => group.split_at(idx),
        None => (group, ""),
    };
    let mut tokens = head.split_whitespace();
    let from = tokens
        .next()
        .ok_or_else(|| ClientError::response("record is missing the sender"))?;
    let msg_type = tokens
        .next()
        .ok_or_else(|| ClientError::response("record is missing the type tag"))?;
    if let Some(extra) = tokens.next() {
        return Err(ClientError::response(format!(
            "unexpected token \"{extra}\" before the packet"
        )));
    }
    let packet = match split_groups(packet_part)?.as_slice() {
        [] => String::new(),
        [packet] => packet.clone(),
        _ => {
            return Err(ClientError::response(
                "record carries more than one packet group",
            ));
        }
    };
    Ok(InboundRecord {
        from: from.to_string(),
        to: None,
        msg_type: msg_type.to_string(),
        packet,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ok_has_no_data() {
        assert_eq!(
            ServiceResponse::parse("ok").unwrap(),
            ServiceResponse::Success { data: vec![] }
        );
        assert_eq!(
            ServiceResponse::parse("ok\n").unwrap(),
            ServiceResponse::Success { data: vec![] }
        );
    }

    #[test]
    fn error_reason_is_extracted() {
        assert_eq!(
            ServiceResponse::parse("error {invalid logon code}").unwrap(),
            ServiceResponse::Error {
                reason: "invalid logon code".to_string()
            }
        );
        // Braceless variant.
        assert_eq!(
            ServiceResponse::parse("error no such station").unwrap(),
            ServiceResponse::Error {
                reason: "no such station".to_string()
            }
        );
    }

    #[test]
    fn unknown_status_word_is_an_envelope_error() {
        assert!(matches!(
            ServiceResponse::parse("huh?"),
            Err(ClientError::Response { .. })
        ));
    }

    #[test]
    fn error_status_word_must_stand_alone() {
        assert!(matches!(
            ServiceResponse::parse("errored out"),
            Err(ClientError::Response { .. })
        ));
        // A bare "error" is still an error response, with no reason given.
        assert_eq!(
            ServiceResponse::parse("error").unwrap(),
            ServiceResponse::Error {
                reason: String::new()
            }
        );
    }

    #[test]
    fn peek_records_with_nested_braces() {
        let body = "ok {42 ATC ads-c {REQUEST PERIODIC 120}} {43 OPS telex {USE {CAUTION} TAXIING}}";
        let ServiceResponse::Success { data } = ServiceResponse::parse(body).unwrap() else {
            panic!("expected success");
        };
        let records = peek_records(&data).unwrap();
        assert_eq!(records.len(), 2);
        let (id, record) = &records[0];
        assert_eq!(*id, 42);
        assert_eq!(record.from, "ATC");
        assert_eq!(record.msg_type, "ads-c");
        assert_eq!(record.packet, "REQUEST PERIODIC 120");
        assert_eq!(records[1].0, 43);
        assert_eq!(records[1].1.packet, "USE {CAUTION} TAXIING");
    }

    #[test]
    fn poll_record_fields() {
        let body = "ok {ATC cpdlc {/data2/3//WU/DESCEND TO FL80}}";
        let ServiceResponse::Success { data } = ServiceResponse::parse(body).unwrap() else {
            panic!("expected success");
        };
        let records = poll_records(&data).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].from, "ATC");
        assert_eq!(records[0].packet, "/data2/3//WU/DESCEND TO FL80");
    }

    #[test]
    fn empty_packet_group_yields_empty_packet() {
        let records = poll_records(&["ATC peek {}".to_string()]).unwrap();
        assert_eq!(records[0].packet, "");
    }

    #[test]
    fn framing_errors_fail_the_envelope() {
        assert!(ServiceResponse::parse("ok {unterminated").is_err());
        assert!(ServiceResponse::parse("ok }oops{").is_err());
        assert!(ServiceResponse::parse("ok stray {A}").is_err());
        assert!(peek_records(&["notanid ATC telex {HI}".to_string()]).is_err());
        assert!(peek_records(&["42".to_string()]).is_err());
        assert!(poll_records(&["ATC".to_string()]).is_err());
        assert!(poll_records(&["ATC telex extra {HI}".to_string()]).is_err());
    }

    #[test]
    fn ping_station_list() {
        let ServiceResponse::Success { data } =
            ServiceResponse::parse("ok {EDDF DLH456 ATC}").unwrap()
        else {
            panic!("expected success");
        };
        assert_eq!(ping_stations(&data), vec!["EDDF", "DLH456", "ATC"]);
        assert!(ping_stations(&[]).is_empty());
    }
}
