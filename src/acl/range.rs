//! IP range validation for access list bounds.
//!
//! A range is a pair of textual addresses decoded to binary (4 bytes for
//! IPv4, 16 for IPv6). The zero addresses `0.0.0.0` and `::` are accepted
//! as open lower bounds even if decoding would reject them, so operators
//! never have to invent a dummy start address. Numeric ordering of the pair
//! is not checked here; an inverted range is stored as given.

use std::net::IpAddr;

use crate::error::FieldError;

/// Open-lower-bound sentinel for IPv4 ranges.
pub const OPEN_START_V4: &str = "0.0.0.0";
/// Open-lower-bound sentinel for IPv6 ranges.
pub const OPEN_START_V6: &str = "::";

/// Decode a textual IPv4/IPv6 address into network-order bytes.
pub fn decode_addr(text: &str) -> Option<Vec<u8>> {
    match text.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => Some(v4.octets().to_vec()),
        Ok(IpAddr::V6(v6)) => Some(v6.octets().to_vec()),
        Err(_) => None,
    }
}

/// Binary form of a validated start bound. A sentinel that decoding rejects
/// still maps to the zero address of its family.
pub fn decode_start(text: &str) -> Option<Vec<u8>> {
    decode_addr(text).or_else(|| match text {
        OPEN_START_V4 => Some(vec![0u8; 4]),
        OPEN_START_V6 => Some(vec![0u8; 16]),
        _ => None,
    })
}

/// Validate a start/end pair. Problems are collected per field rather than
/// short-circuiting, so a form can show both a bad start and a bad end at
/// once. A family mismatch is recorded against both fields.
pub fn validate_range(start: &str, end: &str) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    let start_bin = decode_addr(start);
    let end_bin = decode_addr(end);
    let start_is_sentinel = start == OPEN_START_V4 || start == OPEN_START_V6;

    if start_bin.is_none() && !start_is_sentinel {
        errors.push(FieldError::new("start", "invalid start address"));
    }
    if end_bin.is_none() {
        errors.push(FieldError::new("end", "invalid end address"));
    }

    // The mismatch check only applies when both ends decoded; an
    // undecodable sentinel start has no family to compare.
    if let (Some(s), Some(e)) = (&start_bin, &end_bin) {
        if s.len() != e.len() {
            errors.push(FieldError::new("start", "address family mismatch"));
            errors.push(FieldError::new("end", "address family mismatch"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
