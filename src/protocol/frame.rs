//! `<payload>*<HH>` line framing.

use super::crc::{crc8, hex_byte, parse_hex_byte};
use crate::error::ProtocolError;
use core::fmt;

/// Separator between payload and checksum.
pub const CHECKSUM_SEPARATOR: u8 = b'*';

/// Validate a received line and return its payload.
///
/// The payload runs up to the first `*`. Exactly two hex digits (either case)
/// must follow, and they must equal the CRC-8 of the payload bytes.
pub fn verify_and_strip(line: &[u8]) -> Result<&[u8], ProtocolError> {
    let star = line
        .iter()
        .position(|&b| b == CHECKSUM_SEPARATOR)
        .ok_or(ProtocolError::MissingChecksum)?;

    let (payload, rest) = (&line[..star], &line[star + 1..]);
    let received = match rest {
        [hi, lo, ..] => parse_hex_byte(*hi, *lo).ok_or(ProtocolError::MalformedChecksum)?,
        _ => return Err(ProtocolError::MalformedChecksum),
    };
    if rest.len() > 2 {
        return Err(ProtocolError::TrailingBytes);
    }

    let expected = crc8(payload);
    if expected != received {
        return Err(ProtocolError::ChecksumMismatch { expected, received });
    }

    Ok(payload)
}

/// Write `payload*HH\r\n` to `w`.
pub fn frame_into<W: fmt::Write>(w: &mut W, payload: &str) -> fmt::Result {
    let hex = hex_byte(crc8(payload.as_bytes()));
    w.write_str(payload)?;
    w.write_char('*')?;
    w.write_char(hex[0] as char)?;
    w.write_char(hex[1] as char)?;
    w.write_str("\r\n")
}
