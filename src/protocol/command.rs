//! Command grammar for validated payloads.
//!
//! ```text
//! payload := ws* ( 'T' float-prefix | '?' ) any*
//! ```
//!
//! `T` parses the longest decimal/exponent prefix of what follows and ignores
//! the rest, so `T35.0C` sets 35.0 and `Tabc` sets 0.0 (then clamped by the
//! setpoint store).

use crate::error::ProtocolError;

/// Parsed inbound command.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `T<float>`: new setpoint request (unclamped)
    SetTemperature(f32),

    /// `?`: ask for one telemetry line
    TelemetryRequest,
}

/// Parse a validated payload.
pub fn parse(payload: &[u8]) -> Result<Command, ProtocolError> {
    let start = payload
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(payload.len());

    match &payload[start..] {
        [b'T', rest @ ..] => Ok(Command::SetTemperature(parse_float_prefix(rest))),
        [b'?', ..] => Ok(Command::TelemetryRequest),
        _ => Err(ProtocolError::UnknownCommand),
    }
}

/// Parse the longest float prefix of `bytes`, `0.0` when there is none.
///
/// Accepts `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least
/// one mantissa digit. An exponent marker without digits ends the number
/// before the marker.
pub fn parse_float_prefix(bytes: &[u8]) -> f32 {
    let len = float_prefix_len(bytes);
    if len == 0 {
        return 0.0;
    }
    core::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(0.0)
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_end = digits_from(i);
    let mut mantissa_digits = int_end - i;
    i = int_end;

    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        mantissa_digits += frac_end - (i + 1);
        i = frac_end;
    }

    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }

    i
}
