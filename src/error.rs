//! Error types for protocol and hardware operations.
//!
//! `ProtocolError` covers every way an inbound line can be rejected. Each
//! variant maps to exactly one wire reply. `BoardError` covers the hardware
//! collaborators behind the [`Board`](crate::io::Board) trait.

use core::fmt;

/// Inbound line rejection reason.
///
/// Framing failures (`MissingChecksum` through `ChecksumMismatch`) are all
/// answered with `ERR:CRC`; `UnknownCommand` is answered with `ERR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Line has no `*` separator
    MissingChecksum,

    /// Fewer than two characters after `*`, or a non-hex digit
    MalformedChecksum,

    /// Bytes follow the two checksum digits
    TrailingBytes,

    /// Checksum digits decode but do not match the payload
    ChecksumMismatch {
        /// CRC-8 computed over the received payload
        expected: u8,
        /// CRC-8 carried by the line
        received: u8,
    },

    /// Payload passed framing but names no known command
    UnknownCommand,
}

impl ProtocolError {
    /// True for every framing/checksum failure.
    pub fn is_framing(&self) -> bool {
        !matches!(self, ProtocolError::UnknownCommand)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MissingChecksum => write!(f, "Missing checksum"),
            ProtocolError::MalformedChecksum => write!(f, "Malformed checksum"),
            ProtocolError::TrailingBytes => write!(f, "Trailing bytes after checksum"),
            ProtocolError::ChecksumMismatch { expected, received } => write!(
                f,
                "Checksum mismatch: expected {:02X}, got {:02X}",
                expected, received
            ),
            ProtocolError::UnknownCommand => write!(f, "Unknown command"),
        }
    }
}

/// Hardware collaborator failure.
///
/// Carries only the collaborator kind; HAL error payloads are dropped at the
/// adapter boundary so the regulator stays independent of the HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// ADC conversion failed
    Adc,

    /// Digital input or output failed
    Gpio,

    /// PWM duty update failed
    Pwm,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Adc => write!(f, "ADC error"),
            BoardError::Gpio => write!(f, "GPIO error"),
            BoardError::Pwm => write!(f, "PWM error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::format;

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", ProtocolError::MissingChecksum),
            "Missing checksum"
        );
        assert_eq!(
            format!("{}", ProtocolError::UnknownCommand),
            "Unknown command"
        );

        let err = ProtocolError::ChecksumMismatch {
            expected: 0x0a,
            received: 0xF4,
        };
        assert_eq!(
            format!("{}", err),
            "Checksum mismatch: expected 0A, got F4"
        );

        assert_eq!(format!("{}", BoardError::Pwm), "PWM error");
    }

    #[test]
    fn test_framing_classification() {
        assert!(ProtocolError::MissingChecksum.is_framing());
        assert!(ProtocolError::MalformedChecksum.is_framing());
        assert!(ProtocolError::TrailingBytes.is_framing());
        assert!(
            ProtocolError::ChecksumMismatch {
                expected: 1,
                received: 2
            }
            .is_framing()
        );
        assert!(!ProtocolError::UnknownCommand.is_framing());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(ProtocolError::UnknownCommand, ProtocolError::UnknownCommand);
        assert_ne!(ProtocolError::MissingChecksum, ProtocolError::TrailingBytes);
    }
}
