//! Wire replies to inbound lines.

use crate::error::ProtocolError;

/// Reply sent for every processed line.
///
/// Replies are not checksummed; only telemetry carries a CRC.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Command accepted
    Ok,

    /// Frame valid, command unknown
    Err,

    /// Frame rejected by checksum validation
    ErrCrc,
}

impl Reply {
    /// Wire bytes including the CRLF terminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reply::Ok => "OK\r\n",
            Reply::Err => "ERR\r\n",
            Reply::ErrCrc => "ERR:CRC\r\n",
        }
    }
}

impl From<&ProtocolError> for Reply {
    fn from(error: &ProtocolError) -> Self {
        if error.is_framing() {
            Reply::ErrCrc
        } else {
            Reply::Err
        }
    }
}
