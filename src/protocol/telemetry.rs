//! Telemetry line encoding.

use super::frame::frame_into;
use core::fmt::Write;

/// Capacity of one encoded telemetry line.
pub const TELEMETRY_CAPACITY: usize = 128;

/// One telemetry sample.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    /// Filtered measured temperature (°C)
    pub measured_c: f32,

    /// Active setpoint (°C)
    pub setpoint_c: f32,

    /// Heater duty (%)
    pub duty_percent: f32,
}

impl Telemetry {
    /// Encode as `{"T_meas":F.FF,"T_ref":F.FF,"PWM":F.F}*HH\r\n`.
    ///
    /// Returns `None` only if the line would not fit, which takes magnitudes
    /// near `f32::MAX` in several fields.
    pub fn encode(&self) -> Option<heapless::String<TELEMETRY_CAPACITY>> {
        let mut payload: heapless::String<TELEMETRY_CAPACITY> = heapless::String::new();
        write!(
            payload,
            "{{\"T_meas\":{:.2},\"T_ref\":{:.2},\"PWM\":{:.1}}}",
            self.measured_c, self.setpoint_c, self.duty_percent
        )
        .ok()?;

        let mut line = heapless::String::new();
        frame_into(&mut line, &payload).ok()?;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::verify_and_strip;

    #[test]
    fn test_format() {
        let t = Telemetry {
            measured_c: 34.567,
            setpoint_c: 35.0,
            duty_percent: 12.34,
        };
        let line = t.encode().unwrap();
        assert!(line.starts_with("{\"T_meas\":34.57,\"T_ref\":35.00,\"PWM\":12.3}*"));
        assert!(line.ends_with("\r\n"));
        assert_eq!(line.len(), "{\"T_meas\":34.57,\"T_ref\":35.00,\"PWM\":12.3}*HH\r\n".len());
    }

    #[test]
    fn test_checksum_validates() {
        let t = Telemetry {
            measured_c: 20.0,
            setpoint_c: 60.0,
            duty_percent: 100.0,
        };
        let line = t.encode().unwrap();
        let body = line.trim_end_matches(['\r', '\n']);
        assert_eq!(
            verify_and_strip(body.as_bytes()),
            Ok(&b"{\"T_meas\":20.00,\"T_ref\":60.00,\"PWM\":100.0}"[..])
        );
    }

    #[test]
    fn test_negative_values() {
        let t = Telemetry {
            measured_c: -5.0,
            setpoint_c: 20.0,
            duty_percent: 0.0,
        };
        let line = t.encode().unwrap();
        assert!(line.starts_with("{\"T_meas\":-5.00,\"T_ref\":20.00,\"PWM\":0.0}*"));
    }
}
