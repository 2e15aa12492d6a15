//! Test fixtures and utilities for heatctl testing.
//!
//! Provides:
//! - `MockSerial`: Test implementation of SerialTx with output capture
//! - `MockBoard`: Scriptable Board with recorded outputs
//! - `RAW_*`: thermistor codes for known temperatures (10k/B3950 divider)

#![allow(dead_code)]

use heatctl::{Board, BoardError, SerialTx};

// ============================================================================
// Thermistor codes
// ============================================================================

/// ≈ 20.0 °C
pub const RAW_20C: u16 = 2278;

/// ≈ 25.0 °C
pub const RAW_25C: u16 = 2048;

/// ≈ 35.0 °C
pub const RAW_35C: u16 = 1614;

/// ≈ 45.0 °C
pub const RAW_45C: u16 = 1241;

/// ≈ 66.0 °C, above the 65 °C cutoff of `DefaultConfig`
pub const RAW_66C: u16 = 687;

// ============================================================================
// MockSerial - Test transmitter
// ============================================================================

/// Mock transmitter capturing every byte written.
#[derive(Debug, Default)]
pub struct MockSerial {
    /// Output capture
    output: Vec<u8>,

    /// Fail every transmit when set
    pub fail: bool,
}

impl MockSerial {
    /// Create new MockSerial with empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get captured output as string.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Captured output split into CRLF-terminated lines (terminators removed).
    pub fn lines(&self) -> Vec<String> {
        self.output()
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Clear output buffer.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

/// Error returned by a failing `MockSerial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxFailed;

impl SerialTx for MockSerial {
    type Error = TxFailed;

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), TxFailed> {
        if self.fail {
            return Err(TxFailed);
        }
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

// ============================================================================
// MockBoard - Scriptable board
// ============================================================================

/// Board whose inputs are set by the test and whose outputs are recorded.
#[derive(Debug)]
pub struct MockBoard {
    /// Thermistor code, `None` to fail the read
    pub thermistor: Option<u16>,

    /// Potentiometer code, `None` to fail the read
    pub pot: Option<u16>,

    /// Raw button level, `true` while pressed
    pub button: bool,

    /// Every heater duty written, in order
    pub duty_log: Vec<f32>,

    /// Fan output
    pub fan: bool,

    /// LED output
    pub led: bool,

    /// Number of LED toggles
    pub led_toggles: usize,

    /// Fail every heater write when set
    pub fail_pwm: bool,
}

impl MockBoard {
    /// Board reading `raw` on the thermistor, pot at zero, button released.
    pub fn with_thermistor(raw: u16) -> Self {
        Self {
            thermistor: Some(raw),
            pot: Some(0),
            button: false,
            duty_log: Vec::new(),
            fan: false,
            led: false,
            led_toggles: 0,
            fail_pwm: false,
        }
    }

    /// Last heater duty written.
    pub fn last_duty(&self) -> Option<f32> {
        self.duty_log.last().copied()
    }
}

impl Board for MockBoard {
    fn read_thermistor_raw(&mut self) -> Result<u16, BoardError> {
        self.thermistor.ok_or(BoardError::Adc)
    }

    fn read_pot_raw(&mut self) -> Result<u16, BoardError> {
        self.pot.ok_or(BoardError::Adc)
    }

    fn button_pressed(&mut self) -> Result<bool, BoardError> {
        Ok(self.button)
    }

    fn set_heater_duty(&mut self, percent: f32) -> Result<(), BoardError> {
        if self.fail_pwm {
            return Err(BoardError::Pwm);
        }
        self.duty_log.push(percent);
        Ok(())
    }

    fn set_fan(&mut self, on: bool) -> Result<(), BoardError> {
        self.fan = on;
        Ok(())
    }

    fn set_led(&mut self, on: bool) -> Result<(), BoardError> {
        self.led = on;
        Ok(())
    }

    fn toggle_led(&mut self) -> Result<(), BoardError> {
        self.led = !self.led;
        self.led_toggles += 1;
        Ok(())
    }
}
