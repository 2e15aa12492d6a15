//! Hardware capability traits.
//!
//! `SerialTx` is the outbound half of the byte transport. Inbound bytes do not
//! go through a trait: the reception context (UART interrupt or task) feeds
//! them straight into a [`LineProducer`](crate::protocol::LineProducer).
//!
//! `Board` bundles the GPIO, ADC and PWM collaborators the regulator needs.
//! [`HalBoard`] implements it over `embedded-hal` 1.0 pins plus an
//! [`AdcChannel`] per analog input.

use crate::error::BoardError;
use embedded_hal::digital::{InputPin, OutputPin, PinState, StatefulOutputPin};
use embedded_hal::pwm::SetDutyCycle;

/// Platform-agnostic byte transmitter.
///
/// Implementations may block for a bounded time (e.g. a HAL transmit with
/// timeout) or buffer to memory and flush later. `transmit()` MUST NOT block
/// indefinitely.
pub trait SerialTx {
    /// Platform-specific error type
    type Error;

    /// Transmit all bytes or fail.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Transmit a string.
    ///
    /// Default implementation forwards the UTF-8 bytes to `transmit()`.
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.transmit(s.as_bytes())
    }
}

/// Single analog input returning raw conversion codes.
///
/// `embedded-hal` 1.0 has no ADC trait, so boards wrap their HAL channel in
/// this one.
pub trait AdcChannel {
    /// Platform-specific error type
    type Error;

    /// Blocking single conversion, code in `[0, 4095]` for a 12-bit ADC.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

/// Board capabilities consumed by the [`Regulator`](crate::regulator::Regulator).
pub trait Board {
    /// Read the thermistor divider.
    fn read_thermistor_raw(&mut self) -> Result<u16, BoardError>;

    /// Read the setpoint potentiometer.
    fn read_pot_raw(&mut self) -> Result<u16, BoardError>;

    /// Current raw button level, `true` while pressed.
    fn button_pressed(&mut self) -> Result<bool, BoardError>;

    /// Heater PWM duty in percent, `[0, 100]`.
    fn set_heater_duty(&mut self, percent: f32) -> Result<(), BoardError>;

    /// Switch the auxiliary fan.
    fn set_fan(&mut self, on: bool) -> Result<(), BoardError>;

    /// Drive the status LED.
    fn set_led(&mut self, on: bool) -> Result<(), BoardError>;

    /// Toggle the status LED.
    fn toggle_led(&mut self) -> Result<(), BoardError>;
}

/// Convert a duty percentage into a per-mille fraction for `SetDutyCycle`.
///
/// Out-of-range and NaN inputs are clamped to `[0, 1000]`.
pub fn duty_permille(percent: f32) -> u16 {
    if percent.is_nan() || percent <= 0.0 {
        0
    } else if percent >= 100.0 {
        1000
    } else {
        (percent * 10.0 + 0.5) as u16
    }
}

/// `Board` implementation over `embedded-hal` 1.0 peripherals.
///
/// The button is wired active-low by default (pull-up, switch to ground);
/// use [`HalBoard::with_active_high_button`] otherwise.
#[derive(Debug)]
pub struct HalBoard<T, P, B, H, F, L> {
    thermistor: T,
    pot: P,
    button: B,
    heater: H,
    fan: F,
    led: L,
    button_active_low: bool,
}

impl<T, P, B, H, F, L> HalBoard<T, P, B, H, F, L>
where
    T: AdcChannel,
    P: AdcChannel,
    B: InputPin,
    H: SetDutyCycle,
    F: OutputPin,
    L: StatefulOutputPin,
{
    /// Create new board from its peripherals.
    pub fn new(thermistor: T, pot: P, button: B, heater: H, fan: F, led: L) -> Self {
        Self {
            thermistor,
            pot,
            button,
            heater,
            fan,
            led,
            button_active_low: true,
        }
    }

    /// Builder method for a button that reads high while pressed.
    pub fn with_active_high_button(mut self) -> Self {
        self.button_active_low = false;
        self
    }

    /// Release the peripherals.
    pub fn release(self) -> (T, P, B, H, F, L) {
        (
            self.thermistor,
            self.pot,
            self.button,
            self.heater,
            self.fan,
            self.led,
        )
    }
}

impl<T, P, B, H, F, L> Board for HalBoard<T, P, B, H, F, L>
where
    T: AdcChannel,
    P: AdcChannel,
    B: InputPin,
    H: SetDutyCycle,
    F: OutputPin,
    L: StatefulOutputPin,
{
    fn read_thermistor_raw(&mut self) -> Result<u16, BoardError> {
        self.thermistor.read_raw().map_err(|_| BoardError::Adc)
    }

    fn read_pot_raw(&mut self) -> Result<u16, BoardError> {
        self.pot.read_raw().map_err(|_| BoardError::Adc)
    }

    fn button_pressed(&mut self) -> Result<bool, BoardError> {
        let high = self.button.is_high().map_err(|_| BoardError::Gpio)?;
        Ok(high != self.button_active_low)
    }

    fn set_heater_duty(&mut self, percent: f32) -> Result<(), BoardError> {
        self.heater
            .set_duty_cycle_fraction(duty_permille(percent), 1000)
            .map_err(|_| BoardError::Pwm)
    }

    fn set_fan(&mut self, on: bool) -> Result<(), BoardError> {
        self.fan
            .set_state(PinState::from(on))
            .map_err(|_| BoardError::Gpio)
    }

    fn set_led(&mut self, on: bool) -> Result<(), BoardError> {
        self.led
            .set_state(PinState::from(on))
            .map_err(|_| BoardError::Gpio)
    }

    fn toggle_led(&mut self) -> Result<(), BoardError> {
        self.led.toggle().map_err(|_| BoardError::Gpio)
    }
}
