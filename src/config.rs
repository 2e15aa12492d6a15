//! Configuration traits and implementations for controller tuning.
//!
//! The `ControlConfig` trait allows compile-time configuration of the safety
//! window, control gains, timing thresholds and sensor model without runtime
//! overhead. Values can also be generated at build time from a TOML file with
//! the `heatctl-tunegen` binary.

/// Beta-model parameters of an NTC thermistor on a pull-up divider.
///
/// The fixed resistor sits between VREF and the ADC input, the thermistor
/// between the ADC input and ground.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NtcParams {
    /// ADC reference voltage (V)
    pub vref: f32,
    /// Full-scale ADC code
    pub adc_max: f32,
    /// Fixed divider resistor (ohm)
    pub r_fixed: f32,
    /// Beta coefficient (K)
    pub beta: f32,
    /// Nominal resistance at `t0_k` (ohm)
    pub r0: f32,
    /// Nominal temperature (K)
    pub t0_k: f32,
}

impl NtcParams {
    /// 10k / B3950 thermistor on a 10k pull-up, 12-bit ADC at 3.3 V.
    pub const NTC_10K_3950: Self = Self {
        vref: 3.3,
        adc_max: 4095.0,
        r_fixed: 10_000.0,
        beta: 3950.0,
        r0: 10_000.0,
        t0_k: 298.15,
    };
}

/// Controller configuration trait defining limits, gains and timing.
///
/// All values are const (zero runtime cost). Tick-based thresholds count
/// scheduler ticks of `TS_S` seconds.
pub trait ControlConfig {
    /// Lowest setpoint ever handed to the controller (°C)
    const SAFE_MIN_C: f32;

    /// Highest setpoint ever handed to the controller (°C)
    const SAFE_MAX_C: f32;

    /// Setpoint at startup (°C)
    const SETPOINT_DEFAULT_C: f32;

    /// Increment applied by a short button press (°C)
    const SETPOINT_STEP_C: f32;

    /// Setpoint at potentiometer minimum (°C)
    const POT_MIN_C: f32;

    /// Setpoint at potentiometer maximum (°C)
    const POT_MAX_C: f32;

    /// Proportional gain (% duty per °C)
    const KP: f32;

    /// Integral gain (% duty per °C·s)
    const KI: f32;

    /// Control period (s)
    const TS_S: f32;

    /// Ticks a raw button level must hold before it is accepted
    const DEBOUNCE_TICKS: u32;

    /// Hold ticks at or above which a press is classified as long
    const LONG_PRESS_TICKS: u32;

    /// Fan switches on above `setpoint + FAN_ON_ABOVE_C`
    const FAN_ON_ABOVE_C: f32;

    /// Fan switches off below `setpoint + FAN_OFF_ABOVE_C`
    const FAN_OFF_ABOVE_C: f32;

    /// Band around the setpoint in which the process counts as settled (°C)
    const IN_RANGE_BAND_C: f32;

    /// Over-temperature alarm trips above `SAFE_MAX_C + ALARM_MARGIN_C`
    const ALARM_MARGIN_C: f32;

    /// Heartbeat LED toggle period (ticks)
    const HEARTBEAT_TICKS: u32;

    /// Thermistor model
    const NTC: NtcParams;
}

/// Default configuration for the reference heater board.
///
/// - Setpoint window: 20..60 °C, default 35 °C, 1 °C button step
/// - PI: Kp 2.0, Ki 0.5, Ts 100 ms
/// - Button: 200 ms debounce, 1 s long press
/// - Fan: on at +2.0 °C over setpoint, off below +0.5 °C
/// - Alarm: 5 °C above the safe maximum
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl ControlConfig for DefaultConfig {
    const SAFE_MIN_C: f32 = 20.0;
    const SAFE_MAX_C: f32 = 60.0;
    const SETPOINT_DEFAULT_C: f32 = 35.0;
    const SETPOINT_STEP_C: f32 = 1.0;
    const POT_MIN_C: f32 = 20.0;
    const POT_MAX_C: f32 = 60.0;
    const KP: f32 = 2.0;
    const KI: f32 = 0.5;
    const TS_S: f32 = 0.1;
    const DEBOUNCE_TICKS: u32 = 2;
    const LONG_PRESS_TICKS: u32 = 10;
    const FAN_ON_ABOVE_C: f32 = 2.0;
    const FAN_OFF_ABOVE_C: f32 = 0.5;
    const IN_RANGE_BAND_C: f32 = 1.0;
    const ALARM_MARGIN_C: f32 = 5.0;
    const HEARTBEAT_TICKS: u32 = 10;
    const NTC: NtcParams = NtcParams::NTC_10K_3950;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(DefaultConfig::SAFE_MIN_C, 20.0);
        assert_eq!(DefaultConfig::SAFE_MAX_C, 60.0);
        assert_eq!(DefaultConfig::SETPOINT_DEFAULT_C, 35.0);
        assert_eq!(DefaultConfig::KP, 2.0);
        assert_eq!(DefaultConfig::KI, 0.5);
        assert_eq!(DefaultConfig::TS_S, 0.1);
        assert_eq!(DefaultConfig::DEBOUNCE_TICKS, 2);
        assert_eq!(DefaultConfig::LONG_PRESS_TICKS, 10);
        assert_eq!(DefaultConfig::NTC, NtcParams::NTC_10K_3950);
    }

    #[test]
    fn test_default_config_is_consistent() {
        assert!(DefaultConfig::SAFE_MIN_C < DefaultConfig::SAFE_MAX_C);
        assert!(DefaultConfig::SETPOINT_DEFAULT_C >= DefaultConfig::SAFE_MIN_C);
        assert!(DefaultConfig::SETPOINT_DEFAULT_C <= DefaultConfig::SAFE_MAX_C);
        assert!(DefaultConfig::FAN_OFF_ABOVE_C < DefaultConfig::FAN_ON_ABOVE_C);
        assert!(DefaultConfig::DEBOUNCE_TICKS < DefaultConfig::LONG_PRESS_TICKS);
    }
}
