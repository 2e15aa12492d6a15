//! NTC thermistor conversion.
//!
//! Pure functions mapping raw ADC codes to °C with the Beta model
//! `1/T = 1/T0 + (1/B)·ln(R/R0)`.

use crate::config::NtcParams;

/// Lowest raw code accepted before conversion.
pub const RAW_MIN: u16 = 1;

/// Highest raw code accepted before conversion.
pub const RAW_MAX: u16 = 4094;

const KELVIN_OFFSET: f32 = 273.15;

/// Convert a raw ADC code to degrees Celsius.
///
/// The code is clamped to `[RAW_MIN, RAW_MAX]` first so that neither the
/// divider equation nor the logarithm ever sees a degenerate input. With the
/// thermistor on the low side of the divider a higher code means a higher
/// resistance and therefore a lower temperature.
pub fn raw_to_celsius(raw: u16, ntc: &NtcParams) -> f32 {
    let raw = raw.clamp(RAW_MIN, RAW_MAX) as f32;

    let v = raw / ntc.adc_max * ntc.vref;
    let r_ntc = ntc.r_fixed * v / (ntc.vref - v);

    let inv_t = 1.0 / ntc.t0_k + libm::logf(r_ntc / ntc.r0) / ntc.beta;
    1.0 / inv_t - KELVIN_OFFSET
}
