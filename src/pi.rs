//! Discrete-time PI control law with conditional-integration anti-windup.

use crate::config::ControlConfig;
use core::marker::PhantomData;

/// Lower bound of the actuator command (% duty)
pub const DUTY_MIN: f32 = 0.0;

/// Upper bound of the actuator command (% duty)
pub const DUTY_MAX: f32 = 100.0;

/// PI controller producing a heater duty in `[DUTY_MIN, DUTY_MAX]`.
///
/// Call [`update`](Self::update) exactly once per control period `C::TS_S`.
/// The integral only advances while the output is not pinned against a
/// limit in the direction the error is pushing it.
#[derive(Debug, Clone)]
pub struct PiController<C: ControlConfig> {
    /// Accumulated `error · Ts` (°C·s)
    integral: f32,

    _config: PhantomData<C>,
}

impl<C: ControlConfig> PiController<C> {
    /// Create controller with an empty integrator.
    pub const fn new() -> Self {
        Self {
            integral: 0.0,
            _config: PhantomData,
        }
    }

    /// Advance one control period and return the duty command (%).
    pub fn update(&mut self, reference_c: f32, measured_c: f32) -> f32 {
        let error = reference_c - measured_c;
        let output = C::KP * error + C::KI * self.integral;

        let pinned_high = output >= DUTY_MAX && error > 0.0;
        let pinned_low = output <= DUTY_MIN && error < 0.0;
        if !pinned_high && !pinned_low {
            self.integral += error * C::TS_S;
        }

        (C::KP * error + C::KI * self.integral).clamp(DUTY_MIN, DUTY_MAX)
    }

    /// Zero the integrator (gains are compile-time constants).
    pub fn reset(&mut self) {
        self.integral = 0.0;
    }

    /// Current integrator value (°C·s).
    pub fn integral(&self) -> f32 {
        self.integral
    }
}

impl<C: ControlConfig> Default for PiController<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultConfig;

    type Pi = PiController<DefaultConfig>;

    #[test]
    fn test_zero_error_is_idempotent() {
        let mut pi = Pi::new();
        for _ in 0..50 {
            assert_eq!(pi.update(50.0, 50.0), 0.0);
        }
        assert_eq!(pi.integral(), 0.0);
    }

    #[test]
    fn test_proportional_response() {
        let mut pi = Pi::new();
        // Kp·e + Ki·(e·Ts) = 2·10 + 0.5·1.0
        let duty = pi.update(40.0, 30.0);
        assert!((duty - 20.5).abs() < 1e-4, "got {}", duty);
        assert!((pi.integral() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_integral_accumulates_small_error() {
        let mut pi = Pi::new();
        let first = pi.update(36.0, 35.0);
        let mut last = first;
        for _ in 0..100 {
            last = pi.update(36.0, 35.0);
        }
        assert!(last > first);
        assert!((pi.integral() - 10.1).abs() < 1e-3);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut pi = Pi::new();
        assert_eq!(pi.update(60.0, 0.0), DUTY_MAX);

        let mut pi = Pi::new();
        assert_eq!(pi.update(20.0, 80.0), DUTY_MIN);
    }

    #[test]
    fn test_anti_windup_high() {
        let mut pi = Pi::new();
        for _ in 0..100 {
            pi.update(60.0, 30.0);
        }
        let after_100 = pi.integral();
        for _ in 0..10_000 {
            assert_eq!(pi.update(60.0, 30.0), DUTY_MAX);
        }

        // Saturated from the first tick onwards: Kp·30 = 60, plus Ki·integral
        // reaches 100 once the integral hits 80.
        assert_eq!(pi.integral(), after_100);
        assert!(pi.integral() <= (DUTY_MAX / DefaultConfig::KI) + 3.0);
    }

    #[test]
    fn test_anti_windup_low() {
        let mut pi = Pi::new();
        for _ in 0..1_000 {
            assert_eq!(pi.update(20.0, 60.0), DUTY_MIN);
        }
        // Kp·(-40) is already below zero; the integral never starts winding
        assert_eq!(pi.integral(), 0.0);
    }

    #[test]
    fn test_recovers_quickly_after_saturation() {
        let mut pi = Pi::new();
        for _ in 0..1_000 {
            pi.update(60.0, 20.0);
        }
        // Overshoot by 5 °C: without wind-up the integral is bounded and the
        // duty must drop well below saturation within a few seconds.
        let mut duty = DUTY_MAX;
        for _ in 0..40 {
            duty = pi.update(60.0, 65.0);
        }
        assert!(duty < DUTY_MAX);
    }

    #[test]
    fn test_reset_zeroes_integral_only() {
        let mut pi = Pi::new();
        pi.update(40.0, 30.0);
        assert!(pi.integral() > 0.0);
        pi.reset();
        assert_eq!(pi.integral(), 0.0);
        let duty = pi.update(40.0, 30.0);
        assert!((duty - 20.5).abs() < 1e-4);
    }
}
