//! Status LED pattern and auxiliary fan policy.
//!
//! Both are pure per-tick decisions; the regulator applies them to the board.

use crate::config::ControlConfig;
use core::marker::PhantomData;

/// What to do with the status LED this tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedAction {
    /// Leave the LED as it is
    Hold,

    /// Drive the LED on
    On,

    /// Invert the LED
    Toggle,
}

/// Status LED pattern generator.
///
/// - alarm: toggle every tick (fast blink)
/// - in range: solid on
/// - otherwise: heartbeat toggle every `HEARTBEAT_TICKS`
#[derive(Debug, Clone)]
pub struct Indicator<C: ControlConfig> {
    phase: u32,
    _config: PhantomData<C>,
}

impl<C: ControlConfig> Indicator<C> {
    /// Create indicator at phase zero.
    pub const fn new() -> Self {
        Self {
            phase: 0,
            _config: PhantomData,
        }
    }

    /// Advance one tick and return the LED action.
    pub fn tick(&mut self, in_range: bool, alarm: bool) -> LedAction {
        self.phase = self.phase.wrapping_add(1);

        if alarm {
            LedAction::Toggle
        } else if in_range {
            LedAction::On
        } else if C::HEARTBEAT_TICKS != 0 && self.phase % C::HEARTBEAT_TICKS == 0 {
            LedAction::Toggle
        } else {
            LedAction::Hold
        }
    }
}

impl<C: ControlConfig> Default for Indicator<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fan on/off decision with hysteresis relative to the setpoint.
#[derive(Debug, Clone)]
pub struct FanControl<C: ControlConfig> {
    on: bool,
    _config: PhantomData<C>,
}

impl<C: ControlConfig> FanControl<C> {
    /// Create controller with the fan off.
    pub const fn new() -> Self {
        Self {
            on: false,
            _config: PhantomData,
        }
    }

    /// Decide the fan state for this tick.
    ///
    /// Alarm forces the fan on regardless of hysteresis.
    pub fn update(&mut self, measured_c: f32, setpoint_c: f32, alarm: bool) -> bool {
        let excess = measured_c - setpoint_c;
        if alarm || excess > C::FAN_ON_ABOVE_C {
            self.on = true;
        } else if excess < C::FAN_OFF_ABOVE_C {
            self.on = false;
        }
        self.on
    }

    /// Last decided state.
    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl<C: ControlConfig> Default for FanControl<C> {
    fn default() -> Self {
        Self::new()
    }
}
