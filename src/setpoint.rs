//! Process-wide temperature setpoint.
//!
//! The store is written by several producers (UART, button, potentiometer)
//! and read by the controller. Each write is a single atomic store of the
//! clamped value, so producers never need to coordinate: the last write wins
//! and a reader can never observe an out-of-range or torn value.

use crate::config::ControlConfig;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU32, Ordering};

/// Full-scale potentiometer code.
const POT_FULL_SCALE: f32 = 4095.0;

/// Clamp a setpoint into the configured safety window.
///
/// NaN maps to `SAFE_MIN_C`, the coldest safe value.
pub fn clamp_setpoint<C: ControlConfig>(value_c: f32) -> f32 {
    if value_c.is_nan() {
        C::SAFE_MIN_C
    } else {
        value_c.clamp(C::SAFE_MIN_C, C::SAFE_MAX_C)
    }
}

/// Map a raw potentiometer code onto `[POT_MIN_C, POT_MAX_C]`.
pub fn pot_to_celsius<C: ControlConfig>(raw: u16) -> f32 {
    let x = (raw as f32 / POT_FULL_SCALE).min(1.0);
    C::POT_MIN_C + x * (C::POT_MAX_C - C::POT_MIN_C)
}

/// Clamped setpoint shared between producers and the controller.
///
/// Const-constructible so it can live in a `static`:
///
/// ```rust
/// use heatctl::{DefaultConfig, SetpointStore};
///
/// static SETPOINT: SetpointStore<DefaultConfig> = SetpointStore::new();
///
/// assert_eq!(SETPOINT.set(1000.0), 60.0);
/// assert_eq!(SETPOINT.get(), 60.0);
/// ```
#[derive(Debug)]
pub struct SetpointStore<C: ControlConfig> {
    /// `f32` bit pattern of the current setpoint
    bits: AtomicU32,

    /// Config type marker (zero-size)
    _config: PhantomData<C>,
}

impl<C: ControlConfig> SetpointStore<C> {
    /// Create store holding `SETPOINT_DEFAULT_C`.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(C::SETPOINT_DEFAULT_C.to_bits()),
            _config: PhantomData,
        }
    }

    /// Current setpoint (°C).
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Store a new setpoint, clamped into the safety window.
    ///
    /// Returns the value actually stored.
    pub fn set(&self, value_c: f32) -> f32 {
        let clamped = clamp_setpoint::<C>(value_c);
        self.bits.store(clamped.to_bits(), Ordering::Relaxed);
        clamped
    }

    /// Store the setpoint selected by a raw potentiometer code.
    pub fn set_from_pot(&self, raw: u16) -> f32 {
        self.set(pot_to_celsius::<C>(raw))
    }

    /// Advance the setpoint by `SETPOINT_STEP_C`, wrapping back to
    /// `SAFE_MIN_C` once the step would pass `SAFE_MAX_C`.
    ///
    /// Read-modify-write; only call from the context that owns the button.
    pub fn step_up(&self) -> f32 {
        let next = self.get() + C::SETPOINT_STEP_C;
        if next > C::SAFE_MAX_C + f32::EPSILON {
            self.set(C::SAFE_MIN_C)
        } else {
            self.set(next)
        }
    }
}

impl<C: ControlConfig> Default for SetpointStore<C> {
    fn default() -> Self {
        Self::new()
    }
}
