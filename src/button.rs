//! Debounced push-button with short/long press classification.
//!
//! Pure state machine: the caller samples the pin once per tick and passes
//! the raw level in. Detected presses land in a single-slot mailbox that the
//! application drains with [`Button::consume_event`].
//!
//! ```text
//!   raw level ──► debounce (DEBOUNCE_TICKS stable) ──► debounced level
//!                                                        │
//!                        released → pressed: hold = 0    │
//!                        pressed → released: classify ◄──┘
//!                             hold >= LONG_PRESS_TICKS ? Long : Short
//! ```

use crate::config::ControlConfig;
use core::marker::PhantomData;

/// Classified button event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Nothing pending
    None,

    /// Released before `LONG_PRESS_TICKS`
    Short,

    /// Held for at least `LONG_PRESS_TICKS`
    Long,
}

/// Button debouncer and press classifier.
///
/// Counters saturate instead of wrapping, so a button held for days still
/// reports `Long` on release.
#[derive(Debug, Clone)]
pub struct Button<C: ControlConfig> {
    /// Raw level seen on the previous tick (`true` = pressed)
    raw_previous: bool,

    /// Accepted level
    debounced: bool,

    /// Consecutive ticks `raw_previous` has been stable
    debounce_ticks: u32,

    /// Ticks the debounced level has been pressed
    hold_ticks: u32,

    /// Single-slot mailbox, never overwritten while occupied
    pending: ButtonEvent,

    _config: PhantomData<C>,
}

impl<C: ControlConfig> Button<C> {
    /// Create button in the released state with an empty mailbox.
    pub const fn new() -> Self {
        Self {
            raw_previous: false,
            debounced: false,
            debounce_ticks: 0,
            hold_ticks: 0,
            pending: ButtonEvent::None,
            _config: PhantomData,
        }
    }

    /// Advance one tick with the latest raw pin level.
    pub fn tick(&mut self, raw_pressed: bool) {
        if raw_pressed == self.raw_previous {
            self.debounce_ticks = self.debounce_ticks.saturating_add(1);
        } else {
            self.debounce_ticks = 0;
            self.raw_previous = raw_pressed;
        }

        if self.debounce_ticks >= C::DEBOUNCE_TICKS && raw_pressed != self.debounced {
            self.debounced = raw_pressed;

            if self.debounced {
                self.hold_ticks = 0;
            } else {
                let event = if self.hold_ticks >= C::LONG_PRESS_TICKS {
                    ButtonEvent::Long
                } else {
                    ButtonEvent::Short
                };
                self.post(event);
                self.hold_ticks = 0;
            }
        }

        if self.debounced {
            self.hold_ticks = self.hold_ticks.saturating_add(1);
        }
    }

    /// Take the pending event, leaving the mailbox empty.
    pub fn consume_event(&mut self) -> ButtonEvent {
        core::mem::replace(&mut self.pending, ButtonEvent::None)
    }

    /// Debounced level, `true` while pressed.
    pub fn is_pressed(&self) -> bool {
        self.debounced
    }

    /// Ticks the current press has lasted so far.
    pub fn hold_ticks(&self) -> u32 {
        self.hold_ticks
    }

    fn post(&mut self, event: ButtonEvent) {
        if self.pending == ButtonEvent::None {
            trace!("button: {}", event);
            self.pending = event;
        } else {
            debug!("button: mailbox full, dropping {}", event);
        }
    }
}

impl<C: ControlConfig> Default for Button<C> {
    fn default() -> Self {
        Self::new()
    }
}
