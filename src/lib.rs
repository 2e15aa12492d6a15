//! # heatctl
//!
//! Single-loop heater controller core for embedded systems with zero heap
//! allocation.
//!
//! **Key features:**
//! - **PI control** - Conditional-integration anti-windup, clamped duty
//! - **Thermistor conversion** - Beta-model NTC on a pull-up divider
//! - **Debounced button** - Short/long press classification, single-slot mailbox
//! - **UART protocol** - CRC-8 framed commands and telemetry
//! - **Const configuration** - Limits, gains and timing as trait constants
//! - **Flexible I/O** - Platform-agnostic board and transmit traits
//!
//! ## Wiring
//!
//! ```rust
//! use heatctl::{DefaultConfig, LineGate, Regulator, SetpointStore};
//! # use heatctl::{Board, BoardError, SerialTx};
//! # struct Bench;
//! # impl Board for Bench {
//! #     fn read_thermistor_raw(&mut self) -> Result<u16, BoardError> { Ok(2048) }
//! #     fn read_pot_raw(&mut self) -> Result<u16, BoardError> { Ok(0) }
//! #     fn button_pressed(&mut self) -> Result<bool, BoardError> { Ok(false) }
//! #     fn set_heater_duty(&mut self, _: f32) -> Result<(), BoardError> { Ok(()) }
//! #     fn set_fan(&mut self, _: bool) -> Result<(), BoardError> { Ok(()) }
//! #     fn set_led(&mut self, _: bool) -> Result<(), BoardError> { Ok(()) }
//! #     fn toggle_led(&mut self) -> Result<(), BoardError> { Ok(()) }
//! # }
//! # struct Uart;
//! # impl SerialTx for Uart {
//! #     type Error = ();
//! #     fn transmit(&mut self, _: &[u8]) -> Result<(), ()> { Ok(()) }
//! # }
//!
//! static SETPOINT: SetpointStore<DefaultConfig> = SetpointStore::new();
//!
//! let mut gate: LineGate = LineGate::new();
//! let (mut rx, consumer) = gate.split();
//! let mut regulator = Regulator::new(Bench, consumer, Uart, &SETPOINT);
//!
//! // Reception context
//! rx.push_bytes(b"?*BD\r\n");
//!
//! // Every 100 ms
//! let report = regulator.tick()?;
//! assert!(report.measured_c.is_some());
//! # Ok::<(), ()>(())
//! ```
//!
//! ## Optional Features
//!
//! - `defmt` - Structured logging and `defmt::Format` on public types
//! - `tunegen` - `heatctl-tunegen` binary generating a `ControlConfig` from TOML
//!
//! This library is `no_std` compatible.

#![no_std]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

extern crate heapless;

// Logging shim, must come first so the macros are visible below
#[macro_use]
mod fmt;

// ============================================================================
// Module Declarations
// ============================================================================

// Foundation
pub mod config;
pub mod error;
pub mod io;

// Signal path
pub mod filter;
pub mod pi;
pub mod setpoint;
pub mod thermistor;

// Operator interface
pub mod button;
pub mod indicator;
pub mod protocol;

// Orchestration
pub mod regulator;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{ControlConfig, DefaultConfig, NtcParams};

// Error types
pub use error::{BoardError, ProtocolError};

// Hardware capabilities
pub use io::{AdcChannel, Board, HalBoard, SerialTx};

// Components
pub use button::{Button, ButtonEvent};
pub use filter::MovingAverage;
pub use indicator::{FanControl, Indicator, LedAction};
pub use pi::PiController;
pub use setpoint::SetpointStore;
pub use thermistor::raw_to_celsius;

// Protocol
pub use protocol::{Command, LineConsumer, LineGate, LineProducer, Link, Reply, RxOutcome, Telemetry};

// Orchestration
pub use regulator::{Regulator, SetpointSource, TickReport};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
