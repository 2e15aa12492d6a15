//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::*;

use heatctl::protocol::frame_into;
use heatctl::{
    ControlConfig, DefaultConfig, LineGate, LineProducer, Regulator, SetpointStore, TickReport,
};

/// Regulator type used throughout the integration tests.
pub type TestRegulator = Regulator<'static, DefaultConfig, MockBoard, MockSerial>;

// ============================================================================
// Creation Helpers
// ============================================================================

/// Leak a fresh setpoint store so it can be shared for `'static`.
pub fn leak_store() -> &'static SetpointStore<DefaultConfig> {
    Box::leak(Box::new(SetpointStore::new()))
}

/// Create a regulator over `board` with its own store and line gate.
///
/// Returns the reception handle alongside the regulator.
pub fn create_regulator(board: MockBoard) -> (LineProducer<'static>, TestRegulator) {
    let store = leak_store();
    let gate: &'static mut LineGate = Box::leak(Box::new(LineGate::new()));
    let (rx, consumer) = gate.split();
    (rx, Regulator::new(board, consumer, MockSerial::new(), store))
}

// ============================================================================
// Frame Helpers
// ============================================================================

/// Build `payload*HH\r\n`.
pub fn frame(payload: &str) -> String {
    let mut line = String::new();
    frame_into(&mut line, payload).unwrap();
    line
}

/// Feed a framed command to the reception side.
pub fn send(rx: &mut LineProducer<'static>, payload: &str) {
    rx.push_bytes(frame(payload).as_bytes());
}

/// Run `n` ticks and return the last report.
pub fn run_ticks(regulator: &mut TestRegulator, n: usize) -> TickReport {
    let mut last = regulator.tick().unwrap();
    for _ in 1..n {
        last = regulator.tick().unwrap();
    }
    last
}

/// Hold the button for `ticks` ticks, then release it long enough to commit.
///
/// Returns the reports of every tick run.
pub fn press_button(regulator: &mut TestRegulator, ticks: usize) -> Vec<TickReport> {
    let mut reports = Vec::new();
    regulator.board_mut().button = true;
    for _ in 0..ticks {
        reports.push(regulator.tick().unwrap());
    }
    regulator.board_mut().button = false;
    for _ in 0..=DefaultConfig::DEBOUNCE_TICKS {
        reports.push(regulator.tick().unwrap());
    }
    reports
}
