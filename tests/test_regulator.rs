//! Control loop integration tests.
//!
//! Drives the regulator against a scripted board and checks heater, fan, LED
//! and cutoff behavior across ticks.

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use helpers::*;
use heatctl::{ButtonEvent, ControlConfig, DefaultConfig};

// ============================================================================
// Heater
// ============================================================================

#[test]
fn test_first_tick_from_cold() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_25C));

    let report = regulator.tick().unwrap();
    let measured = report.measured_c.unwrap();
    assert!((measured - 25.0).abs() < 0.1, "measured {}", measured);

    // Kp·e + Ki·e·Ts with e ≈ 10
    assert!(
        (report.duty_percent - 20.5).abs() < 0.5,
        "duty {}",
        report.duty_percent
    );
    assert_eq!(regulator.board().last_duty(), Some(report.duty_percent));
    assert_eq!(report.button, ButtonEvent::None);
    assert_eq!(report.reply, None);
    assert!(!report.alarm);
}

#[test]
fn test_duty_rises_while_below_setpoint() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_25C));

    let first = regulator.tick().unwrap().duty_percent;
    let later = run_ticks(&mut regulator, 50).duty_percent;
    assert!(later > first);
    assert!(later <= 100.0);
}

#[test]
fn test_saturates_when_far_below_setpoint() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_20C));
    regulator.store().set(60.0);

    let report = run_ticks(&mut regulator, 500);
    assert_eq!(report.duty_percent, 100.0);
    assert!(regulator.board().duty_log.iter().all(|d| (0.0..=100.0).contains(d)));
}

#[test]
fn test_no_heat_above_setpoint() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_45C));

    let report = run_ticks(&mut regulator, 20);
    assert_eq!(report.duty_percent, 0.0);
}

#[test]
fn test_filter_smooths_step() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_25C));
    run_ticks(&mut regulator, 9);

    regulator.board_mut().thermistor = Some(RAW_45C);
    let after_one = regulator.tick().unwrap().measured_c.unwrap();
    assert!(after_one > 26.0 && after_one < 28.0, "got {}", after_one);

    let settled = run_ticks(&mut regulator, 8).measured_c.unwrap();
    assert!((settled - 45.0).abs() < 0.1, "got {}", settled);
}

// ============================================================================
// Fan
// ============================================================================

#[test]
fn test_fan_follows_hysteresis() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_35C));

    assert!(!run_ticks(&mut regulator, 10).fan_on);

    regulator.board_mut().thermistor = Some(RAW_45C);
    assert!(run_ticks(&mut regulator, 10).fan_on);
    assert!(regulator.board().fan);

    regulator.board_mut().thermistor = Some(RAW_35C);
    let report = run_ticks(&mut regulator, 10);
    assert!(!report.fan_on);
    assert!(!regulator.board().fan);
}

// ============================================================================
// Over-temperature cutoff
// ============================================================================

#[test]
fn test_alarm_forces_heater_off() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_66C));
    regulator.store().set(60.0);

    let report = regulator.tick().unwrap();
    assert!(report.alarm);
    assert!(regulator.is_alarm());
    assert_eq!(report.duty_percent, 0.0);
    assert!(report.fan_on);
}

#[test]
fn test_alarm_clears_when_cooled() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_66C));
    run_ticks(&mut regulator, 10);
    assert!(regulator.is_alarm());

    regulator.board_mut().thermistor = Some(RAW_35C);
    let report = run_ticks(&mut regulator, 10);
    assert!(!report.alarm);
    assert!(!regulator.is_alarm());
}

#[test]
fn test_alarm_blinks_led_every_tick() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_66C));

    run_ticks(&mut regulator, 6);
    assert_eq!(regulator.board().led_toggles, 6);
}

// ============================================================================
// Status LED
// ============================================================================

#[test]
fn test_led_solid_in_range() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_35C));

    run_ticks(&mut regulator, 25);
    assert!(regulator.board().led);
    assert_eq!(regulator.board().led_toggles, 0);
}

#[test]
fn test_led_heartbeat_out_of_range() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_25C));

    run_ticks(&mut regulator, 30);
    assert_eq!(
        regulator.board().led_toggles,
        30 / DefaultConfig::HEARTBEAT_TICKS as usize
    );
}

// ============================================================================
// Board faults
// ============================================================================

#[test]
fn test_no_measurement_no_heat() {
    let mut board = MockBoard::with_thermistor(RAW_25C);
    board.thermistor = None;
    let (_rx, mut regulator) = create_regulator(board);

    let report = run_ticks(&mut regulator, 5);
    assert_eq!(report.measured_c, None);
    assert_eq!(report.duty_percent, 0.0);
    assert!(regulator.board().duty_log.iter().all(|d| *d == 0.0));
}

#[test]
fn test_adc_failure_keeps_last_measurement() {
    let (_rx, mut regulator) = create_regulator(MockBoard::with_thermistor(RAW_25C));
    let before = regulator.tick().unwrap().measured_c;

    regulator.board_mut().thermistor = None;
    let report = regulator.tick().unwrap();
    assert_eq!(report.measured_c, before);
    assert!(report.duty_percent > 0.0);
}

#[test]
fn test_pwm_failure_is_absorbed() {
    let mut board = MockBoard::with_thermistor(RAW_25C);
    board.fail_pwm = true;
    let (_rx, mut regulator) = create_regulator(board);

    let report = run_ticks(&mut regulator, 3);
    assert!(report.duty_percent > 0.0);
    assert!(regulator.board().duty_log.is_empty());
}
