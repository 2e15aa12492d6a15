//! heatctl-tunegen: turn a `tuning.toml` into a `ControlConfig` implementation.
//!
//! Usage:
//!
//! ```text
//! heatctl-tunegen <tuning.toml> [TypeName]
//! ```
//!
//! Prints Rust source to stdout; a firmware build script writes it to
//! `OUT_DIR` and `include!`s it. Every key is optional and falls back to
//! `DefaultConfig`. Inconsistent tunings are rejected with a non-zero exit.
//!
//! ```toml
//! [setpoint]
//! safe_min_c = 20.0
//! safe_max_c = 60.0
//! default_c = 35.0
//!
//! [pi]
//! kp = 2.0
//! ki = 0.5
//! ```

use heatctl::{ControlConfig, DefaultConfig, NtcParams};
use serde::Deserialize;
use std::fmt::{self, Write as _};
use std::process::ExitCode;

// ============================================================================
// TOML schema
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Tuning {
    setpoint: SetpointSection,
    pi: PiSection,
    button: ButtonSection,
    fan: FanSection,
    status: StatusSection,
    thermistor: ThermistorSection,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SetpointSection {
    safe_min_c: f32,
    safe_max_c: f32,
    default_c: f32,
    step_c: f32,
    pot_min_c: f32,
    pot_max_c: f32,
}

impl Default for SetpointSection {
    fn default() -> Self {
        Self {
            safe_min_c: DefaultConfig::SAFE_MIN_C,
            safe_max_c: DefaultConfig::SAFE_MAX_C,
            default_c: DefaultConfig::SETPOINT_DEFAULT_C,
            step_c: DefaultConfig::SETPOINT_STEP_C,
            pot_min_c: DefaultConfig::POT_MIN_C,
            pot_max_c: DefaultConfig::POT_MAX_C,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PiSection {
    kp: f32,
    ki: f32,
    ts_s: f32,
}

impl Default for PiSection {
    fn default() -> Self {
        Self {
            kp: DefaultConfig::KP,
            ki: DefaultConfig::KI,
            ts_s: DefaultConfig::TS_S,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ButtonSection {
    debounce_ticks: u32,
    long_press_ticks: u32,
}

impl Default for ButtonSection {
    fn default() -> Self {
        Self {
            debounce_ticks: DefaultConfig::DEBOUNCE_TICKS,
            long_press_ticks: DefaultConfig::LONG_PRESS_TICKS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FanSection {
    on_above_c: f32,
    off_above_c: f32,
}

impl Default for FanSection {
    fn default() -> Self {
        Self {
            on_above_c: DefaultConfig::FAN_ON_ABOVE_C,
            off_above_c: DefaultConfig::FAN_OFF_ABOVE_C,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct StatusSection {
    in_range_band_c: f32,
    alarm_margin_c: f32,
    heartbeat_ticks: u32,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            in_range_band_c: DefaultConfig::IN_RANGE_BAND_C,
            alarm_margin_c: DefaultConfig::ALARM_MARGIN_C,
            heartbeat_ticks: DefaultConfig::HEARTBEAT_TICKS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThermistorSection {
    vref: f32,
    adc_max: f32,
    r_fixed: f32,
    beta: f32,
    r0: f32,
    t0_k: f32,
}

impl Default for ThermistorSection {
    fn default() -> Self {
        let ntc = DefaultConfig::NTC;
        Self {
            vref: ntc.vref,
            adc_max: ntc.adc_max,
            r_fixed: ntc.r_fixed,
            beta: ntc.beta,
            r0: ntc.r0,
            t0_k: ntc.t0_k,
        }
    }
}

impl ThermistorSection {
    fn to_params(&self) -> NtcParams {
        NtcParams {
            vref: self.vref,
            adc_max: self.adc_max,
            r_fixed: self.r_fixed,
            beta: self.beta,
            r0: self.r0,
            t0_k: self.t0_k,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
enum TuneError {
    Read(String, std::io::Error),
    Parse(toml::de::Error),
    NotFinite(&'static str),
    NotPositive(&'static str),
    Window(&'static str),
    BadTypeName(String),
    Format,
}

impl fmt::Display for TuneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuneError::Read(path, e) => write!(f, "cannot read {}: {}", path, e),
            TuneError::Parse(e) => write!(f, "invalid tuning file: {}", e),
            TuneError::NotFinite(key) => write!(f, "{} must be a finite number", key),
            TuneError::NotPositive(key) => write!(f, "{} must be greater than zero", key),
            TuneError::Window(msg) => write!(f, "inconsistent tuning: {}", msg),
            TuneError::BadTypeName(name) => write!(f, "'{}' is not a Rust type name", name),
            TuneError::Format => write!(f, "failed to format generated source"),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate(t: &Tuning) -> Result<(), TuneError> {
    let floats: [(&'static str, f32); 19] = [
        ("setpoint.safe_min_c", t.setpoint.safe_min_c),
        ("setpoint.safe_max_c", t.setpoint.safe_max_c),
        ("setpoint.default_c", t.setpoint.default_c),
        ("setpoint.step_c", t.setpoint.step_c),
        ("setpoint.pot_min_c", t.setpoint.pot_min_c),
        ("setpoint.pot_max_c", t.setpoint.pot_max_c),
        ("pi.kp", t.pi.kp),
        ("pi.ki", t.pi.ki),
        ("pi.ts_s", t.pi.ts_s),
        ("fan.on_above_c", t.fan.on_above_c),
        ("fan.off_above_c", t.fan.off_above_c),
        ("status.in_range_band_c", t.status.in_range_band_c),
        ("status.alarm_margin_c", t.status.alarm_margin_c),
        ("thermistor.vref", t.thermistor.vref),
        ("thermistor.adc_max", t.thermistor.adc_max),
        ("thermistor.r_fixed", t.thermistor.r_fixed),
        ("thermistor.beta", t.thermistor.beta),
        ("thermistor.r0", t.thermistor.r0),
        ("thermistor.t0_k", t.thermistor.t0_k),
    ];
    for (key, value) in floats {
        if !value.is_finite() {
            return Err(TuneError::NotFinite(key));
        }
    }

    let positive: [(&'static str, f32); 8] = [
        ("setpoint.step_c", t.setpoint.step_c),
        ("pi.ts_s", t.pi.ts_s),
        ("thermistor.vref", t.thermistor.vref),
        ("thermistor.adc_max", t.thermistor.adc_max),
        ("thermistor.r_fixed", t.thermistor.r_fixed),
        ("thermistor.beta", t.thermistor.beta),
        ("thermistor.r0", t.thermistor.r0),
        ("thermistor.t0_k", t.thermistor.t0_k),
    ];
    for (key, value) in positive {
        if value <= 0.0 {
            return Err(TuneError::NotPositive(key));
        }
    }
    if t.pi.kp < 0.0 || t.pi.ki < 0.0 {
        return Err(TuneError::Window("PI gains must not be negative"));
    }
    if t.status.heartbeat_ticks == 0 {
        return Err(TuneError::NotPositive("status.heartbeat_ticks"));
    }

    let s = &t.setpoint;
    if s.safe_min_c >= s.safe_max_c {
        return Err(TuneError::Window("safe_min_c must be below safe_max_c"));
    }
    if s.default_c < s.safe_min_c || s.default_c > s.safe_max_c {
        return Err(TuneError::Window("default_c lies outside the safe window"));
    }
    if s.pot_min_c > s.pot_max_c {
        return Err(TuneError::Window("pot_min_c must not exceed pot_max_c"));
    }
    if t.fan.off_above_c > t.fan.on_above_c {
        return Err(TuneError::Window("fan.off_above_c must not exceed fan.on_above_c"));
    }
    if t.button.debounce_ticks >= t.button.long_press_ticks {
        return Err(TuneError::Window(
            "button.long_press_ticks must exceed button.debounce_ticks",
        ));
    }

    Ok(())
}

fn validate_type_name(name: &str) -> Result<(), TuneError> {
    let mut chars = name.chars();
    let head_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(TuneError::BadTypeName(name.to_owned()))
    }
}

// ============================================================================
// Code generation
// ============================================================================

fn generate(t: &Tuning, source: &str, type_name: &str) -> Result<String, fmt::Error> {
    let ntc = t.thermistor.to_params();
    let mut out = String::new();

    writeln!(out, "// Generated by heatctl-tunegen from {}. Do not edit.", source)?;
    writeln!(out)?;
    writeln!(out, "/// Controller tuning generated at build time.")?;
    writeln!(out, "#[derive(Debug, Copy, Clone, PartialEq, Eq)]")?;
    writeln!(out, "pub struct {};", type_name)?;
    writeln!(out)?;
    writeln!(out, "impl heatctl::ControlConfig for {} {{", type_name)?;

    let consts: [(&str, f32); 13] = [
        ("SAFE_MIN_C", t.setpoint.safe_min_c),
        ("SAFE_MAX_C", t.setpoint.safe_max_c),
        ("SETPOINT_DEFAULT_C", t.setpoint.default_c),
        ("SETPOINT_STEP_C", t.setpoint.step_c),
        ("POT_MIN_C", t.setpoint.pot_min_c),
        ("POT_MAX_C", t.setpoint.pot_max_c),
        ("KP", t.pi.kp),
        ("KI", t.pi.ki),
        ("TS_S", t.pi.ts_s),
        ("FAN_ON_ABOVE_C", t.fan.on_above_c),
        ("FAN_OFF_ABOVE_C", t.fan.off_above_c),
        ("IN_RANGE_BAND_C", t.status.in_range_band_c),
        ("ALARM_MARGIN_C", t.status.alarm_margin_c),
    ];
    for (name, value) in consts {
        writeln!(out, "    const {}: f32 = {:?};", name, value)?;
    }

    let ticks: [(&str, u32); 3] = [
        ("DEBOUNCE_TICKS", t.button.debounce_ticks),
        ("LONG_PRESS_TICKS", t.button.long_press_ticks),
        ("HEARTBEAT_TICKS", t.status.heartbeat_ticks),
    ];
    for (name, value) in ticks {
        writeln!(out, "    const {}: u32 = {};", name, value)?;
    }

    writeln!(out, "    const NTC: heatctl::NtcParams = heatctl::NtcParams {{")?;
    writeln!(out, "        vref: {:?},", ntc.vref)?;
    writeln!(out, "        adc_max: {:?},", ntc.adc_max)?;
    writeln!(out, "        r_fixed: {:?},", ntc.r_fixed)?;
    writeln!(out, "        beta: {:?},", ntc.beta)?;
    writeln!(out, "        r0: {:?},", ntc.r0)?;
    writeln!(out, "        t0_k: {:?},", ntc.t0_k)?;
    writeln!(out, "    }};")?;
    writeln!(out, "}}")?;

    Ok(out)
}

fn run(path: &str, type_name: &str) -> Result<String, TuneError> {
    validate_type_name(type_name)?;

    let text = std::fs::read_to_string(path).map_err(|e| TuneError::Read(path.to_owned(), e))?;
    let tuning: Tuning = toml::from_str(&text).map_err(TuneError::Parse)?;
    validate(&tuning)?;

    let source = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_owned());

    generate(&tuning, &source, type_name).map_err(|_| TuneError::Format)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: heatctl-tunegen <tuning.toml> [TypeName]");
        return ExitCode::from(2);
    };
    let type_name = args.get(2).map(String::as_str).unwrap_or("TunedConfig");

    match run(path, type_name) {
        Ok(code) => {
            print!("{}", code);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("heatctl-tunegen: {}", e);
            ExitCode::FAILURE
        }
    }
}
