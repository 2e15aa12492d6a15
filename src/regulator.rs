//! Periodic tick orchestration.
//!
//! The `Regulator` owns every per-tick component and drives them in a fixed
//! order each period:
//!
//! ```text
//! button ─► pot (if tracking) ─► thermistor ─► filter ─► PI / cutoff
//!        ─► heater ─► fan ─► LED ─► UART line ─► telemetry
//! ```
//!
//! Only the setpoint store and the line gate are shared with other contexts;
//! both are passed in rather than held as globals. Hardware faults are logged
//! and absorbed: a failed thermistor read keeps the last filtered value, a
//! failed output write is retried implicitly on the next tick.

use crate::button::{Button, ButtonEvent};
use crate::config::ControlConfig;
use crate::error::BoardError;
use crate::filter::{FILTER_DEPTH, MovingAverage};
use crate::indicator::{FanControl, Indicator, LedAction};
use crate::io::{Board, SerialTx};
use crate::pi::{DUTY_MIN, PiController};
use crate::protocol::{LineConsumer, Link, Reply, Telemetry};
use crate::setpoint::SetpointStore;
use crate::thermistor::raw_to_celsius;

/// Which producer currently owns the setpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetpointSource {
    /// Startup default or button steps
    Local,

    /// Tracking the potentiometer
    Potentiometer,

    /// Last written by a UART `T` command
    Remote,
}

/// Snapshot of one tick, for logging and host tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TickReport {
    /// Filtered temperature, `None` until the first good thermistor read
    pub measured_c: Option<f32>,

    /// Setpoint used by the controller this tick
    pub setpoint_c: f32,

    /// Heater duty commanded this tick (%)
    pub duty_percent: f32,

    /// Button event consumed this tick
    pub button: ButtonEvent,

    /// Reply sent to a UART line this tick
    pub reply: Option<Reply>,

    /// True if a telemetry line was sent this tick
    pub telemetry_sent: bool,

    /// Over-temperature cutoff active
    pub alarm: bool,

    /// Fan state commanded this tick
    pub fan_on: bool,

    /// Setpoint source after this tick
    pub source: SetpointSource,
}

/// Single-loop heater regulator.
///
/// Generic over:
/// - `'a`: lifetime of the shared setpoint store and line gate
/// - `C`: ControlConfig implementation
/// - `BD`: Board implementation
/// - `TX`: SerialTx implementation
#[derive(Debug)]
pub struct Regulator<'a, C, BD, TX>
where
    C: ControlConfig,
    BD: Board,
    TX: SerialTx,
{
    board: BD,
    link: Link<'a, TX>,
    store: &'a SetpointStore<C>,

    button: Button<C>,
    filter: MovingAverage<FILTER_DEPTH>,
    pi: PiController<C>,
    fan: FanControl<C>,
    indicator: Indicator<C>,

    source: SetpointSource,
    last_remote_c: Option<f32>,
    measured_c: Option<f32>,
    duty_percent: f32,
    alarm: bool,
}

impl<'a, C, BD, TX> Regulator<'a, C, BD, TX>
where
    C: ControlConfig,
    BD: Board,
    TX: SerialTx,
{
    /// Create regulator over a board, the tick side of a line gate, a
    /// transmitter and the shared setpoint store.
    pub fn new(board: BD, rx: LineConsumer<'a>, tx: TX, store: &'a SetpointStore<C>) -> Self {
        Self {
            board,
            link: Link::new(rx, tx),
            store,
            button: Button::new(),
            filter: MovingAverage::new(),
            pi: PiController::new(),
            fan: FanControl::new(),
            indicator: Indicator::new(),
            source: SetpointSource::Local,
            last_remote_c: None,
            measured_c: None,
            duty_percent: DUTY_MIN,
            alarm: false,
        }
    }

    /// Run one control period.
    ///
    /// Only transport errors are returned; board faults are absorbed.
    pub fn tick(&mut self) -> Result<TickReport, TX::Error> {
        let button = self.handle_button();

        if self.source == SetpointSource::Potentiometer {
            if let Some(raw) = absorb(self.board.read_pot_raw()) {
                self.store.set_from_pot(raw);
            }
        }

        if let Some(raw) = absorb(self.board.read_thermistor_raw()) {
            let celsius = raw_to_celsius(raw, &C::NTC);
            self.measured_c = Some(self.filter.filter(celsius));
        }

        let setpoint_c = self.store.get();
        self.regulate(setpoint_c);

        let fan_on = match self.measured_c {
            Some(measured) => self.fan.update(measured, setpoint_c, self.alarm),
            None => self.fan.is_on(),
        };
        absorb(self.board.set_fan(fan_on));

        self.drive_led(setpoint_c);

        let reply = self.link.poll(self.store)?;
        if let Some(remote) = self.link.take_remote_setpoint() {
            if self.source != SetpointSource::Remote {
                info!("regulator: source {} -> Remote", self.source);
            }
            self.source = SetpointSource::Remote;
            self.last_remote_c = Some(remote);
        }

        // A request made before the first measurement stays pending
        let telemetry_sent = match self.telemetry() {
            Some(telemetry) if self.link.take_telemetry_request() => {
                self.link.send_telemetry(&telemetry)?;
                true
            }
            _ => false,
        };

        Ok(TickReport {
            measured_c: self.measured_c,
            setpoint_c,
            duty_percent: self.duty_percent,
            button,
            reply,
            telemetry_sent,
            alarm: self.alarm,
            fan_on,
            source: self.source,
        })
    }

    fn handle_button(&mut self) -> ButtonEvent {
        if let Some(level) = absorb(self.board.button_pressed()) {
            self.button.tick(level);
        }

        let event = self.button.consume_event();
        match event {
            ButtonEvent::Short => {
                let stored = self.store.step_up();
                info!("regulator: button step, setpoint {}", stored);
                self.source = SetpointSource::Local;
            }
            ButtonEvent::Long => {
                self.source = if self.source == SetpointSource::Potentiometer {
                    SetpointSource::Local
                } else {
                    SetpointSource::Potentiometer
                };
                info!("regulator: source -> {}", self.source);
            }
            ButtonEvent::None => {}
        }
        event
    }

    fn regulate(&mut self, setpoint_c: f32) {
        let Some(measured) = self.measured_c else {
            self.duty_percent = DUTY_MIN;
            absorb(self.board.set_heater_duty(DUTY_MIN));
            return;
        };

        let alarm = measured > C::SAFE_MAX_C + C::ALARM_MARGIN_C;
        if alarm != self.alarm {
            if alarm {
                warn!("regulator: over-temperature {}, heater off", measured);
            } else {
                info!("regulator: temperature back to {}", measured);
            }
            self.alarm = alarm;
        }

        self.duty_percent = if alarm {
            self.pi.reset();
            DUTY_MIN
        } else {
            self.pi.update(setpoint_c, measured)
        };
        absorb(self.board.set_heater_duty(self.duty_percent));
    }

    fn drive_led(&mut self, setpoint_c: f32) {
        let in_range = self
            .measured_c
            .is_some_and(|m| (m - setpoint_c).abs() <= C::IN_RANGE_BAND_C);

        match self.indicator.tick(in_range, self.alarm) {
            LedAction::On => {
                absorb(self.board.set_led(true));
            }
            LedAction::Toggle => {
                absorb(self.board.toggle_led());
            }
            LedAction::Hold => {}
        }
    }

    fn telemetry(&self) -> Option<Telemetry> {
        Some(Telemetry {
            measured_c: self.measured_c?,
            setpoint_c: self.store.get(),
            duty_percent: self.duty_percent,
        })
    }

    /// Active setpoint source.
    pub fn source(&self) -> SetpointSource {
        self.source
    }

    /// Setpoint of the last accepted UART `T` command.
    pub fn last_remote_setpoint(&self) -> Option<f32> {
        self.last_remote_c
    }

    /// Filtered temperature, `None` until the first good read.
    pub fn measured(&self) -> Option<f32> {
        self.measured_c
    }

    /// Last commanded heater duty (%).
    pub fn duty(&self) -> f32 {
        self.duty_percent
    }

    /// True while the over-temperature cutoff is active.
    pub fn is_alarm(&self) -> bool {
        self.alarm
    }

    /// Shared setpoint store.
    pub fn store(&self) -> &'a SetpointStore<C> {
        self.store
    }

    /// Get reference to the board.
    pub fn board(&self) -> &BD {
        &self.board
    }

    /// Get mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut BD {
        &mut self.board
    }

    /// Get mutable reference to the protocol endpoint.
    pub fn link_mut(&mut self) -> &mut Link<'a, TX> {
        &mut self.link
    }
}

/// Log a board fault and turn it into `None`.
fn absorb<T>(result: Result<T, BoardError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("board: {}", e);
            None
        }
    }
}
