//! UART command/telemetry protocol.
//!
//! One ASCII line per message. Inbound lines carry a CRC-8 suffix:
//!
//! ```text
//! T35.0*HH\r\n     set temperature      -> OK
//! ?*HH\r\n         request telemetry    -> OK, then one telemetry line
//! <other>*HH\r\n   unknown command      -> ERR
//! <bad frame>      checksum failure     -> ERR:CRC
//! ```
//!
//! Telemetry goes out as `{"T_meas":F.FF,"T_ref":F.FF,"PWM":F.F}*HH\r\n`.
//!
//! [`Link`] is the tick-side endpoint. It claims completed lines from a
//! [`LineConsumer`], validates and executes them against the
//! [`SetpointStore`], and writes replies through a [`SerialTx`].

use crate::config::ControlConfig;
use crate::io::SerialTx;
use crate::setpoint::SetpointStore;

pub mod command;
pub mod crc;
pub mod frame;
pub mod line;
pub mod reply;
pub mod telemetry;

pub use command::Command;
pub use crc::crc8;
pub use frame::{frame_into, verify_and_strip};
pub use line::{LINE_CAPACITY, LineConsumer, LineGate, LineProducer, RxOutcome};
pub use reply::Reply;
pub use telemetry::{TELEMETRY_CAPACITY, Telemetry};

/// Tick-side protocol endpoint.
///
/// Generic over:
/// - `'a`: lifetime of the [`LineGate`] the consumer was split from
/// - `TX`: outbound byte transport
#[derive(Debug)]
pub struct Link<'a, TX: SerialTx> {
    rx: LineConsumer<'a>,
    tx: TX,

    /// Single-slot telemetry request flag
    telemetry_pending: bool,

    /// Clamped value of the last accepted `T` command, until taken
    remote_setpoint: Option<f32>,
}

impl<'a, TX: SerialTx> Link<'a, TX> {
    /// Create endpoint over a line consumer and a transmitter.
    pub fn new(rx: LineConsumer<'a>, tx: TX) -> Self {
        Self {
            rx,
            tx,
            telemetry_pending: false,
            remote_setpoint: None,
        }
    }

    /// Process at most one pending line and transmit its reply.
    ///
    /// Returns the reply sent, or `None` when no line was pending. Bounded
    /// time: one copy, one parse, one transmit.
    pub fn poll<C: ControlConfig>(
        &mut self,
        store: &SetpointStore<C>,
    ) -> Result<Option<Reply>, TX::Error> {
        let Some(line) = self.rx.claim() else {
            return Ok(None);
        };

        let reply = self.process_line(&line, store);
        self.tx.write_str(reply.as_str())?;
        Ok(Some(reply))
    }

    /// Validate and execute one line without transmitting anything.
    pub fn process_line<C: ControlConfig>(
        &mut self,
        line: &[u8],
        store: &SetpointStore<C>,
    ) -> Reply {
        let command = verify_and_strip(line).and_then(command::parse);

        match command {
            Ok(Command::SetTemperature(requested)) => {
                let stored = store.set(requested);
                info!("link: setpoint {} (requested {})", stored, requested);
                self.remote_setpoint = Some(stored);
                Reply::Ok
            }
            Ok(Command::TelemetryRequest) => {
                if self.telemetry_pending {
                    trace!("link: telemetry already pending");
                }
                self.telemetry_pending = true;
                Reply::Ok
            }
            Err(e) => {
                warn!("link: rejected line: {}", e);
                Reply::from(&e)
            }
        }
    }

    /// Take the telemetry request flag, clearing it.
    pub fn take_telemetry_request(&mut self) -> bool {
        core::mem::replace(&mut self.telemetry_pending, false)
    }

    /// True while a telemetry request waits to be serviced.
    pub fn telemetry_pending(&self) -> bool {
        self.telemetry_pending
    }

    /// Take the setpoint from the last accepted `T` command.
    pub fn take_remote_setpoint(&mut self) -> Option<f32> {
        self.remote_setpoint.take()
    }

    /// Encode and transmit one telemetry line.
    pub fn send_telemetry(&mut self, telemetry: &Telemetry) -> Result<(), TX::Error> {
        match telemetry.encode() {
            Some(line) => self.tx.write_str(&line),
            None => {
                warn!("link: telemetry line too long, skipped");
                Ok(())
            }
        }
    }

    /// Get reference to the transmitter.
    pub fn tx(&self) -> &TX {
        &self.tx
    }

    /// Get mutable reference to the transmitter.
    pub fn tx_mut(&mut self) -> &mut TX {
        &mut self.tx
    }
}
