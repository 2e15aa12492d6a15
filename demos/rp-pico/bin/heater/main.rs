//! RP2040 (Raspberry Pi Pico) heater controller on Embassy
//!
//! Runs the heatctl regulator every 100 ms. UART bytes are received by a
//! separate task and handed to the regulator through a line gate.
//!
//! # Hardware Setup
//! - UART TX: GP0, RX: GP1, 115200 baud
//! - Thermistor divider: GP26 (ADC0), 10k pull-up to 3.3 V
//! - Setpoint potentiometer: GP27 (ADC1)
//! - Button: GP15 to ground (internal pull-up)
//! - Heater MOSFET gate: GP16 (PWM slice 0 A)
//! - Fan: GP17
//! - Status LED: GP25 (onboard)
//!
//! # Build Flow
//! 1. build.rs runs heatctl-tunegen on tuning.toml
//! 2. Generated tuning.rs written to OUT_DIR
//! 3. This code includes tuning.rs at compile time

#![no_std]
#![no_main]

mod io;

use core::cell::RefCell;
use embassy_executor::Spawner;
use embassy_rp::{
    adc::{self, Adc, Blocking},
    bind_interrupts,
    gpio::{Input, Level, Output, Pull},
    peripherals::UART0,
    pwm::{self, Pwm, PwmOutput},
    uart::{self, BufferedInterruptHandler, BufferedUart, BufferedUartRx, BufferedUartTx},
};
use embassy_time::{Duration, Ticker, Timer};
use embedded_io_async::{Read as AsyncRead, Write as AsyncWrite};
use panic_halt as _;
use static_cell::StaticCell;

use heatctl::{HalBoard, LineGate, LineProducer, Regulator, SetpointStore};

use crate::io::{BufferedSerialTx, PicoAdc, TX_CAPACITY, take_buffer};

// =============================================================================
// Build-Time Generated Tuning
// =============================================================================

mod tuning {
    include!(concat!(env!("OUT_DIR"), "/tuning.rs"));
}

use tuning::TunedConfig;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// =============================================================================
// Shared State
// =============================================================================

/// Setpoint shared by the UART, button and potentiometer paths
static SETPOINT: SetpointStore<TunedConfig> = SetpointStore::new();

type PicoBoard = HalBoard<PicoAdc, PicoAdc, Input<'static>, PwmOutput<'static>, Output<'static>, Output<'static>>;
type PicoRegulator = Regulator<'static, TunedConfig, PicoBoard, BufferedSerialTx>;

// =============================================================================
// Embassy Tasks
// =============================================================================

/// UART reception task: feeds every received byte into the line gate.
#[embassy_executor::task]
async fn rx_task(mut rx: BufferedUartRx, mut lines: LineProducer<'static>) {
    let mut buf = [0u8; 16];
    loop {
        match AsyncRead::read(&mut rx, &mut buf).await {
            Ok(n) => {
                lines.push_bytes(&buf[..n]);
            }
            Err(_) => {
                Timer::after(Duration::from_millis(10)).await;
            }
        }
    }
}

/// Control task: one regulator tick per period, then flush replies.
#[embassy_executor::task]
async fn control_task(
    mut regulator: PicoRegulator,
    mut tx: BufferedUartTx,
    output_buffer: &'static RefCell<heapless::Vec<u8, TX_CAPACITY>>,
) {
    let mut ticker = Ticker::every(Duration::from_millis(100));
    loop {
        // Buffer overflow only loses this tick's reply
        regulator.tick().ok();

        let data = take_buffer(output_buffer);
        if !data.is_empty() {
            AsyncWrite::write_all(&mut tx, &data).await.ok();
        }

        ticker.next().await;
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Analog inputs share one blocking ADC
    static ADC: StaticCell<RefCell<Adc<'static, Blocking>>> = StaticCell::new();
    let adc = ADC.init(RefCell::new(Adc::new_blocking(p.ADC, adc::Config::default())));
    let thermistor = PicoAdc::new(adc, adc::Channel::new_pin(p.PIN_26, Pull::None));
    let pot = PicoAdc::new(adc, adc::Channel::new_pin(p.PIN_27, Pull::None));

    // Heater PWM, 1 kHz-ish at 125 MHz with top = 999
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = 999;
    pwm_config.divider = 125u8.into();
    let (heater, _) = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config).split();
    let Some(heater) = heater else {
        return;
    };

    let button = Input::new(p.PIN_15, Pull::Up);
    let fan = Output::new(p.PIN_17, Level::Low);
    let led = Output::new(p.PIN_25, Level::Low);

    let board = HalBoard::new(thermistor, pot, button, heater, fan, led);

    // UART on GP0 (TX) and GP1 (RX)
    static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        tx_buf,
        rx_buf,
        uart::Config::default(),
    );
    let (uart_tx, uart_rx) = uart.split();

    // Line hand-off between reception and control
    static LINE_GATE: StaticCell<LineGate> = StaticCell::new();
    let (producer, consumer) = LINE_GATE.init(LineGate::new()).split();

    static OUTPUT_BUFFER: StaticCell<RefCell<heapless::Vec<u8, TX_CAPACITY>>> = StaticCell::new();
    let output_buffer = OUTPUT_BUFFER.init(RefCell::new(heapless::Vec::new()));

    let regulator = Regulator::new(board, consumer, BufferedSerialTx::new(output_buffer), &SETPOINT);

    spawner.spawn(rx_task(uart_rx, producer)).unwrap();
    spawner.spawn(control_task(regulator, uart_tx, output_buffer)).unwrap();
}
