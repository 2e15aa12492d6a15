//! Board adapters for the Pico heater demo

use core::cell::RefCell;
use embassy_rp::adc::{self, Adc, Blocking};
use heatctl::{AdcChannel, SerialTx};

// =============================================================================
// Buffered transmit (deferred flush)
// =============================================================================

/// Transmit buffer capacity: one reply plus one telemetry line fit easily.
pub const TX_CAPACITY: usize = 256;

/// `SerialTx` that buffers to memory; the tick task flushes it to the UART
/// after every regulator tick.
pub struct BufferedSerialTx {
    output_buffer: &'static RefCell<heapless::Vec<u8, TX_CAPACITY>>,
}

impl BufferedSerialTx {
    pub fn new(output_buffer: &'static RefCell<heapless::Vec<u8, TX_CAPACITY>>) -> Self {
        Self { output_buffer }
    }
}

impl core::fmt::Debug for BufferedSerialTx {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BufferedSerialTx")
    }
}

impl SerialTx for BufferedSerialTx {
    type Error = ();

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), ()> {
        self.output_buffer.borrow_mut().extend_from_slice(bytes).map_err(|_| ())
    }
}

/// Take everything buffered so far.
pub fn take_buffer(
    output_buffer: &RefCell<heapless::Vec<u8, TX_CAPACITY>>,
) -> heapless::Vec<u8, TX_CAPACITY> {
    let mut buf = output_buffer.borrow_mut();
    let data = buf.clone();
    buf.clear();
    data
}

// =============================================================================
// Shared ADC channels
// =============================================================================

/// One analog input on the shared blocking ADC.
pub struct PicoAdc {
    adc: &'static RefCell<Adc<'static, Blocking>>,
    channel: adc::Channel<'static>,
}

impl PicoAdc {
    pub fn new(adc: &'static RefCell<Adc<'static, Blocking>>, channel: adc::Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl core::fmt::Debug for PicoAdc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PicoAdc")
    }
}

impl AdcChannel for PicoAdc {
    type Error = adc::Error;

    fn read_raw(&mut self) -> Result<u16, adc::Error> {
        self.adc.borrow_mut().blocking_read(&mut self.channel)
    }
}
