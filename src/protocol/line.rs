//! Line assembly with a single-slot hand-off between reception and tick.
//!
//! The reception context (UART interrupt or task) owns a [`LineProducer`] and
//! pushes bytes one at a time. The tick context owns the [`LineConsumer`] and
//! claims a completed line once per pass.
//!
//! ```text
//!   producer                          consumer
//!   ────────                          ────────
//!   slot free: append byte
//!   CR/LF: enqueue partial line  ─►   dequeue once per tick
//!   slot taken: drop byte
//! ```
//!
//! The hand-off is a [`heapless::spsc::Queue`] with room for exactly one
//! line. Neither side ever waits, and the queue only needs atomic load/store,
//! so the gate works on cores without compare-and-swap.

use core::fmt;
use heapless::spsc::{Consumer, Producer, Queue};

/// Default line buffer capacity in bytes.
pub const LINE_CAPACITY: usize = 64;

/// Completed line as handed to the tick context.
type Line<const N: usize> = heapless::Vec<u8, N>;

/// Outcome of pushing one byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxOutcome {
    /// Appended to the partial line
    Buffered,

    /// Terminator completed a non-empty line; it is now pending
    LineReady,

    /// Terminator with nothing accumulated; ignored
    EmptyLine,

    /// Buffer was full; partial line discarded and accumulation restarted
    Overflow,

    /// A completed line is still pending; byte discarded
    Dropped,
}

/// Single-slot queue of completed lines.
///
/// Place it in a `static` (e.g. via `static_cell`) and [`split`](Self::split)
/// it once at startup.
#[derive(Debug)]
pub struct LineGate<const N: usize = LINE_CAPACITY> {
    // spsc capacity is one less than the const parameter
    queue: Queue<Line<N>, 2>,
}

impl<const N: usize> LineGate<N> {
    /// Create an empty gate.
    pub const fn new() -> Self {
        Self { queue: Queue::new() }
    }

    /// Split into the reception and tick handles.
    pub fn split(&mut self) -> (LineProducer<'_, N>, LineConsumer<'_, N>) {
        let (queue, lines) = self.queue.split();
        (
            LineProducer {
                partial: heapless::Vec::new(),
                queue,
            },
            LineConsumer { lines },
        )
    }
}

impl<const N: usize> Default for LineGate<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reception side of a [`LineGate`].
///
/// Owns the partial line; it only crosses to the consumer once terminated.
pub struct LineProducer<'a, const N: usize = LINE_CAPACITY> {
    partial: Line<N>,
    queue: Producer<'a, Line<N>>,
}

impl<const N: usize> fmt::Debug for LineProducer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineProducer")
            .field("partial", &self.partial)
            .field("pending", &!self.queue.ready())
            .finish()
    }
}

impl<const N: usize> LineProducer<'_, N> {
    /// Push one received byte. Never blocks.
    pub fn push_byte(&mut self, byte: u8) -> RxOutcome {
        if !self.queue.ready() {
            return RxOutcome::Dropped;
        }

        match byte {
            b'\r' | b'\n' => {
                if self.partial.is_empty() {
                    return RxOutcome::EmptyLine;
                }
                let line = core::mem::take(&mut self.partial);
                match self.queue.enqueue(line) {
                    Ok(()) => RxOutcome::LineReady,
                    Err(line) => {
                        self.partial = line;
                        RxOutcome::Dropped
                    }
                }
            }
            _ => {
                if self.partial.push(byte).is_err() {
                    self.partial.clear();
                    RxOutcome::Overflow
                } else {
                    RxOutcome::Buffered
                }
            }
        }
    }

    /// Push a slice of bytes, returning the number of completed lines.
    ///
    /// Bytes after the first completed line are dropped until the consumer
    /// claims it.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes
            .iter()
            .filter(|&&b| self.push_byte(b) == RxOutcome::LineReady)
            .count()
    }
}

/// Tick side of a [`LineGate`].
pub struct LineConsumer<'a, const N: usize = LINE_CAPACITY> {
    lines: Consumer<'a, Line<N>>,
}

impl<const N: usize> fmt::Debug for LineConsumer<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineConsumer")
            .field("ready", &self.lines.ready())
            .finish()
    }
}

impl<const N: usize> LineConsumer<'_, N> {
    /// True while a completed line waits to be claimed.
    pub fn is_ready(&self) -> bool {
        self.lines.ready()
    }

    /// Take the pending line, freeing the slot for the producer.
    pub fn claim(&mut self) -> Option<Line<N>> {
        self.lines.dequeue()
    }
}
