//! Time-gated replay of the torque table.
//!
//! The generator owns the cursor into a fixed table of readings. Each call
//! to [`ValueGenerator::tick`] compares the supplied timestamp against the
//! last emission; once a full interval has elapsed it hands out the reading
//! under the cursor and moves the cursor one step forward, wrapping at the
//! end of the table.
//!
//! Advancement depends on time only. Whether anybody is listening is the
//! session's concern, not ours.

use super::Reading;

/// A reading handed out by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Table index the reading was taken from.
    pub index: usize,
    pub reading: Reading,
}

/// Cursor over a fixed, non-empty reading table.
#[derive(Clone, Debug)]
pub struct ValueGenerator {
    table: &'static [Reading],
    cursor: usize,
    interval_ms: u64,
    last_tick_ms: u64,
}

impl ValueGenerator {
    /// Create a generator starting at index 0.
    ///
    /// `now_ms` is the reference point for the first interval. Returns
    /// `None` for an empty table.
    pub fn new(table: &'static [Reading], interval_ms: u64, now_ms: u64) -> Option<Self> {
        if table.is_empty() {
            return None;
        }
        Some(Self {
            table,
            cursor: 0,
            interval_ms,
            last_tick_ms: now_ms,
        })
    }

    /// Emit the reading under the cursor if a full interval has elapsed.
    ///
    /// A timestamp earlier than the previous emission never advances.
    pub fn tick(&mut self, now_ms: u64) -> Option<Tick> {
        if now_ms.saturating_sub(self.last_tick_ms) < self.interval_ms {
            return None;
        }

        let tick = Tick {
            index: self.cursor,
            reading: self.current(),
        };
        self.cursor = (self.cursor + 1) % self.table.len();
        self.last_tick_ms = now_ms;
        Some(tick)
    }

    /// Index the next tick will read from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reading the next tick will emit.
    pub fn current(&self) -> Reading {
        self.table[self.cursor]
    }

    pub fn table(&self) -> &'static [Reading] {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}
