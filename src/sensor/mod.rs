//! Simulated torque sensor.
//!
//! - **Generator** - replays the fixed torque table on a time grid.
//! - **Frame** - fixed 4-byte little-endian wire encoding of a reading.
//! - **Session** - the single context object the main loop owns; ties the
//!   generator to the connection tracker and the BLE link.

pub mod frame;
pub mod generator;
pub mod session;

use core::fmt;

/// One torque reading in abstract units (shown as Ncm).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading(pub i32);

impl Reading {
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Reading {
    fn from(v: i32) -> Self {
        Reading(v)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
