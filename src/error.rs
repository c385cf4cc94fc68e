//! Error types for torquesim.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging and `Display` for host-side messages.

use core::fmt;

/// Failures surfaced by the wireless adapter.
///
/// None of these are retried: a reading that fails to go out is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// No central is connected.
    NotConnected,
    /// The central has not enabled notifications (CCCD).
    NotSubscribed,
    /// The characteristic value could not be updated.
    SetValue,
    /// The SoftDevice rejected the notification (raw error code).
    Notify(u32),
    /// Advertising could not be (re)started.
    AdvertiseUnavailable,
}

/// Wire frame decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The payload is not exactly one frame long.
    Length { expected: usize, actual: usize },
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotConnected => f.write_str("no central connected"),
            LinkError::NotSubscribed => f.write_str("central has not subscribed to notifications"),
            LinkError::SetValue => f.write_str("characteristic value update failed"),
            LinkError::Notify(code) => write!(f, "notify failed (raw error {code:#x})"),
            LinkError::AdvertiseUnavailable => f.write_str("advertising unavailable"),
        }
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Length { expected, actual } => {
                write!(f, "frame must be {expected} bytes, got {actual}")
            }
        }
    }
}
