//! Test-only library interface for torquesim.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required): the value generator,
//! the wire frame encoder, the session loop body and the BLE connection
//! state tracker.
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod sensor;

// Internal module paths for the pure BLE pieces; `ble/mod.rs` itself
// pulls in the SoftDevice and is firmware-only.
#[path = "ble/link_state.rs"]
mod ble_link_state_impl;
#[path = "ble/uuid.rs"]
mod ble_uuid_impl;

pub mod ble {
    pub mod link_state {
        pub use crate::ble_link_state_impl::*;
    }
    pub mod uuid {
        pub use crate::ble_uuid_impl::*;
    }

    pub use link_state::{
        BdAddr, ConnectionHandler, ConnectionTracker, DeviceIdentity, LinkAction, LinkEvent,
        LinkState,
    };
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
