//! Application-wide constants and compile-time configuration.
//!
//! BLE identity, timing parameters and the simulated torque table live
//! here so they can be tuned in one place. Nothing is configurable at
//! runtime.

use crate::ble::uuid::uuid128_le;
use crate::sensor::Reading;

// BLE identity

/// Advertised GAP device name.
///
/// The desktop dashboard filters scan results on this exact name.
pub const DEVICE_NAME: &str = "ESP32_To";

/// Primary service carrying the torque characteristic.
pub const SERVICE_UUID: &str = "12345678-1234-1234-1234-123456789abc";

/// Torque characteristic (read / write / notify, 4-byte value).
pub const CHARACTERISTIC_UUID: &str = "87654321-4321-4321-4321-cba987654321";

/// [`SERVICE_UUID`] in advertising byte order.
pub const SERVICE_UUID_LE: [u8; 16] = match uuid128_le(SERVICE_UUID) {
    Some(bytes) => bytes,
    None => panic!("SERVICE_UUID is not a canonical 128-bit UUID"),
};

const _: () = assert!(
    uuid128_le(CHARACTERISTIC_UUID).is_some(),
    "CHARACTERISTIC_UUID is not a canonical 128-bit UUID"
);

/// Advertising interval (in 0.625 ms units). 160 = 100 ms.
pub const BLE_ADV_INTERVAL: u32 = 160;

// Timing

/// Time between two readings (ms).
pub const UPDATE_INTERVAL_MS: u64 = 3000;

/// Pause after a disconnect before advertising resumes (ms).
pub const RECONNECT_DELAY_MS: u64 = 500;

/// Main loop polling pause (ms).
pub const POLL_INTERVAL_MS: u64 = 100;

// Readings

/// Unit label shown next to readings in diagnostics.
pub const TORQUE_UNIT: &str = "Ncm";

/// Simulated torque readings, replayed in order and wrapped at the end.
pub const TORQUE_TABLE: &[Reading] = &[
    Reading(45),
    Reading(85),
    Reading(120),
    Reading(165),
    Reading(200),
    Reading(175),
    Reading(130),
    Reading(90),
    Reading(60),
    Reading(30),
];

const _: () = assert!(!TORQUE_TABLE.is_empty(), "torque table must not be empty");
