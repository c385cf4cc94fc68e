//! Human-readable status output over defmt-RTT.
//!
//! Nothing here is machine-parsed; it is the bench view of what the
//! simulated sensor is doing.

use core::fmt::Write;

use defmt::{info, warn};
use heapless::String;

use crate::ble::{DeviceIdentity, LinkEvent};
use crate::config::TORQUE_UNIT;
use crate::sensor::generator::ValueGenerator;
use crate::sensor::session::Emission;

/// Render a `Display` value into a fixed-capacity string for defmt.
fn render<const N: usize>(value: impl core::fmt::Display) -> String<N> {
    let mut s = String::new();
    // Truncates on overflow; the capacities below fit every value we log.
    let _ = write!(s, "{}", value);
    s
}

pub fn banner() {
    info!("Starting BLE torque sensor simulator");
    info!("Transmitting array of torque values");
}

pub fn table(generator: &ValueGenerator) {
    let table = generator.table();
    info!("TORQUE VALUES ({=str}):", TORQUE_UNIT);
    for (i, reading) in table.iter().enumerate() {
        info!("   [{}] {}", i, reading.value());
    }
    info!("   Array size: {}", generator.len());
    info!("   Current index: {}", generator.cursor());
    info!(
        "   Current value: {} {=str}",
        generator.current().value(),
        TORQUE_UNIT
    );
}

pub fn identity(id: &DeviceIdentity) {
    let address: String<17> = render(id.address);
    info!("DEVICE INFORMATION:");
    info!("   Device name: {=str}", id.name);
    info!("   Address: {=str}", address.as_str());
    info!("   Service UUID: {=str}", id.service_uuid);
    info!("   Characteristic UUID: {=str}", id.characteristic_uuid);
}

pub fn link_event(event: &LinkEvent) {
    match event {
        LinkEvent::Connected { peer } => {
            let peer: String<17> = render(*peer);
            info!("Central connected: {=str}", peer.as_str());
        }
        LinkEvent::Disconnected => info!("Central disconnected"),
        LinkEvent::AdvertiseFailed => {
            warn!("Advertising could not be started - device is not discoverable");
        }
    }
}

/// Per-cycle line plus the transmission / drop report.
pub fn emission(emission: &Emission, id: &DeviceIdentity) {
    let tick = emission.tick();
    info!(
        "Array index {} -> torque {} {=str}",
        tick.index,
        tick.reading.value(),
        TORQUE_UNIT
    );

    match emission {
        Emission::Sent { frame, .. } => {
            let bytes: String<24> = render(frame);
            let address: String<17> = render(id.address);
            info!("BLE TRANSMISSION:");
            info!(
                "   Torque value: {} {=str}",
                tick.reading.value(),
                TORQUE_UNIT
            );
            info!("   Raw bytes: {=str}", bytes.as_str());
            info!("   Device MAC: {=str}", address.as_str());
            info!("   Via UUID: {=str}", id.characteristic_uuid);
        }
        Emission::Dropped { .. } => {
            warn!("No BLE connection - reading dropped, waiting for client");
        }
        Emission::Failed { error, .. } => {
            warn!("BLE transmission failed: {} - reading dropped", error);
        }
    }
}
