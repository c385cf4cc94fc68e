//! GATT server - one service, one torque characteristic.
//!
//! The `#[nrf_softdevice::gatt_service]` macro generates the value
//! get/set/notify helpers and the write event enum for the listed
//! characteristic. The macro only takes literals, so the UUIDs are
//! repeated here; the host tests check them against `config`.

use defmt::{debug, info};

/// Torque service.
#[nrf_softdevice::gatt_service(uuid = "12345678-1234-1234-1234-123456789abc")]
pub struct TorqueService {
    /// Latest wire frame (see `sensor::frame`). Reads return the last
    /// value set; notifications push each new reading to the subscriber.
    #[characteristic(uuid = "87654321-4321-4321-4321-cba987654321", read, write, notify)]
    pub torque: [u8; 4],
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub torque: TorqueService,
}

/// GATT event callback for `gatt_server::run`.
///
/// Central writes are accepted and ignored; CCCD changes are only logged.
pub fn on_event(event: ServerEvent) {
    match event {
        ServerEvent::Torque(TorqueServiceEvent::TorqueWrite(value)) => {
            debug!("Central wrote {=[u8]:02x} (ignored)", &value[..]);
        }
        ServerEvent::Torque(TorqueServiceEvent::TorqueCccdWrite { notifications }) => {
            info!("Torque notifications enabled: {}", notifications);
        }
    }
}
