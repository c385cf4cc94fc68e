//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Server** - GATT server with the torque service / characteristic.
//! 2. **Peripheral task** - advertises, accepts one central at a time,
//!    runs the GATT server until the link drops, and reports lifecycle
//!    changes as [`LinkEvent`]s.
//! 3. **Link state** - the pure connection tracker the sensor loop feeds
//!    those events into.
//!
//! Communication with the sensor task goes through the statics below:
//! an event channel (peripheral → sensor), an advertise signal
//! (sensor → peripheral) and the current connection slot.

pub mod link_state;
pub mod peripheral;
pub mod server;
pub mod uuid;

use core::cell::RefCell;

use defmt::warn;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_sync::signal::Signal;
use nrf_softdevice::ble::gatt_server::NotifyValueError;
use nrf_softdevice::ble::Connection;
use nrf_softdevice::RawError;

pub use link_state::{BdAddr, ConnectionHandler, DeviceIdentity, LinkAction, LinkEvent};

use crate::error::LinkError;
use crate::sensor::frame::WireFrame;
use crate::sensor::session::SensorLink;
use server::Server;

/// Depth of the peripheral → sensor event queue.
pub const LINK_EVENT_DEPTH: usize = 4;

pub type LinkEventChannel = Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_DEPTH>;
pub type LinkEventSender = Sender<'static, CriticalSectionRawMutex, LinkEvent, LINK_EVENT_DEPTH>;

/// Lifecycle events, single producer (peripheral task), single consumer
/// (sensor task).
pub static LINK_EVENTS: LinkEventChannel = Channel::new();

/// Raised to (re)start advertising.
pub static ADVERTISE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// The connected central, if any. Written by the peripheral task only.
pub static CONNECTION: Mutex<CriticalSectionRawMutex, RefCell<Option<Connection>>> =
    Mutex::new(RefCell::new(None));

fn current_connection() -> Option<Connection> {
    CONNECTION.lock(|c| c.borrow().clone())
}

/// Connection callbacks that queue [`LinkEvent`]s for the sensor task.
pub struct EventForwarder {
    tx: LinkEventSender,
}

impl EventForwarder {
    pub fn new(tx: LinkEventSender) -> Self {
        Self { tx }
    }

    pub fn on_advertise_failed(&self) {
        self.forward(LinkEvent::AdvertiseFailed);
    }

    fn forward(&self, event: LinkEvent) {
        // try_send: callbacks must not block. The sensor loop drains every
        // poll, so a full queue means it is stuck.
        if self.tx.try_send(event).is_err() {
            warn!("Link event queue full - dropping {}", event);
        }
    }
}

impl ConnectionHandler for EventForwarder {
    fn on_connect(&self, peer: BdAddr) {
        self.forward(LinkEvent::Connected { peer });
    }

    fn on_disconnect(&self) {
        self.forward(LinkEvent::Disconnected);
    }
}

/// [`SensorLink`] backed by the SoftDevice GATT server.
pub struct SoftdeviceLink {
    server: &'static Server,
    advertise: &'static Signal<CriticalSectionRawMutex, ()>,
}

impl SoftdeviceLink {
    pub fn new(
        server: &'static Server,
        advertise: &'static Signal<CriticalSectionRawMutex, ()>,
    ) -> Self {
        Self { server, advertise }
    }
}

impl SensorLink for SoftdeviceLink {
    fn publish(&mut self, frame: &WireFrame) -> Result<(), LinkError> {
        self.server
            .torque
            .torque_set(frame.as_bytes())
            .map_err(|_| LinkError::SetValue)?;

        let conn = current_connection().ok_or(LinkError::NotConnected)?;
        self.server
            .torque
            .torque_notify(&conn, frame.as_bytes())
            .map_err(|e| match e {
                NotifyValueError::Disconnected => LinkError::NotConnected,
                // CCCD not enabled.
                NotifyValueError::Raw(RawError::InvalidState) => LinkError::NotSubscribed,
                NotifyValueError::Raw(raw) => LinkError::Notify(raw as u32),
            })
    }

    fn resume_advertising(&mut self) -> Result<(), LinkError> {
        // Single peripheral link: cannot advertise connectable while a
        // central is still attached.
        if current_connection().is_some() {
            return Err(LinkError::AdvertiseUnavailable);
        }
        self.advertise.signal(());
        Ok(())
    }
}
