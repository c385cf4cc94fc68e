//! Connection state tracking for the single peripheral link.
//!
//! The peripheral task reports connection lifecycle changes as
//! [`LinkEvent`]s over a channel; the sensor loop is the only consumer and
//! feeds them into a [`ConnectionTracker`]. Nothing else reads or writes the
//! connection state, so there is no flag shared between execution contexts.
//!
//! The tracker turns a Connected → Disconnected transition into exactly one
//! [`LinkAction::Readvertise`], no matter how often it is polled afterwards.

use core::fmt;

/// 6-byte BLE device address, least significant byte first (as on air).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BdAddr(pub [u8; 6]);

/// Renders as `AA:BB:CC:DD:EE:FF` (most significant byte first).
impl fmt::Display for BdAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().rev().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

/// Static identity of this peripheral, dumped on boot and on every
/// (re)connect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    pub name: &'static str,
    pub address: BdAddr,
    pub service_uuid: &'static str,
    pub characteristic_uuid: &'static str,
}

/// Lifecycle events published by the peripheral task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A central connected.
    Connected { peer: BdAddr },
    /// The central went away.
    Disconnected,
    /// Advertising could not be started.
    AdvertiseFailed,
}

/// What the sensor loop should do in response to the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkAction {
    /// Log the device identity (a central just connected).
    AnnounceIdentity,
    /// Wait the reconnect delay, then resume advertising.
    Readvertise,
    /// Advertising failed; surface it. Not retried.
    ReportAdvertiseFailure,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    Disconnected,
    Connected,
}

/// Connection lifecycle callbacks, invoked by the adapter.
pub trait ConnectionHandler {
    fn on_connect(&self, peer: BdAddr);
    fn on_disconnect(&self);
}

/// Edge detector over [`LinkEvent`]s.
#[derive(Clone, Debug, Default)]
pub struct ConnectionTracker {
    state: LinkState,
    readvertise_pending: bool,
    peer: Option<BdAddr>,
}

impl ConnectionTracker {
    pub const fn new() -> Self {
        Self {
            state: LinkState::Disconnected,
            readvertise_pending: false,
            peer: None,
        }
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: LinkEvent) -> Option<LinkAction> {
        match event {
            LinkEvent::Connected { peer } => {
                self.state = LinkState::Connected;
                self.peer = Some(peer);
                // A fresh connection supersedes any pending restart.
                self.readvertise_pending = false;
                Some(LinkAction::AnnounceIdentity)
            }
            LinkEvent::Disconnected => {
                if self.state == LinkState::Connected {
                    self.readvertise_pending = true;
                }
                self.state = LinkState::Disconnected;
                self.peer = None;
                None
            }
            LinkEvent::AdvertiseFailed => Some(LinkAction::ReportAdvertiseFailure),
        }
    }

    /// Report a pending Connected → Disconnected edge, once.
    pub fn poll(&mut self) -> Option<LinkAction> {
        if self.readvertise_pending && self.state == LinkState::Disconnected {
            self.readvertise_pending = false;
            return Some(LinkAction::Readvertise);
        }
        None
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == LinkState::Connected
    }

    /// Address of the connected central.
    pub fn peer(&self) -> Option<BdAddr> {
        self.peer
    }
}
