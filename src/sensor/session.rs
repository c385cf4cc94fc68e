//! Sensor session - the context object driven by the main loop.
//!
//! Owns the generator and the connection tracker. The BLE adapter is
//! reached only through [`SensorLink`], so the whole loop body runs on the
//! host against a mock link.
//!
//! Delivery is at-most-once: a reading produced while no central is
//! connected is dropped, and a reading the link refuses is not retried.

use super::frame::{self, WireFrame};
use super::generator::{Tick, ValueGenerator};
use crate::ble::link_state::{ConnectionTracker, LinkAction, LinkEvent};
use crate::error::LinkError;

/// Adapter seam: what the session needs from the BLE stack.
pub trait SensorLink {
    /// Store `frame` as the characteristic value and notify the subscriber.
    fn publish(&mut self, frame: &WireFrame) -> Result<(), LinkError>;

    /// Make the peripheral discoverable again.
    fn resume_advertising(&mut self) -> Result<(), LinkError>;
}

/// Fate of one reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Emission {
    /// Handed to the link.
    Sent { tick: Tick, frame: WireFrame },
    /// Nobody connected; skipped.
    Dropped { tick: Tick },
    /// The link refused it.
    Failed { tick: Tick, error: LinkError },
}

impl Emission {
    pub fn tick(&self) -> Tick {
        match *self {
            Emission::Sent { tick, .. }
            | Emission::Dropped { tick }
            | Emission::Failed { tick, .. } => tick,
        }
    }
}

/// Outcome of one loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cycle {
    pub emission: Option<Emission>,
    /// A disconnect was observed; advertising should resume after the
    /// reconnect delay.
    pub readvertise: bool,
}

pub struct SensorSession {
    generator: ValueGenerator,
    tracker: ConnectionTracker,
}

impl SensorSession {
    pub fn new(generator: ValueGenerator) -> Self {
        Self {
            generator,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Feed a lifecycle event from the peripheral task.
    pub fn handle_event(&mut self, event: LinkEvent) -> Option<LinkAction> {
        self.tracker.apply(event)
    }

    /// Run one loop iteration at `now_ms`.
    pub fn poll(&mut self, now_ms: u64, link: &mut impl SensorLink) -> Cycle {
        let emission = self.generator.tick(now_ms).map(|tick| {
            if self.tracker.is_connected() {
                self.transmit(tick, link)
            } else {
                Emission::Dropped { tick }
            }
        });

        let readvertise = matches!(self.tracker.poll(), Some(LinkAction::Readvertise));

        Cycle {
            emission,
            readvertise,
        }
    }

    /// Encode and push one reading. Fire-and-forget.
    pub fn transmit(&mut self, tick: Tick, link: &mut impl SensorLink) -> Emission {
        let frame = frame::encode(tick.reading);
        match link.publish(&frame) {
            Ok(()) => Emission::Sent { tick, frame },
            Err(error) => Emission::Failed { tick, error },
        }
    }

    /// Ask the link to advertise again. Called once per
    /// [`Cycle::readvertise`], after the reconnect delay.
    pub fn readvertise(&mut self, link: &mut impl SensorLink) -> Result<(), LinkError> {
        link.resume_advertising()
    }

    pub fn generator(&self) -> &ValueGenerator {
        &self.generator
    }

    pub fn tracker(&self) -> &ConnectionTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::link_state::BdAddr;
    use crate::sensor::Reading;

    static TABLE: [Reading; 3] = [Reading(45), Reading(85), Reading(120)];

    #[derive(Default)]
    struct RecordingLink {
        published: Vec<WireFrame>,
        readvertised: usize,
        refuse_publish: Option<LinkError>,
    }

    impl SensorLink for RecordingLink {
        fn publish(&mut self, frame: &WireFrame) -> Result<(), LinkError> {
            if let Some(e) = self.refuse_publish {
                return Err(e);
            }
            self.published.push(*frame);
            Ok(())
        }

        fn resume_advertising(&mut self) -> Result<(), LinkError> {
            self.readvertised += 1;
            Ok(())
        }
    }

    fn session() -> SensorSession {
        SensorSession::new(ValueGenerator::new(&TABLE, 3000, 0).unwrap())
    }

    fn connect(s: &mut SensorSession) {
        s.handle_event(LinkEvent::Connected {
            peer: BdAddr([1, 2, 3, 4, 5, 6]),
        });
    }

    #[test]
    fn drops_while_disconnected_but_still_advances() {
        let mut s = session();
        let mut link = RecordingLink::default();
        let poll = s.poll(3000, &mut link);
        assert_eq!(
            poll.emission,
            Some(Emission::Dropped {
                tick: Tick {
                    index: 0,
                    reading: Reading(45)
                }
            })
        );
        assert!(link.published.is_empty());
        assert_eq!(s.generator().cursor(), 1);
    }

    #[test]
    fn sends_while_connected() {
        let mut s = session();
        let mut link = RecordingLink::default();
        connect(&mut s);
        let poll = s.poll(3000, &mut link);
        assert!(matches!(poll.emission, Some(Emission::Sent { .. })));
        assert_eq!(link.published, vec![WireFrame([0x2D, 0, 0, 0])]);
    }

    #[test]
    fn idle_iterations_emit_nothing() {
        let mut s = session();
        let mut link = RecordingLink::default();
        connect(&mut s);
        assert_eq!(s.poll(100, &mut link), Cycle::default());
        assert!(link.published.is_empty());
    }

    #[test]
    fn link_failure_is_surfaced_not_retried() {
        let mut s = session();
        let mut link = RecordingLink {
            refuse_publish: Some(LinkError::NotSubscribed),
            ..Default::default()
        };
        connect(&mut s);
        let poll = s.poll(3000, &mut link);
        assert!(matches!(
            poll.emission,
            Some(Emission::Failed {
                error: LinkError::NotSubscribed,
                ..
            })
        ));
        link.refuse_publish = None;
        // Next reading, not the refused one.
        let poll = s.poll(6000, &mut link);
        assert_eq!(poll.emission.unwrap().tick().reading, Reading(85));
    }

    #[test]
    fn disconnect_requests_readvertise_once() {
        let mut s = session();
        let mut link = RecordingLink::default();
        connect(&mut s);
        s.handle_event(LinkEvent::Disconnected);
        assert!(s.poll(100, &mut link).readvertise);
        assert!(!s.poll(200, &mut link).readvertise);
        assert!(!s.poll(300, &mut link).readvertise);
    }

    #[test]
    fn readvertise_goes_through_the_link() {
        let mut s = session();
        let mut link = RecordingLink::default();
        assert_eq!(s.readvertise(&mut link), Ok(()));
        assert_eq!(link.readvertised, 1);
    }
}
