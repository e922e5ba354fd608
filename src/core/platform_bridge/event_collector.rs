//=========================================================================
// Event Collector
//=========================================================================
//
// Logic-side receiver that turns queued platform events into this tick's
// input batches.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → batches → TickControl
//
// Draining is bounded per tick so a flooded channel cannot stall the
// simulation; the remainder is picked up next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== TickControl =========================================================

/// Logic loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    batches: Vec<Vec<InputEvent>>,
}

impl EventCollector {
    const MAX_EVENTS_PER_TICK: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            batches: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events into this tick's batches.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.batches.clear();

        for _ in 0..Self::MAX_EVENTS_PER_TICK {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                    if !discrete.is_empty() {
                        self.batches.push(discrete);
                    }
                    if !continuous.is_empty() {
                        self.batches.push(continuous);
                    }
                }
                Ok(PlatformEvent::WindowClosed) => {
                    info!(target: "core", "Window closed, stopping logic loop");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => return TickControl::Continue,
            }
        }

        warn!(
            target: "core",
            "Event backlog: drained {} events this tick, {} still queued",
            Self::MAX_EVENTS_PER_TICK,
            self.receiver.len()
        );
        TickControl::Continue
    }

    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }

    /// Moves this tick's batches out, leaving the collector empty.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.batches)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn key_batch(key: KeyCode) -> PlatformEvent {
        PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key, modifiers: Modifiers::NONE }],
            continuous: vec![],
        }
    }

    #[test]
    fn empty_channel_continues() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn splits_discrete_and_continuous_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(key_batch(KeyCode::KeyA)).unwrap();
        tx.send(PlatformEvent::Inputs {
            discrete: vec![],
            continuous: vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
    }

    #[test]
    fn window_closed_exits() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn disconnect_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn backlog_is_bounded_per_tick() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        for _ in 0..(EventCollector::MAX_EVENTS_PER_TICK + 5) {
            tx.send(key_batch(KeyCode::Space)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.take_batches().len(), EventCollector::MAX_EVENTS_PER_TICK);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 5);
    }
}
