//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Owns every core system and the shared context on the logic thread and
// ticks them at a fixed rate.
//
// Each tick:
//   1. Collect platform events (bounded)
//   2. GlobalSystems::update (input → segments → requests)
//   3. Sleep out the remainder of the tick
//
// Single owner: nothing here is shared or locked. The platform thread
// only talks to it through the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::episode::SegmentKey;
use crate::core::globals::{GlobalContext, GlobalSystems};
use crate::core::input::{Action, InputEvent};
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<K: SegmentKey, A: Action> {
    systems: GlobalSystems<K, A>,
    context: GlobalContext,
    tick_count: u64,
}

impl<K: SegmentKey, A: Action> CoreSystemsOrchestrator<K, A> {
    pub(crate) fn new() -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
            tick_count: 0,
        }
    }

    //--- Initialization ---------------------------------------------------

    /// Gives the caller mutable access to systems and context before the
    /// logic thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<K, A>, &mut GlobalContext),
    {
        init_fn(&mut self.systems, &mut self.context);
    }

    /// Begins the episode unless initialization already entered a segment.
    fn start(&mut self) {
        if self.systems.episode.current().is_some() || self.systems.episode.is_empty() {
            return;
        }

        let outcome = self.systems.episode.begin(&mut self.context);
        if !outcome.is_valid() {
            debug!(target: "core", "Episode not started: {}", outcome);
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one logic tick over the given input batches.
    pub(crate) fn tick(&mut self, batches: Vec<Vec<InputEvent>>) {
        for batch in batches {
            self.context.queue_input(batch);
        }

        self.systems.update(&mut self.context);
        self.tick_count += 1;
    }

    //--- Logic Thread -----------------------------------------------------

    /// Moves the orchestrator onto its own thread ticking at `tps`.
    ///
    /// The thread exits when the window closes or the channel disconnects.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);
            self.start();
            info!(target: "core", "Logic thread running at {} TPS", tps);

            loop {
                let tick_start = Instant::now();

                if collector.collect_frame() == TickControl::Exit {
                    break;
                }

                self.tick(collector.take_batches());

                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                } else {
                    trace!(target: "core", "Tick {} overran by {:?}", self.tick_count, elapsed - tick_duration);
                }
            }

            info!(target: "core", "Logic thread exiting after {} ticks", self.tick_count);
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
