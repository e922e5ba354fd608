//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Systems process input, drive the episode and apply requests. They
// operate on GlobalContext data and are owned by the orchestrator.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::episode::{Episode, SegmentKey};
use crate::core::input::{Action, ActionEvent, InputSystem};

//=== GlobalSystems =======================================================

/// Engine-level logic systems.
///
/// # Available Systems
///
/// - `input`: layer stack and action resolution
/// - `episode`: segment sequence and transitions
pub struct GlobalSystems<K: SegmentKey, A: Action> {
    pub input: InputSystem<A>,
    pub episode: Episode<K>,
}

impl<K: SegmentKey, A: Action> GlobalSystems<K, A> {
    pub fn new() -> Self {
        Self {
            input: InputSystem::new(),
            episode: Episode::new(),
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one logic tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Input**: frame batches → state tracker → active layer actions
    /// 2. **Action publishing**: replaces last tick's `ActionEvent<A>`s
    /// 3. **Segment update**: current segment reads context and bus
    /// 4. **Segment requests**: `SegmentRequest<K>` → `SegmentEvent<K>`
    /// 5. **Layer requests**: `LayerRequest<A>` → `LayerEvent`
    pub fn update(&mut self, context: &mut GlobalContext) {
        let batches = std::mem::take(&mut context.frame_events);
        self.input.process_frame(&mut context.input_state, &batches);

        context.message_bus.clear::<ActionEvent<A>>();
        context.message_bus.extend(self.input.actions().iter().copied());

        self.episode.update(context);
        self.episode.process_requests(context);
        self.input.process_requests(&mut context.message_bus);
    }
}

impl<K: SegmentKey, A: Action> Default for GlobalSystems<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
