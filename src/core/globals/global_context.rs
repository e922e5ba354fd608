//=========================================================================
// Global Context
//=========================================================================
//
// Shared data handed to segments and game code.
//
// Contains:
// - input_state: low-level input (keys, buttons, axes, cursor)
// - message_bus: typed events and requests between systems
//
// Passed explicitly instead of living in statics, so several runtimes
// can coexist and tests can build one directly.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, StateTracker};
use crate::core::message_bus::MessageBus;

//=== GlobalContext =======================================================

/// Shared data accessible during segment and system updates.
///
/// # Available Data
///
/// - `input_state`: raw input state (keys pressed/down/released, axes)
/// - `message_bus`: `ActionEvent<A>`, `LayerEvent`, `SegmentEvent<K>`
///   and the matching request types
pub struct GlobalContext {
    /// Low-level input state, updated once per tick before segments run.
    ///
    /// For bound actions, read `ActionEvent<A>` from the message bus.
    pub input_state: StateTracker,

    /// Typed event bus scoped to this context.
    pub message_bus: MessageBus,

    /// Input batches received this tick, consumed by the input system.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl GlobalContext {
    /// Creates a context with empty state.
    pub fn new() -> Self {
        Self {
            input_state: StateTracker::new(),
            message_bus: MessageBus::new(),
            frame_events: Vec::new(),
        }
    }

    /// Queues an input batch for the next system update.
    pub fn queue_input(&mut self, batch: Vec<InputEvent>) {
        if !batch.is_empty() {
            self.frame_events.push(batch);
        }
    }
}

impl Default for GlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
