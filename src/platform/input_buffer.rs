//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store between the winit callbacks and the channel flush.
//
//   discrete:   key/button events, in arrival order, consecutive
//               duplicates (OS key repeat) dropped
//   continuous: cursor and axis samples, last value per source wins
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(64),
            continuous: HashSet::with_capacity(8),
        }
    }

    /// Routes an event to the discrete or continuous store.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.continuous.replace(event);
        } else if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    /// Takes this frame's events, or `None` when nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }

        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.drain().collect();
        Some((discrete, continuous))
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
