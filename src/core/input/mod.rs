//=========================================================================
// Input System
//=========================================================================
//
// Turns raw platform input into state queries and per-layer actions.
//
// Architecture:
//   InputEvent batches → StateTracker (keys, buttons, axes)
//                            ↓
//   InputStack → active InputLayer → ActionMap::resolve → ActionEvent<A>
//
// Only the active layer's bindings produce actions. Layer changes can be
// requested through the message bus and are applied at the tick boundary.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod action_map;
pub mod binding;
pub mod event;
pub mod layer;
pub mod layer_stack;
pub mod profile;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, ActionEvent, ActionPhase};
pub use action_map::ActionMap;
pub use binding::InputBinding;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton, MOUSE_WHEEL_AXIS};
pub use layer::{InputLayer, LayerState};
pub use layer_stack::{InputStack, LayerEvent, LayerRequest};
pub use profile::{BindingProfile, InputProfile, LayerProfile, ProfileError};
pub use state_tracker::{AxisSettings, StateTracker};

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::message_bus::MessageBus;
use crate::core::validation::Validation;

//=== InputSystem =========================================================

/// Owns the layer stack and this tick's resolved actions.
///
/// # Example
///
/// ```
/// use stratus::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump }
/// impl Action for GameAction {}
///
/// let mut input = InputSystem::new();
/// let _ = input.push_layer(InputLayer::new("Gameplay").with_binding(KeyCode::Space, GameAction::Jump));
///
/// let mut state = StateTracker::new();
/// let press = vec![InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }];
/// input.process_frame(&mut state, &[press]);
///
/// assert!(input.started(GameAction::Jump));
/// ```
pub struct InputSystem<A: Action> {
    stack: InputStack<A>,
    actions: Vec<ActionEvent<A>>,
}

impl<A: Action> InputSystem<A> {
    pub fn new() -> Self {
        Self {
            stack: InputStack::new(),
            actions: Vec::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Advances the state tracker by one frame and resolves the active
    /// layer's actions.
    pub fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        state.clear();
        for batch in batches {
            state.process_events(batch);
        }
        state.finalize_frame();

        self.actions.clear();
        if let Some(layer) = self.stack.active_layer() {
            self.actions.extend(layer.actions().resolve(state));
        }

        if !self.actions.is_empty() {
            trace!(target: "input", "{} actions this frame", self.actions.len());
        }
    }

    /// Applies [`LayerRequest`]s from the bus in FIFO order, then replaces
    /// last tick's [`LayerEvent`]s on the bus with this tick's.
    pub fn process_requests(&mut self, bus: &mut MessageBus) {
        for request in bus.drain::<LayerRequest<A>>() {
            match request {
                LayerRequest::Push(layer) => {
                    let outcome = self.stack.push(layer);
                    if !outcome.is_valid() {
                        debug!(target: "input", "Push request deferred: {}", outcome);
                    }
                }
                LayerRequest::Pop => {
                    if let Some(layer) = self.stack.pop() {
                        debug!(target: "input", "Pop request removed layer '{}'", layer.label());
                    }
                }
            }
        }

        bus.clear::<LayerEvent>();
        bus.extend(self.stack.drain_events());
    }

    //--- Action Queries ---------------------------------------------------

    /// Actions resolved this frame, in binding order.
    pub fn actions(&self) -> &[ActionEvent<A>] {
        &self.actions
    }

    pub fn started(&self, action: A) -> bool {
        self.has_phase(action, ActionPhase::Started)
    }

    pub fn performed(&self, action: A) -> bool {
        self.has_phase(action, ActionPhase::Performed)
    }

    pub fn canceled(&self, action: A) -> bool {
        self.has_phase(action, ActionPhase::Canceled)
    }

    /// Value of the last event for `action` this frame.
    pub fn value_of(&self, action: A) -> Option<f32> {
        self.actions.iter().rev().find(|e| e.action == action).map(|e| e.value)
    }

    fn has_phase(&self, action: A, phase: ActionPhase) -> bool {
        self.actions.iter().any(|e| e.action == action && e.phase == phase)
    }

    //--- Layer Stack ------------------------------------------------------

    pub fn push_layer(&mut self, layer: InputLayer<A>) -> Validation {
        self.stack.push(layer)
    }

    pub fn pop_layer(&mut self) -> Option<InputLayer<A>> {
        self.stack.pop()
    }

    pub fn stack(&self) -> &InputStack<A> {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut InputStack<A> {
        &mut self.stack
    }
}

impl<A: Action> Default for InputSystem<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
