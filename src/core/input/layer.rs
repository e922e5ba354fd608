//=========================================================================
// Input Layer
//=========================================================================
//
// A named, stackable input context ("Gameplay", "Pause", "Dialog") that
// owns the action map used while it is the active layer.
//
// Flags written by InputStack only:
//   queued  - waiting behind a blocking layer
//   pushed  - on the stack
//   active  - top of the stack, receiving input
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::action_map::ActionMap;
use super::binding::InputBinding;

//=== LayerState ==========================================================

/// Observable lifecycle state of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerState {
    /// Not owned by a stack.
    Inactive,

    /// Waiting in the stack's queue behind a blocking layer.
    Queued,

    /// On the stack but superseded by a layer above it.
    Pushed,

    /// Top of the stack, receiving input.
    Active,
}

//=== InputLayer ==========================================================

/// Stackable input context.
///
/// # Example
///
/// ```
/// use stratus::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum UiAction { Resume }
/// impl Action for UiAction {}
///
/// let pause = InputLayer::new("Pause")
///     .blocking(true)
///     .with_binding(KeyCode::Escape, UiAction::Resume);
///
/// assert!(pause.is_blocking());
/// assert_eq!(pause.state(), LayerState::Inactive);
/// ```
pub struct InputLayer<A: Action> {
    label: String,
    blocking: bool,
    ignore_blocking: bool,
    queued: bool,
    pushed: bool,
    active: bool,
    actions: ActionMap<A>,
}

impl<A: Action> InputLayer<A> {
    /// Creates a non-blocking layer with an empty action map.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            blocking: false,
            ignore_blocking: false,
            queued: false,
            pushed: false,
            active: false,
            actions: ActionMap::new(),
        }
    }

    //--- Builder ----------------------------------------------------------

    /// While pushed and active, later layers are queued instead of pushed.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// This layer is pushed even while a blocking layer is active.
    pub fn ignore_blocking(mut self, ignore: bool) -> Self {
        self.ignore_blocking = ignore;
        self
    }

    pub fn with_actions(mut self, actions: ActionMap<A>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_binding(mut self, binding: impl Into<InputBinding>, action: A) -> Self {
        self.actions.bind(binding, action);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn ignores_blocking(&self) -> bool {
        self.ignore_blocking
    }

    pub fn is_queued(&self) -> bool {
        self.queued
    }

    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Derives the lifecycle state from the stack-owned flags.
    pub fn state(&self) -> LayerState {
        if self.active {
            LayerState::Active
        } else if self.pushed {
            LayerState::Pushed
        } else if self.queued {
            LayerState::Queued
        } else {
            LayerState::Inactive
        }
    }

    pub fn actions(&self) -> &ActionMap<A> {
        &self.actions
    }

    /// Bindings may be edited at any time, including while active.
    pub fn actions_mut(&mut self) -> &mut ActionMap<A> {
        &mut self.actions
    }

    //--- Stack-owned State ------------------------------------------------

    pub(super) fn set_queued(&mut self, queued: bool) {
        self.queued = queued;
    }

    pub(super) fn set_pushed(&mut self, pushed: bool) {
        self.pushed = pushed;
    }

    pub(super) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl<A: Action> fmt::Debug for InputLayer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputLayer")
            .field("label", &self.label)
            .field("blocking", &self.blocking)
            .field("ignore_blocking", &self.ignore_blocking)
            .field("state", &self.state())
            .field("bindings", &self.actions.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
