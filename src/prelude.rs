//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the commonly used types and traits.
//
// Usage:
//   use stratus::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Input
pub use crate::core::input::{
    Action, ActionEvent, ActionMap, ActionPhase, AxisSettings, InputBinding, InputEvent, InputLayer,
    InputProfile, InputStack, InputSystem, KeyCode, LayerEvent, LayerRequest, LayerState, Modifiers,
    MouseButton, StateTracker,
};

// Episodes
pub use crate::core::episode::{Episode, Segment, SegmentEvent, SegmentKey, SegmentRequest};

// Messaging, validation and saves
pub use crate::core::message_bus::MessageBus;
pub use crate::core::save::{SaveConfig, SaveSystem};
pub use crate::core::validation::Validation;
