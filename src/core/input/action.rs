//=========================================================================
// Actions
//=========================================================================
//
// Game-defined action trait and the phased events produced for it.
//
// Actions: Opaque identifiers routed by the runtime, interpreted by the game.
// Phases:  Started → Performed (→ Performed ...) → Canceled
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// # Requirements
///
/// - `Copy + Eq + Hash`: Efficient passing and deduplication
/// - `Debug`: Logging support
/// - `Send + 'static`: Transfer through the message bus and logic thread
///
/// # Example
///
/// ```
/// use stratus::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump, Pause, Confirm }
///
/// impl Action for GameAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== ActionPhase =========================================================

/// Lifecycle phase of an action within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Input left its rest state.
    Started,

    /// Input produced a value (press, or axis change while engaged).
    Performed,

    /// Input returned to its rest state.
    Canceled,
}

//=== ActionEvent =========================================================

/// One phase of one action, resolved by the active layer's action map.
///
/// `value` is `1.0`/`0.0` for keys and buttons and the filtered axis value
/// for axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEvent<A: Action> {
    pub action: A,
    pub phase: ActionPhase,
    pub value: f32,
}

impl<A: Action> ActionEvent<A> {
    pub fn new(action: A, phase: ActionPhase, value: f32) -> Self {
        Self { action, phase, value }
    }

    pub fn is_started(&self) -> bool {
        self.phase == ActionPhase::Started
    }

    pub fn is_performed(&self) -> bool {
        self.phase == ActionPhase::Performed
    }

    pub fn is_canceled(&self) -> bool {
        self.phase == ActionPhase::Canceled
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
