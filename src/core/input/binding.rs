//=========================================================================
// Input Binding
//=========================================================================
//
// A single physical input source behind one polling interface.
//
//   Key(KeyCode)          → StateTracker key queries
//   MouseButton(btn)      → StateTracker button queries
//   Axis(name)            → StateTracker axis values
//
// The variant is fixed at construction. Axis-only queries return `None`
// for key and button bindings instead of reading an unset axis.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, MouseButton};
use super::state_tracker::StateTracker;

//=== InputBinding ========================================================

/// Tagged union over the physical input sources a layer can bind.
///
/// Query naming follows the gameplay convention:
///
/// | Query        | Key / Button              | Axis                        |
/// |--------------|---------------------------|-----------------------------|
/// | `is_down`    | went down this frame      | left neutral this frame     |
/// | `is_up`      | released this frame       | returned to neutral         |
/// | `is_pressed` | held                      | not neutral                 |
///
/// # Example
///
/// ```
/// use stratus::core::input::{InputBinding, KeyCode, StateTracker};
///
/// let tracker = StateTracker::new();
/// let jump = InputBinding::Key(KeyCode::Space);
/// assert!(!jump.is_pressed(&tracker));
/// assert_eq!(jump.value(&tracker), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    Key(KeyCode),
    MouseButton(MouseButton),
    Axis(String),
}

impl InputBinding {
    /// Creates an axis binding.
    pub fn axis(name: impl Into<String>) -> Self {
        Self::Axis(name.into())
    }

    /// Returns `true` for the `Axis` variant.
    pub fn is_axis(&self) -> bool {
        matches!(self, Self::Axis(_))
    }

    //--- State Queries ----------------------------------------------------

    /// Input went down (or left neutral) this frame.
    pub fn is_down(&self, state: &StateTracker) -> bool {
        match self {
            Self::Key(key) => state.is_key_pressed(*key),
            Self::MouseButton(button) => state.is_button_pressed(*button),
            Self::Axis(name) => {
                state.axis_previous_value(name) == 0.0 && state.axis_value(name) != 0.0
            }
        }
    }

    /// Input was released (or returned to neutral) this frame.
    pub fn is_up(&self, state: &StateTracker) -> bool {
        match self {
            Self::Key(key) => state.is_key_released(*key),
            Self::MouseButton(button) => state.is_button_released(*button),
            Self::Axis(name) => {
                state.axis_previous_value(name) != 0.0 && state.axis_value(name) == 0.0
            }
        }
    }

    /// Input is currently held (or not neutral).
    pub fn is_pressed(&self, state: &StateTracker) -> bool {
        match self {
            Self::Key(key) => state.is_key_down(*key),
            Self::MouseButton(button) => state.is_button_down(*button),
            Self::Axis(name) => state.axis_value(name) != 0.0,
        }
    }

    //--- Axis Queries -----------------------------------------------------

    /// Dead-zone filtered axis value. `None` for non-axis bindings.
    pub fn value(&self, state: &StateTracker) -> Option<f32> {
        self.axis_name().map(|name| state.axis_value(name))
    }

    /// Unfiltered axis value. `None` for non-axis bindings.
    pub fn raw_value(&self, state: &StateTracker) -> Option<f32> {
        self.axis_name().map(|name| state.axis_raw_value(name))
    }

    pub fn is_positive(&self, state: &StateTracker) -> Option<bool> {
        self.value(state).map(|v| v > 0.0)
    }

    pub fn is_negative(&self, state: &StateTracker) -> Option<bool> {
        self.value(state).map(|v| v < 0.0)
    }

    pub fn is_neutral(&self, state: &StateTracker) -> Option<bool> {
        self.value(state).map(|v| v == 0.0)
    }

    fn axis_name(&self) -> Option<&str> {
        match self {
            Self::Axis(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for InputBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "Key({:?})", key),
            Self::MouseButton(button) => write!(f, "Mouse({:?})", button),
            Self::Axis(name) => write!(f, "Axis({})", name),
        }
    }
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::MouseButton(button)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
