//=========================================================================
// Input Event Types
//=========================================================================
//
// Engine-level representation of low-level input.
//
// Abstracts platform input (Winit, gamepad libraries, replay files) into a
// stable format consumed by the StateTracker.
//
// Event Flow:
// ```text
// Platform Layer (Winit) / host feeders
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (keys, buttons, axes)
//         ↓
//    InputBinding → ActionMap of the active InputLayer
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is the same physical key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== Built-in Axes =======================================================

/// Axis fed by the scroll wheel: one notch = 1.0, back to 0.0 on the first
/// frame without scrolling.
pub const MOUSE_WHEEL_AXIS: &str = "MouseWheel";

//=== InputEvent ==========================================================

/// Low-level input event delivered to the logic thread.
///
/// # Equality & Hashing Semantics
///
/// Events compare by type + identifying payload (key/button + modifiers,
/// axis name). Continuous payloads are ignored so the platform buffer can
/// coalesce them (last value wins):
///
/// ```text
/// KeyDown{A, CTRL}        == KeyDown{A, CTRL}         ✓
/// KeyDown{A, CTRL}        == KeyDown{A, SHIFT}        ✗
/// MouseMoved{..}          == MouseMoved{..}           ✓ (coordinates ignored)
/// AxisMoved{"x", 0.2}     == AxisMoved{"x", -1.0}     ✓ (value ignored)
/// AxisMoved{"x", ..}      == AxisMoved{"y", ..}       ✗
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed down.
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Mouse button pressed.
    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse button released.
    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Mouse cursor moved to a new position (screen space, top-left origin).
    MouseMoved { x: f32, y: f32 },

    /// A named axis reported a new raw value in `[-1, 1]`.
    ///
    /// Fed by hosts that own analog devices (gamepads, replay data).
    AxisMoved { axis: String, value: f32 },

    /// Unrecognized or unsupported event. Ignored by the state tracker.
    Unidentified,
}

//--- Implementation ------------------------------------------------------

impl InputEvent {
    /// Returns a new event with updated modifiers (consumes self).
    ///
    /// Has no effect on `MouseMoved`, `AxisMoved` and `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }

    /// Convenience constructor for axis events.
    pub fn axis(axis: impl Into<String>, value: f32) -> Self {
        Self::AxisMoved { axis: axis.into(), value }
    }

    /// Returns `true` for events that carry a continuous value.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::AxisMoved { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (AxisMoved { axis: a, .. }, AxisMoved { axis: b, .. }) => a == b,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Hashes discriminant + identifying payload, consistent with equality.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            Self::AxisMoved { axis, .. } => axis.hash(state),
            _ => {}
        }
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left/right variants are not distinguished. Ctrl is Command on macOS,
/// Alt is Option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// All modifiers held.
    pub const ALL: Self = Self { shift: true, ctrl: true, alt: true };
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    //--- Test Helpers -----------------------------------------------------

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Equality Tests
    //=====================================================================

    #[test]
    fn equality_same_type_same_data() {
        assert_eq!(key_down(KeyCode::KeyA), key_down(KeyCode::KeyA));
    }

    #[test]
    fn equality_different_discriminant() {
        assert_ne!(key_down(KeyCode::KeyA), key_up(KeyCode::KeyA));
    }

    #[test]
    fn equality_same_key_different_modifiers() {
        let a = InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::NONE };
        let b = InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::CTRL };
        assert_ne!(a, b);
    }

    #[test]
    fn equality_mousemoved_ignores_coordinates() {
        let a = InputEvent::MouseMoved { x: 10.0, y: 10.0 };
        let b = InputEvent::MouseMoved { x: 200.0, y: 300.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn equality_axis_compares_name_only() {
        assert_eq!(InputEvent::axis("Horizontal", 0.5), InputEvent::axis("Horizontal", -1.0));
        assert_ne!(InputEvent::axis("Horizontal", 0.5), InputEvent::axis("Vertical", 0.5));
        assert_eq!(
            hash_of(&InputEvent::axis("Horizontal", 0.5)),
            hash_of(&InputEvent::axis("Horizontal", -1.0))
        );
    }

    #[test]
    fn axis_events_coalesce_per_axis_in_a_set() {
        let mut set = HashSet::new();
        set.replace(InputEvent::axis("Horizontal", 0.1));
        set.replace(InputEvent::axis("Horizontal", 0.9));
        set.replace(InputEvent::axis("Vertical", 0.3));

        assert_eq!(set.len(), 2);
        let horizontal = set
            .iter()
            .find(|e| matches!(e, InputEvent::AxisMoved { axis, .. } if axis == "Horizontal"));
        match horizontal {
            Some(InputEvent::AxisMoved { value, .. }) => assert_eq!(*value, 0.9),
            other => panic!("Expected Horizontal axis event, got {:?}", other),
        }
    }

    //=====================================================================
    // with_modifiers Tests
    //=====================================================================

    #[test]
    fn with_modifiers_key_down() {
        let updated = key_down(KeyCode::KeyA).with_modifiers(Modifiers::CTRL);

        match updated {
            InputEvent::KeyDown { key, modifiers } => {
                assert_eq!(key, KeyCode::KeyA);
                assert_eq!(modifiers, Modifiers::CTRL);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn with_modifiers_ignores_continuous_events() {
        let event = InputEvent::axis("Horizontal", 1.0);
        assert_eq!(event.clone().with_modifiers(Modifiers::ALL), event);
        assert!(event.is_continuous());
        assert!(!key_down(KeyCode::Space).is_continuous());
    }

    //=====================================================================
    // Serialization Tests
    //=====================================================================

    #[test]
    fn key_codes_serialize_by_name() {
        let json = serde_json::to_string(&KeyCode::Escape).unwrap();
        assert_eq!(json, "\"Escape\"");

        let button: MouseButton = serde_json::from_str("\"Right\"").unwrap();
        assert_eq!(button, MouseButton::Right);
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }
}
