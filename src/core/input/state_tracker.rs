//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//                                 → HashMap (named axes)        → query
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use log::trace;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== AxisSettings ========================================================

/// Configuration of a named virtual axis.
///
/// A virtual axis reads `+1`/`-1` from its positive/negative keys. When no
/// key contributes, the last value fed through [`InputEvent::AxisMoved`]
/// is used instead. Values inside `dead_zone` read as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSettings {
    pub positive: Option<KeyCode>,
    pub negative: Option<KeyCode>,
    #[serde(default)]
    pub dead_zone: f32,
}

impl AxisSettings {
    /// Axis driven by a pair of keys (e.g. D/A for "Horizontal").
    pub fn keys(positive: KeyCode, negative: KeyCode) -> Self {
        Self {
            positive: Some(positive),
            negative: Some(negative),
            dead_zone: 0.0,
        }
    }

    /// Axis driven only by fed analog values.
    pub fn analog(dead_zone: f32) -> Self {
        Self {
            positive: None,
            negative: None,
            dead_zone: dead_zone.clamp(0.0, 0.99),
        }
    }

    /// Returns a copy with the given dead zone (clamped to `[0, 0.99]`).
    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.dead_zone = dead_zone.clamp(0.0, 0.99);
        self
    }

    /// Applies the dead zone and rescales the remainder back to `[-1, 1]`.
    ///
    /// The dead zone is clamped here too, since settings loaded from a
    /// profile bypass the constructors.
    fn filter(&self, raw: f32) -> f32 {
        let dead_zone = if self.dead_zone.is_nan() {
            0.0
        } else {
            self.dead_zone.clamp(0.0, 0.99)
        };

        let magnitude = raw.abs();
        if magnitude <= dead_zone {
            return 0.0;
        }
        let scaled = (magnitude - dead_zone) / (1.0 - dead_zone);
        scaled.min(1.0).copysign(raw)
    }
}

//--- AxisState -----------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct AxisState {
    settings: AxisSettings,
    fed: f32,
    raw: f32,
    value: f32,
    previous_value: f32,
}

//=== StateTracker ========================================================

/// Tracks persistent state (keys held, axis values) and per-frame deltas
/// (keys pressed/released, previous axis values).
///
/// Frame lifecycle: clear() → process_events() → finalize_frame() → query.
#[derive(Debug)]
pub struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,
    axes: HashMap<String, AxisState>,

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
    mouse_buttons_pressed_this_frame: HashSet<MouseButton>,
    mouse_buttons_released_this_frame: HashSet<MouseButton>,

    //--- Continuous Input (accumulated/calculated) -----------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    /// Creates a new state tracker with empty state and no axes.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: (0.0, 0.0),
            modifiers: Modifiers::NONE,
            axes: HashMap::new(),
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
            mouse_buttons_pressed_this_frame: HashSet::new(),
            mouse_buttons_released_this_frame: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            last_mouse_position: (0.0, 0.0),
        }
    }

    //--- Axis Configuration -----------------------------------------------

    /// Defines (or redefines) a named virtual axis.
    ///
    /// Redefining keeps the last fed value. The new settings apply from the
    /// next `finalize_frame()`.
    pub fn define_axis(&mut self, name: impl Into<String>, settings: AxisSettings) {
        let name = name.into();
        trace!(target: "input::state", "Axis {:?} defined: {:?}", name, settings);
        self.axes.entry(name).or_default().settings = settings;
    }

    /// Returns `true` if the axis was defined or has received values.
    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.contains_key(name)
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(crate) fn clear(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.mouse_buttons_pressed_this_frame.clear();
        self.mouse_buttons_released_this_frame.clear();
        self.last_mouse_position = self.mouse_position;
        for axis in self.axes.values_mut() {
            axis.previous_value = axis.value;
        }
    }

    /// Processes input events, updating internal state.
    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Finalizes frame calculations (mouse delta, axis values).
    pub(crate) fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );

        let keys_down = &self.keys_down;
        for axis in self.axes.values_mut() {
            let held = |key: Option<KeyCode>| key.is_some_and(|k| keys_down.contains(&k));
            let from_keys = match (held(axis.settings.positive), held(axis.settings.negative)) {
                (true, false) => 1.0,
                (false, true) => -1.0,
                _ => 0.0,
            };

            axis.raw = if from_keys != 0.0 { from_keys } else { axis.fed };
            axis.value = axis.settings.filter(axis.raw);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                // Only mark as pressed if it wasn't already down
                if self.keys_down.insert(*key) {
                    self.keys_pressed_this_frame.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released_this_frame.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.insert(*button) {
                    self.mouse_buttons_pressed_this_frame.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.mouse_buttons_down.remove(button) {
                    self.mouse_buttons_released_this_frame.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }

            InputEvent::AxisMoved { axis, value } => {
                let fed = value.clamp(-1.0, 1.0);
                if let Some(state) = self.axes.get_mut(axis.as_str()) {
                    state.fed = fed;
                } else {
                    self.axes.entry(axis.clone()).or_default().fed = fed;
                }
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse Buttons
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons_pressed_this_frame.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons_released_this_frame.contains(&button)
    }

    //=====================================================================
    // Query API - Axes
    //=====================================================================

    /// Dead-zone filtered axis value in `[-1, 1]` (0 for unknown axes).
    pub fn axis_value(&self, name: &str) -> f32 {
        self.axes.get(name).map_or(0.0, |a| a.value)
    }

    /// Unfiltered axis value in `[-1, 1]` (0 for unknown axes).
    pub fn axis_raw_value(&self, name: &str) -> f32 {
        self.axes.get(name).map_or(0.0, |a| a.raw)
    }

    /// Filtered axis value at the end of the previous frame.
    pub fn axis_previous_value(&self, name: &str) -> f32 {
        self.axes.get(name).map_or(0.0, |a| a.previous_value)
    }

    //=====================================================================
    // Query API - Mouse Position & Modifiers
    //=====================================================================

    /// Returns mouse position in screen coordinates.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Returns mouse movement since the previous frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Returns the modifier state of the last key/button event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns an iterator over all keys currently held.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Returns an iterator over all mouse buttons currently held.
    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.mouse_buttons_down.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
