//=========================================================================
// Input Processor
//=========================================================================
//
// Translates winit window events into engine InputEvents.
//
// Architecture:
//   WindowEvent → InputProcessor::translate → Option<InputEvent> → InputBuffer
//
// Modifier state is cached from ModifiersChanged and stamped onto every
// key and button event. Keys without an engine KeyCode are dropped.
// Wheel scrolling feeds the `MouseWheel` axis, which `end_frame` returns
// to neutral once a frame passes without scrolling.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, MOUSE_WHEEL_AXIS};

//=== Constants ===========================================================

/// Pixel deltas (touchpads) per wheel notch.
const PIXELS_PER_NOTCH: f64 = 40.0;

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    modifiers: Modifiers,
    wheel_this_frame: bool,
    wheel_engaged: bool,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            modifiers: Modifiers::NONE,
            wheel_this_frame: false,
            wheel_engaged: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Converts one window event. Returns `None` for events that carry no
    /// input (resize, focus) or only update cached state (modifiers).
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.modifiers = map_modifiers(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event),
            WindowEvent::MouseInput { state, button, .. } => Some(self.button(*button, *state)),
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
                x: position.x as f32,
                y: position.y as f32,
            }),
            WindowEvent::MouseWheel { delta, .. } => {
                self.wheel_this_frame = true;
                Some(wheel(*delta))
            }
            _ => None,
        }
    }

    /// Closes the current frame. Returns the wheel release when the wheel
    /// moved last frame but not this one.
    pub(crate) fn end_frame(&mut self) -> Option<InputEvent> {
        let release = self.wheel_engaged && !self.wheel_this_frame;
        self.wheel_engaged = self.wheel_this_frame;
        self.wheel_this_frame = false;
        release.then(|| InputEvent::axis(MOUSE_WHEEL_AXIS, 0.0))
    }

    //--- Internal Helpers -------------------------------------------------

    fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };

        let key = map_key(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        Some(self.key_event(key, event.state))
    }

    fn key_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }

    fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = map_button(button);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

//=========================================================================
// Winit Mappings
//=========================================================================

/// winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn map_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn wheel(delta: MouseScrollDelta) -> InputEvent {
    let notches = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_NOTCH) as f32,
    };
    InputEvent::axis(MOUSE_WHEEL_AXIS, notches)
}

fn map_key(code: WinitKeyCode) -> KeyCode {
    use WinitKeyCode as W;
    match code {
        //--- Digits -------------------------------------------------------
        W::Digit0 => KeyCode::Digit0,
        W::Digit1 => KeyCode::Digit1,
        W::Digit2 => KeyCode::Digit2,
        W::Digit3 => KeyCode::Digit3,
        W::Digit4 => KeyCode::Digit4,
        W::Digit5 => KeyCode::Digit5,
        W::Digit6 => KeyCode::Digit6,
        W::Digit7 => KeyCode::Digit7,
        W::Digit8 => KeyCode::Digit8,
        W::Digit9 => KeyCode::Digit9,

        //--- Letters ------------------------------------------------------
        W::KeyA => KeyCode::KeyA,
        W::KeyB => KeyCode::KeyB,
        W::KeyC => KeyCode::KeyC,
        W::KeyD => KeyCode::KeyD,
        W::KeyE => KeyCode::KeyE,
        W::KeyF => KeyCode::KeyF,
        W::KeyG => KeyCode::KeyG,
        W::KeyH => KeyCode::KeyH,
        W::KeyI => KeyCode::KeyI,
        W::KeyJ => KeyCode::KeyJ,
        W::KeyK => KeyCode::KeyK,
        W::KeyL => KeyCode::KeyL,
        W::KeyM => KeyCode::KeyM,
        W::KeyN => KeyCode::KeyN,
        W::KeyO => KeyCode::KeyO,
        W::KeyP => KeyCode::KeyP,
        W::KeyQ => KeyCode::KeyQ,
        W::KeyR => KeyCode::KeyR,
        W::KeyS => KeyCode::KeyS,
        W::KeyT => KeyCode::KeyT,
        W::KeyU => KeyCode::KeyU,
        W::KeyV => KeyCode::KeyV,
        W::KeyW => KeyCode::KeyW,
        W::KeyX => KeyCode::KeyX,
        W::KeyY => KeyCode::KeyY,
        W::KeyZ => KeyCode::KeyZ,

        //--- Navigation & Editing -----------------------------------------
        W::ArrowUp => KeyCode::ArrowUp,
        W::ArrowDown => KeyCode::ArrowDown,
        W::ArrowLeft => KeyCode::ArrowLeft,
        W::ArrowRight => KeyCode::ArrowRight,
        W::Space => KeyCode::Space,
        W::Enter | W::NumpadEnter => KeyCode::Enter,
        W::Escape => KeyCode::Escape,
        W::Tab => KeyCode::Tab,
        W::Backspace => KeyCode::Backspace,
        W::Delete => KeyCode::Delete,

        _ => KeyCode::Unidentified,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
