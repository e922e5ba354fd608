//=========================================================================
// Action Map
//=========================================================================
//
// Maps input bindings to game actions for a single input layer.
//
// Architecture:
//   (InputBinding, Action) list → resolve(StateTracker) → ActionEvent list
//
// Only the map of the active layer is resolved each frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::action::{Action, ActionEvent, ActionPhase};
use super::binding::InputBinding;
use super::state_tracker::StateTracker;

//=== ActionMap ===========================================================

/// Ordered set of binding → action pairs.
///
/// A binding maps to at most one action; binding it again replaces the
/// previous action. Several bindings may share an action.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Action> {
    bindings: Vec<(InputBinding, A)>,
}

impl<A: Action> ActionMap<A> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    //--- Binding API ------------------------------------------------------

    /// Binds an input to an action, replacing any action already bound to it.
    pub fn bind(&mut self, binding: impl Into<InputBinding>, action: A) {
        let binding = binding.into();
        match self.bindings.iter_mut().find(|(b, _)| *b == binding) {
            Some(entry) => entry.1 = action,
            None => self.bindings.push((binding, action)),
        }
    }

    /// Builder-style variant of [`bind`](Self::bind).
    pub fn with(mut self, binding: impl Into<InputBinding>, action: A) -> Self {
        self.bind(binding, action);
        self
    }

    /// Removes a binding. Returns the action it was bound to.
    pub fn unbind(&mut self, binding: &InputBinding) -> Option<A> {
        let pos = self.bindings.iter().position(|(b, _)| b == binding)?;
        Some(self.bindings.remove(pos).1)
    }

    /// Removes every binding that triggers `action`.
    pub fn unbind_action(&mut self, action: A) {
        self.bindings.retain(|(_, a)| *a != action);
    }

    /// Removes all bindings.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the action bound to `binding`.
    pub fn action_for(&self, binding: &InputBinding) -> Option<A> {
        self.bindings.iter().find(|(b, _)| b == binding).map(|(_, a)| *a)
    }

    /// Returns every binding that triggers `action`.
    pub fn bindings_for(&self, action: A) -> impl Iterator<Item = &InputBinding> {
        self.bindings.iter().filter(move |(_, a)| *a == action).map(|(b, _)| b)
    }

    /// Iterates bindings in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = (&InputBinding, A)> {
        self.bindings.iter().map(|(b, a)| (b, *a))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    //--- Resolution -------------------------------------------------------

    /// Resolves this frame's action events, in binding order.
    ///
    /// Keys and buttons: down → Started + Performed(1.0), up → Canceled(0.0).
    /// Axes: leaving neutral → Started + Performed(v), change while engaged
    /// → Performed(v), returning to neutral → Canceled(0.0).
    pub fn resolve(&self, state: &StateTracker) -> Vec<ActionEvent<A>> {
        let mut events = Vec::new();

        for (binding, action) in &self.bindings {
            let action = *action;
            match binding {
                InputBinding::Axis(name) => {
                    let previous = state.axis_previous_value(name);
                    let current = state.axis_value(name);

                    if previous == 0.0 && current != 0.0 {
                        events.push(ActionEvent::new(action, ActionPhase::Started, current));
                        events.push(ActionEvent::new(action, ActionPhase::Performed, current));
                    } else if previous != 0.0 && current == 0.0 {
                        events.push(ActionEvent::new(action, ActionPhase::Canceled, 0.0));
                    } else if current != previous {
                        events.push(ActionEvent::new(action, ActionPhase::Performed, current));
                    }
                }
                _ => {
                    if binding.is_down(state) {
                        events.push(ActionEvent::new(action, ActionPhase::Started, 1.0));
                        events.push(ActionEvent::new(action, ActionPhase::Performed, 1.0));
                    }
                    if binding.is_up(state) {
                        events.push(ActionEvent::new(action, ActionPhase::Canceled, 0.0));
                    }
                }
            }
        }

        if !events.is_empty() {
            trace!(target: "input::actions", "Resolved {} action events", events.len());
        }

        events
    }
}

impl<A: Action> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{InputEvent, KeyCode, Modifiers, MouseButton};
    use crate::core::input::state_tracker::AxisSettings;

    //--- Test Action Type -------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
        Fire,
        Move,
    }

    impl Action for TestAction {}

    //--- Test Helpers -----------------------------------------------------

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn phases(events: &[ActionEvent<TestAction>]) -> Vec<(TestAction, ActionPhase)> {
        events.iter().map(|e| (e.action, e.phase)).collect()
    }

    //=====================================================================
    // Binding Tests
    //=====================================================================

    #[test]
    fn rebinding_replaces_action() {
        let mut map = ActionMap::new();
        map.bind(KeyCode::Space, TestAction::Jump);
        map.bind(KeyCode::Space, TestAction::Fire);

        assert_eq!(map.len(), 1);
        assert_eq!(map.action_for(&InputBinding::Key(KeyCode::Space)), Some(TestAction::Fire));
    }

    #[test]
    fn unbind_and_unbind_action() {
        let mut map = ActionMap::new()
            .with(KeyCode::Space, TestAction::Jump)
            .with(KeyCode::KeyW, TestAction::Jump)
            .with(MouseButton::Left, TestAction::Fire);

        assert_eq!(map.bindings_for(TestAction::Jump).count(), 2);
        assert_eq!(map.unbind(&InputBinding::MouseButton(MouseButton::Left)), Some(TestAction::Fire));
        assert_eq!(map.unbind(&InputBinding::MouseButton(MouseButton::Left)), None);

        map.unbind_action(TestAction::Jump);
        assert!(map.is_empty());
    }

    //=====================================================================
    // Resolution Tests
    //=====================================================================

    #[test]
    fn key_press_then_release() {
        let mut tracker = StateTracker::new();
        let map = ActionMap::new().with(KeyCode::Space, TestAction::Jump);

        frame(&mut tracker, &[key_down(KeyCode::Space)]);
        assert_eq!(
            phases(&map.resolve(&tracker)),
            vec![(TestAction::Jump, ActionPhase::Started), (TestAction::Jump, ActionPhase::Performed)]
        );

        frame(&mut tracker, &[]);
        assert!(map.resolve(&tracker).is_empty());

        frame(&mut tracker, &[key_up(KeyCode::Space)]);
        assert_eq!(phases(&map.resolve(&tracker)), vec![(TestAction::Jump, ActionPhase::Canceled)]);
    }

    #[test]
    fn tap_within_one_frame_yields_all_phases() {
        let mut tracker = StateTracker::new();
        let map = ActionMap::new().with(KeyCode::Space, TestAction::Jump);

        frame(&mut tracker, &[key_down(KeyCode::Space), key_up(KeyCode::Space)]);
        assert_eq!(map.resolve(&tracker).len(), 3);
    }

    #[test]
    fn axis_phases_follow_value() {
        let mut tracker = StateTracker::new();
        tracker.define_axis("Horizontal", AxisSettings::analog(0.0));
        let map = ActionMap::new().with(InputBinding::axis("Horizontal"), TestAction::Move);

        frame(&mut tracker, &[InputEvent::axis("Horizontal", 0.5)]);
        let events = map.resolve(&tracker);
        assert_eq!(
            phases(&events),
            vec![(TestAction::Move, ActionPhase::Started), (TestAction::Move, ActionPhase::Performed)]
        );
        assert_eq!(events[1].value, 0.5);

        frame(&mut tracker, &[]);
        assert!(map.resolve(&tracker).is_empty(), "Unchanged axis produces nothing");

        frame(&mut tracker, &[InputEvent::axis("Horizontal", 1.0)]);
        let events = map.resolve(&tracker);
        assert_eq!(phases(&events), vec![(TestAction::Move, ActionPhase::Performed)]);
        assert_eq!(events[0].value, 1.0);

        frame(&mut tracker, &[InputEvent::axis("Horizontal", 0.0)]);
        assert_eq!(phases(&map.resolve(&tracker)), vec![(TestAction::Move, ActionPhase::Canceled)]);
    }

    #[test]
    fn resolution_keeps_binding_order() {
        let mut tracker = StateTracker::new();
        let map = ActionMap::new()
            .with(KeyCode::KeyF, TestAction::Fire)
            .with(KeyCode::Space, TestAction::Jump);

        frame(&mut tracker, &[key_down(KeyCode::Space), key_down(KeyCode::KeyF)]);
        let order: Vec<_> = map.resolve(&tracker).iter().map(|e| e.action).collect();
        assert_eq!(order, vec![TestAction::Fire, TestAction::Fire, TestAction::Jump, TestAction::Jump]);
    }
}
