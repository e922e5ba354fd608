//=========================================================================
// Input Layer Stack
//=========================================================================
//
// Modal input context manager. The top of the stack is the only layer
// receiving input; a blocking top defers later pushes into a FIFO queue.
//
// Architecture:
//   push(layer) → top blocking? → queue (FIFO)
//                             └→ layers (LIFO) → activate
//   pop()       → remove top → drain queue (up to first blocker) → activate
//
// Transitions are recorded as LayerEvents so the owning system can
// publish them without layers knowing about each other.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::layer::InputLayer;
use crate::core::validation::Validation;

//=== Constants ===========================================================

/// Undrained layer events kept by an [`InputStack`].
pub const MAX_PENDING_EVENTS: usize = 256;

//=== LayerEvent ==========================================================

/// Lifecycle transition of a layer, identified by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerEvent {
    /// Placed on the stack.
    Pushed { label: String },

    /// Deferred behind a blocking layer.
    Queued { label: String },

    /// Became the top of the stack and now receives input.
    Activated { label: String },

    /// Superseded or removed while active.
    Deactivated { label: String },

    /// Removed from the stack.
    Popped { label: String },
}

impl LayerEvent {
    pub fn label(&self) -> &str {
        match self {
            Self::Pushed { label }
            | Self::Queued { label }
            | Self::Activated { label }
            | Self::Deactivated { label }
            | Self::Popped { label } => label,
        }
    }
}

//=== LayerRequest ========================================================

/// Stack operation requested through the message bus, applied at the end
/// of the tick in publication order.
#[derive(Debug)]
pub enum LayerRequest<A: Action> {
    Push(InputLayer<A>),
    Pop,
}

//=== InputStack ==========================================================

/// LIFO stack of input layers plus a FIFO queue of deferred layers.
///
/// # Example
///
/// ```
/// use stratus::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum UiAction { Accept }
/// impl Action for UiAction {}
///
/// let mut stack: InputStack<UiAction> = InputStack::new();
/// assert!(stack.push(InputLayer::new("Gameplay")).is_valid());
/// assert!(stack.push(InputLayer::new("Pause").blocking(true)).is_valid());
///
/// let deferred = stack.push(InputLayer::new("Confirm"));
/// assert!(!deferred.is_valid());
/// assert_eq!(stack.active_layer().map(|l| l.label()), Some("Pause"));
///
/// stack.pop();
/// assert_eq!(stack.active_layer().map(|l| l.label()), Some("Confirm"));
/// ```
pub struct InputStack<A: Action> {
    layers: Vec<InputLayer<A>>,
    queued: VecDeque<InputLayer<A>>,
    /// Transitions since the last `drain_events()`, oldest dropped past
    /// [`MAX_PENDING_EVENTS`].
    events: VecDeque<LayerEvent>,
}

impl<A: Action> InputStack<A> {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            queued: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    //=====================================================================
    // Stack Operations
    //=====================================================================

    /// Pushes a layer, or queues it while a blocking layer is on top.
    ///
    /// Returns an invalid [`Validation`] when the layer was queued; the
    /// layer is not lost and becomes active once the blocker is popped.
    pub fn push(&mut self, mut layer: InputLayer<A>) -> Validation {
        if let Some(top) = self.layers.last() {
            if top.is_blocking() && !layer.ignores_blocking() {
                let message = format!(
                    "Layer '{}' queued behind blocking layer '{}'",
                    layer.label(),
                    top.label()
                );
                debug!(target: "input::stack", "{}", message);

                layer.set_queued(true);
                record(&mut self.events, LayerEvent::Queued { label: layer.label().to_string() });
                self.queued.push_back(layer);
                return Validation::invalid(message);
            }
        }

        self.place(layer);
        self.activate_top();
        Validation::valid()
    }

    /// Pops the top layer and hands it back to the caller.
    ///
    /// Queued layers drain once the new top no longer blocks, stopping
    /// after the first blocking layer drained. The resulting top is
    /// activated. Returns `None` on an empty stack.
    pub fn pop(&mut self) -> Option<InputLayer<A>> {
        let Some(mut layer) = self.layers.pop() else {
            warn!(target: "input::stack", "Pop requested on an empty input stack");
            return None;
        };

        let label = layer.label().to_string();
        if layer.is_active() {
            layer.set_active(false);
            record(&mut self.events, LayerEvent::Deactivated { label: label.clone() });
        }
        layer.set_pushed(false);
        record(&mut self.events, LayerEvent::Popped { label: label.clone() });
        debug!(target: "input::stack", "Popped layer '{}'", label);

        if !self.queued.is_empty() && !self.top_is_blocking() {
            self.drain_queue();
        }

        self.activate_top();
        Some(layer)
    }

    /// Pops every layer and discards the queue.
    pub fn clear(&mut self) {
        while self.pop_without_drain().is_some() {}
        for mut layer in self.queued.drain(..) {
            layer.set_queued(false);
        }
    }

    //--- Internal ---------------------------------------------------------

    /// Places a layer on top without activating it.
    fn place(&mut self, mut layer: InputLayer<A>) {
        if let Some(previous) = self.layers.last_mut() {
            if previous.is_active() {
                previous.set_active(false);
                record(&mut self.events, LayerEvent::Deactivated { label: previous.label().to_string() });
            }
        }

        layer.set_queued(false);
        layer.set_pushed(true);
        trace!(target: "input::stack", "Pushed layer '{}'", layer.label());
        record(&mut self.events, LayerEvent::Pushed { label: layer.label().to_string() });
        self.layers.push(layer);
    }

    fn drain_queue(&mut self) {
        while let Some(layer) = self.queued.pop_front() {
            let blocking = layer.is_blocking();
            debug!(target: "input::stack", "Draining queued layer '{}'", layer.label());
            self.place(layer);
            if blocking {
                break;
            }
        }
    }

    fn activate_top(&mut self) {
        if let Some(top) = self.layers.last_mut() {
            if top.is_pushed() && !top.is_active() {
                top.set_active(true);
                debug!(target: "input::stack", "Active layer: '{}'", top.label());
                record(&mut self.events, LayerEvent::Activated { label: top.label().to_string() });
            }
        }
    }

    fn top_is_blocking(&self) -> bool {
        self.layers.last().map_or(false, |top| top.is_blocking())
    }

    fn pop_without_drain(&mut self) -> Option<InputLayer<A>> {
        let mut layer = self.layers.pop()?;
        if layer.is_active() {
            layer.set_active(false);
            record(&mut self.events, LayerEvent::Deactivated { label: layer.label().to_string() });
        }
        layer.set_pushed(false);
        record(&mut self.events, LayerEvent::Popped { label: layer.label().to_string() });
        Some(layer)
    }

    //=====================================================================
    // Queries
    //=====================================================================

    /// The layer currently receiving input.
    pub fn active_layer(&self) -> Option<&InputLayer<A>> {
        self.layers.last().filter(|layer| layer.is_active())
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut InputLayer<A>> {
        self.layers.last_mut().filter(|layer| layer.is_active())
    }

    pub fn top(&self) -> Option<&InputLayer<A>> {
        self.layers.last()
    }

    /// Pushed layers, bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = &InputLayer<A>> {
        self.layers.iter()
    }

    /// Queued layers, front to back.
    pub fn queued_layers(&self) -> impl Iterator<Item = &InputLayer<A>> {
        self.queued.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn has_active_layer(&self) -> bool {
        self.active_layer().is_some()
    }

    pub fn has_queued_layers(&self) -> bool {
        !self.queued.is_empty()
    }

    pub fn can_pop(&self) -> bool {
        !self.layers.is_empty()
    }

    /// Whether a pushed or queued layer carries `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.layers.iter().chain(self.queued.iter()).any(|layer| layer.label() == label)
    }

    /// Takes the transitions recorded since the last call.
    ///
    /// Callers that never drain keep only the newest
    /// [`MAX_PENDING_EVENTS`] transitions; `InputSystem` drains every tick.
    pub fn drain_events(&mut self) -> Vec<LayerEvent> {
        self.events.drain(..).collect()
    }
}

impl<A: Action> Default for InputStack<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn record(events: &mut VecDeque<LayerEvent>, event: LayerEvent) {
    if events.len() == MAX_PENDING_EVENTS {
        events.pop_front();
    }
    events.push_back(event);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputBinding, KeyCode};

    //--- Test Action Type -------------------------------------------------

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Any,
    }

    impl Action for TestAction {}

    //--- Test Helpers -----------------------------------------------------

    fn layer(label: &str) -> InputLayer<TestAction> {
        InputLayer::new(label)
    }

    fn blocker(label: &str) -> InputLayer<TestAction> {
        InputLayer::new(label).blocking(true)
    }

    fn active_label(stack: &InputStack<TestAction>) -> Option<&str> {
        stack.active_layer().map(|l| l.label())
    }

    fn active_count(stack: &InputStack<TestAction>) -> usize {
        stack.layers().filter(|l| l.is_active()).count()
            + stack.queued_layers().filter(|l| l.is_active()).count()
    }

    //=====================================================================
    // Push / Pop Tests
    //=====================================================================

    #[test]
    fn push_activates_and_supersedes() {
        let mut stack = InputStack::new();
        assert!(stack.push(layer("A")).is_valid());
        assert!(stack.push(layer("B")).is_valid());

        assert_eq!(active_label(&stack), Some("B"));
        let bottom = stack.layers().next().unwrap();
        assert!(bottom.is_pushed());
        assert!(!bottom.is_active());
    }

    #[test]
    fn single_active_invariant_holds_through_mixed_sequence() {
        let mut stack = InputStack::new();
        let _ = stack.push(layer("A"));
        assert_eq!(active_count(&stack), 1);
        let _ = stack.push(blocker("B"));
        assert_eq!(active_count(&stack), 1);
        let _ = stack.push(layer("C"));
        assert_eq!(active_count(&stack), 1);
        let _ = stack.push(layer("D").ignore_blocking(true));
        assert_eq!(active_count(&stack), 1);
        let _ = stack.push(blocker("E"));
        assert_eq!(active_count(&stack), 1);

        while stack.can_pop() {
            stack.pop();
            assert!(active_count(&stack) <= 1);
        }
        assert_eq!(active_count(&stack), 0);
    }

    #[test]
    fn blocking_layer_defers_push() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let outcome = stack.push(layer("B"));

        assert!(!outcome.is_valid());
        assert!(outcome.message().unwrap().contains("'B'"));
        assert_eq!(active_label(&stack), Some("A"));
        assert_eq!(stack.queued_len(), 1);
        let queued = stack.queued_layers().next().unwrap();
        assert!(queued.is_queued());
        assert!(!queued.is_pushed());
        assert!(!queued.is_active());
    }

    #[test]
    fn ignore_blocking_preempts_without_popping() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        assert!(stack.push(layer("C").ignore_blocking(true)).is_valid());

        assert_eq!(active_label(&stack), Some("C"));
        let a = stack.layers().next().unwrap();
        assert!(a.is_pushed());
        assert!(!a.is_active());
    }

    #[test]
    fn popping_preempting_layer_resumes_blocker_and_keeps_queue() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let _ = stack.push(layer("B"));
        let _ = stack.push(layer("C").ignore_blocking(true));

        let popped = stack.pop().unwrap();
        assert_eq!(popped.label(), "C");
        assert_eq!(active_label(&stack), Some("A"));
        assert_eq!(stack.queued_len(), 1);
    }

    #[test]
    fn pop_drains_queue() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let _ = stack.push(layer("B"));

        let popped = stack.pop().unwrap();
        assert_eq!(popped.label(), "A");
        assert!(!popped.is_pushed());
        assert!(!popped.is_active());
        assert_eq!(active_label(&stack), Some("B"));
        assert!(!stack.has_queued_layers());
    }

    #[test]
    fn drain_stops_after_first_blocker() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let _ = stack.push(blocker("B"));
        let _ = stack.push(layer("D"));

        stack.pop();
        assert_eq!(active_label(&stack), Some("B"));
        assert_eq!(stack.queued_layers().map(|l| l.label()).collect::<Vec<_>>(), vec!["D"]);
    }

    #[test]
    fn drain_pushes_non_blocking_run_and_activates_last() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let _ = stack.push(layer("B"));
        let _ = stack.push(layer("C"));

        stack.pop();
        assert_eq!(stack.len(), 2);
        assert_eq!(active_label(&stack), Some("C"));
        assert_eq!(active_count(&stack), 1);
    }

    #[test]
    fn empty_pop_returns_none() {
        let mut stack: InputStack<TestAction> = InputStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.pop().is_none());
        assert!(stack.drain_events().is_empty());
    }

    #[test]
    fn clear_discards_everything() {
        let mut stack = InputStack::new();
        let _ = stack.push(blocker("A"));
        let _ = stack.push(layer("B"));
        stack.clear();

        assert!(stack.is_empty());
        assert!(!stack.has_queued_layers());
        assert!(!stack.contains("B"));
    }

    //=====================================================================
    // Event Tests
    //=====================================================================

    #[test]
    fn events_record_transitions_in_order() {
        let mut stack = InputStack::new();
        let _ = stack.push(layer("Gameplay"));
        let _ = stack.push(blocker("Pause"));
        let _ = stack.push(layer("Confirm"));

        let events = stack.drain_events();
        assert_eq!(
            events,
            vec![
                LayerEvent::Pushed { label: "Gameplay".into() },
                LayerEvent::Activated { label: "Gameplay".into() },
                LayerEvent::Deactivated { label: "Gameplay".into() },
                LayerEvent::Pushed { label: "Pause".into() },
                LayerEvent::Activated { label: "Pause".into() },
                LayerEvent::Queued { label: "Confirm".into() },
            ]
        );
        assert!(stack.drain_events().is_empty());
    }

    #[test]
    fn undrained_events_keep_only_the_newest() {
        let mut stack = InputStack::new();
        for i in 0..MAX_PENDING_EVENTS {
            let _ = stack.push(layer(&format!("L{}", i)));
            stack.pop();
        }

        let events = stack.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert_eq!(
            events.last(),
            Some(&LayerEvent::Popped { label: format!("L{}", MAX_PENDING_EVENTS - 1) })
        );
    }

    #[test]
    fn active_layer_can_be_rebound_in_place() {
        let mut stack = InputStack::new();
        let _ = stack.push(layer("Gameplay"));

        if let Some(active) = stack.active_layer_mut() {
            active.actions_mut().bind(KeyCode::KeyF, TestAction::Any);
        }

        let gameplay = stack.active_layer().unwrap();
        assert_eq!(
            gameplay.actions().action_for(&InputBinding::Key(KeyCode::KeyF)),
            Some(TestAction::Any)
        );
    }

    //=====================================================================
    // Scenario
    //=====================================================================

    #[test]
    fn gameplay_pause_confirm_scenario() {
        let mut stack = InputStack::new();

        let _ = stack.push(layer("Gameplay"));
        assert_eq!(active_label(&stack), Some("Gameplay"));

        let _ = stack.push(blocker("Pause"));
        assert_eq!(active_label(&stack), Some("Pause"));
        let gameplay = stack.layers().next().unwrap();
        assert!(gameplay.is_pushed() && !gameplay.is_active());

        assert!(!stack.push(layer("Confirm")).is_valid());
        assert_eq!(active_label(&stack), Some("Pause"));

        assert_eq!(stack.pop().unwrap().label(), "Pause");
        assert_eq!(active_label(&stack), Some("Confirm"));

        assert_eq!(stack.pop().unwrap().label(), "Confirm");
        assert!(!stack.has_queued_layers());
        assert_eq!(active_label(&stack), Some("Gameplay"));
        assert_eq!(stack.len(), 1);
    }
}
