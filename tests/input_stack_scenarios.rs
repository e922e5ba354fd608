//=========================================================================
// Input Stack Scenarios
//=========================================================================
//
// Drives the layer stack through the public API, both directly and
// through bus requests processed by `GlobalSystems::update`.
//
//=========================================================================

use stratus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Menu {
    Jump,
    Back,
    Confirm,
}

impl Action for Menu {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Stage {
    Play,
}

impl SegmentKey for Stage {}

fn layer(label: &str) -> InputLayer<Menu> {
    InputLayer::new(label)
}

fn active_label(stack: &InputStack<Menu>) -> Option<&str> {
    stack.active_layer().map(|layer| layer.label())
}

fn active_count(stack: &InputStack<Menu>) -> usize {
    stack.layers().filter(|layer| layer.is_active()).count()
}

fn key_down(key: KeyCode) -> Vec<InputEvent> {
    vec![InputEvent::KeyDown { key, modifiers: Modifiers::NONE }]
}

//=========================================================================
// Stack Scenarios
//=========================================================================

#[test]
fn gameplay_pause_confirm_walkthrough() {
    let mut stack = InputStack::new();

    assert!(stack.push(layer("Gameplay")).is_valid());
    assert_eq!(active_label(&stack), Some("Gameplay"));

    assert!(stack.push(layer("Pause").blocking(true)).is_valid());
    assert_eq!(active_label(&stack), Some("Pause"));
    let gameplay = stack.layers().next().unwrap();
    assert!(gameplay.is_pushed() && !gameplay.is_active());

    let queued = stack.push(layer("Confirm"));
    assert!(!queued.is_valid());
    assert_eq!(active_label(&stack), Some("Pause"));
    assert_eq!(stack.queued_len(), 1);

    assert_eq!(stack.pop().unwrap().label(), "Pause");
    assert_eq!(active_label(&stack), Some("Confirm"));
    assert!(!stack.has_queued_layers());

    assert_eq!(stack.pop().unwrap().label(), "Confirm");
    assert_eq!(active_label(&stack), Some("Gameplay"));
    assert!(stack.top().unwrap().is_pushed());
}

#[test]
fn at_most_one_layer_is_active_throughout() {
    let mut stack = InputStack::new();
    let pushes = [
        layer("A"),
        layer("B").blocking(true),
        layer("C"),
        layer("D").ignore_blocking(true),
        layer("E").blocking(true),
        layer("F"),
    ];

    for next in pushes {
        let _ = stack.push(next);
        assert!(active_count(&stack) <= 1);
    }
    while stack.pop().is_some() {
        assert!(active_count(&stack) <= 1);
    }
    assert_eq!(active_count(&stack), 0);
}

#[test]
fn ignore_blocking_layer_preempts_blocker() {
    let mut stack = InputStack::new();
    let _ = stack.push(layer("A").blocking(true));

    assert!(stack.push(layer("C").ignore_blocking(true)).is_valid());
    assert_eq!(active_label(&stack), Some("C"));

    let a = stack.layers().next().unwrap();
    assert_eq!(a.state(), LayerState::Pushed);
}

#[test]
fn draining_stops_at_next_blocker() {
    let mut stack = InputStack::new();
    let _ = stack.push(layer("A").blocking(true));
    let _ = stack.push(layer("B").blocking(true));
    let _ = stack.push(layer("D"));

    stack.pop();

    assert_eq!(active_label(&stack), Some("B"));
    assert_eq!(stack.queued_layers().map(|l| l.label()).collect::<Vec<_>>(), vec!["D"]);
    assert_eq!(stack.queued_layers().next().unwrap().state(), LayerState::Queued);

    stack.pop();
    assert_eq!(active_label(&stack), Some("D"));
}

#[test]
fn empty_pop_is_harmless() {
    let mut stack: InputStack<Menu> = InputStack::new();
    assert!(stack.pop().is_none());
    assert!(stack.pop().is_none());
    assert!(stack.is_empty());
    assert!(stack.drain_events().is_empty());
}

//=========================================================================
// Bus-Driven Scenarios
//=========================================================================

struct Play;

impl Segment<Stage> for Play {
    fn update(&mut self, context: &mut GlobalContext) {
        let back = context
            .message_bus
            .read::<ActionEvent<Menu>>()
            .iter()
            .any(|event| event.action == Menu::Back && event.is_started());

        if back {
            let dialog = InputLayer::new("Dialog")
                .blocking(true)
                .with_binding(KeyCode::Enter, Menu::Confirm);
            context.message_bus.push(LayerRequest::Push(dialog));
        }
    }
}

fn systems() -> (GlobalSystems<Stage, Menu>, GlobalContext) {
    let mut systems = GlobalSystems::new();
    let mut context = GlobalContext::new();

    systems.episode.register(Stage::Play, Play);
    assert!(systems.episode.begin(&mut context).is_valid());

    let gameplay = InputLayer::new("Gameplay")
        .with_binding(KeyCode::Space, Menu::Jump)
        .with_binding(KeyCode::Escape, Menu::Back);
    assert!(systems.input.push_layer(gameplay).is_valid());

    (systems, context)
}

#[test]
fn segment_requested_layer_takes_over_next_tick() {
    let (mut systems, mut context) = systems();

    context.queue_input(key_down(KeyCode::Escape));
    systems.update(&mut context);

    assert_eq!(active_label(systems.input.stack()), Some("Dialog"));
    let events = context.message_bus.read::<LayerEvent>();
    assert!(events.contains(&LayerEvent::Deactivated { label: "Gameplay".to_string() }));
    assert!(events.contains(&LayerEvent::Activated { label: "Dialog".to_string() }));

    context.queue_input(key_down(KeyCode::Space));
    context.queue_input(key_down(KeyCode::Enter));
    systems.update(&mut context);

    assert!(systems.input.started(Menu::Confirm));
    assert!(!systems.input.started(Menu::Jump), "Gameplay is inactive under the dialog");
    assert!(context.message_bus.read::<LayerEvent>().is_empty(), "Events last one tick");
}

#[test]
fn pop_request_restores_previous_layer() {
    let (mut systems, mut context) = systems();

    context.queue_input(key_down(KeyCode::Escape));
    systems.update(&mut context);
    assert_eq!(systems.input.stack().len(), 2);

    context.message_bus.push(LayerRequest::<Menu>::Pop);
    systems.update(&mut context);

    assert_eq!(active_label(systems.input.stack()), Some("Gameplay"));
    assert!(context
        .message_bus
        .read::<LayerEvent>()
        .contains(&LayerEvent::Popped { label: "Dialog".to_string() }));
}

#[test]
fn requests_apply_in_publication_order() {
    let (mut systems, mut context) = systems();

    context.message_bus.push(LayerRequest::<Menu>::Push(InputLayer::new("Inventory").blocking(true)));
    context.message_bus.push(LayerRequest::<Menu>::Push(InputLayer::new("Tooltip")));
    context.message_bus.push(LayerRequest::<Menu>::Pop);
    systems.update(&mut context);

    let stack = systems.input.stack();
    assert_eq!(active_label(stack), Some("Tooltip"));
    assert!(!stack.contains("Inventory"));
    assert!(stack.contains("Gameplay"));
}
