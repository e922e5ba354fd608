//=========================================================================
// Stratus Demo
//=========================================================================
//
// Small windowed run of the runtime.
//
//   Title  ── Enter ──>  Level
//                          ├─ Space: jump, wheel: zoom, S: save
//                          └─ Escape: push "Pause" (blocking)
//                                       ├─ Escape: pop
//                                       └─ Q: exit episode
//
// Run with `RUST_LOG=debug` to see layer and segment transitions.
//
//=========================================================================

use log::{info, warn};
use serde::{Deserialize, Serialize};
use stratus::core::input::MOUSE_WHEEL_AXIS;
use stratus::core::PlatformError;
use stratus::prelude::*;

//=== Keys & Actions ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Stage {
    Title,
    Level,
}

impl SegmentKey for Stage {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DemoAction {
    Start,
    Jump,
    Zoom,
    Save,
    Pause,
    Resume,
    Quit,
}

impl Action for DemoAction {}

fn started(context: &GlobalContext, action: DemoAction) -> bool {
    context
        .message_bus
        .read::<ActionEvent<DemoAction>>()
        .iter()
        .any(|event| event.action == action && event.is_started())
}

fn pause_layer() -> InputLayer<DemoAction> {
    InputLayer::new("Pause")
        .blocking(true)
        .with_binding(KeyCode::Escape, DemoAction::Resume)
        .with_binding(KeyCode::KeyQ, DemoAction::Quit)
}

//=== Segments ============================================================

struct Title;

impl Segment<Stage> for Title {
    fn on_enter(&mut self, _context: &mut GlobalContext) {
        info!(target: "demo", "Press Enter to start");
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if started(context, DemoAction::Start) {
            context.message_bus.push(SegmentRequest::<Stage>::Next);
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Progress {
    jumps: u32,
    zoom: f32,
}

struct Level {
    progress: Progress,
    saves: SaveSystem<Progress>,
}

impl Segment<Stage> for Level {
    fn on_enter(&mut self, _context: &mut GlobalContext) {
        info!(target: "demo", "Level started: {} jumps so far", self.progress.jumps);
    }

    fn update(&mut self, context: &mut GlobalContext) {
        if started(context, DemoAction::Jump) {
            self.progress.jumps += 1;
            info!(target: "demo", "Jump #{}", self.progress.jumps);
        }

        for event in context.message_bus.read::<ActionEvent<DemoAction>>() {
            if event.action == DemoAction::Zoom && event.is_performed() {
                self.progress.zoom += event.value;
            }
        }

        if started(context, DemoAction::Save) {
            if let Err(e) = self.saves.save(&self.progress) {
                warn!(target: "demo", "Save failed: {}", e);
            }
        }

        if started(context, DemoAction::Pause) {
            context.message_bus.push(LayerRequest::Push(pause_layer()));
        }
        if started(context, DemoAction::Resume) {
            context.message_bus.push(LayerRequest::<DemoAction>::Pop);
        }
        if started(context, DemoAction::Quit) {
            context.message_bus.push(SegmentRequest::<Stage>::Exit);
        }

        for event in context.message_bus.read::<LayerEvent>() {
            info!(target: "demo", "Layer event: {:?}", event);
        }
    }
}

//=== Entry Point =========================================================

fn main() -> Result<(), PlatformError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let saves = SaveSystem::new(SaveConfig::new("saves"));
    let progress = match saves.latest().ok().flatten() {
        Some(name) => saves.load(&name).map(|file| file.data).unwrap_or_default(),
        None => Progress::default(),
    };

    EngineBuilder::<Stage, DemoAction>::new()
        .with_title("Stratus Demo")
        .with_window_size(960, 540)
        .build()
        .init(move |systems, _context| {
            systems.episode.register(Stage::Title, Title);
            systems.episode.register(Stage::Level, Level { progress, saves });

            let gameplay = InputLayer::new("Gameplay")
                .with_binding(KeyCode::Enter, DemoAction::Start)
                .with_binding(KeyCode::Space, DemoAction::Jump)
                .with_binding(InputBinding::axis(MOUSE_WHEEL_AXIS), DemoAction::Zoom)
                .with_binding(KeyCode::KeyS, DemoAction::Save)
                .with_binding(KeyCode::Escape, DemoAction::Pause);
            let _ = systems.input.push_layer(gameplay);
        })
        .run()
}
