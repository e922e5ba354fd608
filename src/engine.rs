//=========================================================================
// Stratus Engine
//
// Main entry point: configures the runtime, then owns the main thread
// while the logic thread ticks.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ init(|systems, context|)
//         ├─ with_channel_capacity() └─ run(): spawns logic thread,
//         ├─ with_title()                     runs platform,
//         └─ with_window_size()               joins on exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::{Action, CoreSystemsOrchestrator, GlobalContext, GlobalSystems, PlatformError, SegmentKey};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 frames
/// - **Window**: "Stratus", 800x600
///
/// # Examples
///
/// ```no_run
/// use stratus::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Stage { Main }
/// impl SegmentKey for Stage {}
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump }
/// impl Action for GameAction {}
///
/// EngineBuilder::<Stage, GameAction>::new()
///     .with_tps(120.0)
///     .with_title("Platformer")
///     .build()
///     .init(|systems, _context| {
///         let gameplay = InputLayer::new("Gameplay").with_binding(KeyCode::Space, GameAction::Jump);
///         let _ = systems.input.push_layer(gameplay);
///     })
///     .run()?;
/// # Ok::<(), stratus::core::PlatformError>(())
/// ```
pub struct EngineBuilder<K: SegmentKey, A: Action> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    _phantom: PhantomData<(K, A)>,
}

impl<K: SegmentKey, A: Action> EngineBuilder<K, A> {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Sets the logic thread's fixed tick rate.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets how many input frames may wait between the threads before new
    /// frames are dropped.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Logical window size in pixels.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn build(self) -> Engine<K, A> {
        info!(
            target: "engine",
            "Building engine (TPS: {}, channel: {}, window: {:?})",
            self.tps,
            self.channel_capacity,
            self.window.title
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<K: SegmentKey, A: Action> Default for EngineBuilder<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Stratus runtime. Create through [`EngineBuilder`].
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem, Episode
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Translation
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<K: SegmentKey, A: Action> {
    orchestrator: CoreSystemsOrchestrator<K, A>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<K: SegmentKey, A: Action> Engine<K, A> {
    //--- Initialization ---------------------------------------------------

    /// Configures systems and context before the logic thread starts.
    ///
    /// Register segments, push the starting input layers, define axes.
    /// If no segment was entered here, the first registered one is entered
    /// when the logic thread starts.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems<K, A>, &mut GlobalContext),
    {
        info!(target: "engine", "Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes.
    ///
    /// # Lifecycle
    ///
    /// 1. Create the bounded platform → core channel
    /// 2. Spawn the logic thread at the configured TPS
    /// 3. Run the platform event loop on this thread (blocks)
    /// 4. Join the logic thread
    ///
    /// # Errors
    ///
    /// Returns the platform error if the event loop fails, otherwise
    /// [`PlatformError::LogicThreadPanicked`] if the logic thread panicked.
    pub fn run(self) -> Result<(), PlatformError> {
        info!(target: "engine", "Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx) = bounded(self.channel_capacity);
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps);

        let platform = Platform::new(tx, self.window);
        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!(target: "engine", "Platform error: {}", e);
        }

        info!(target: "engine", "Platform event loop exited");

        let core_result = match core_handle.join() {
            Ok(()) => {
                info!(target: "engine", "Core thread terminated cleanly");
                Ok(())
            }
            Err(_) => {
                error!(target: "engine", "Core thread panicked");
                Err(PlatformError::LogicThreadPanicked)
            }
        };

        info!(target: "engine", "Engine shutdown complete");
        platform_result.and(core_result)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestStage {
        Main,
    }

    impl SegmentKey for TestStage {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
    }

    impl Action for TestAction {}

    type Builder = EngineBuilder<TestStage, TestAction>;

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = Builder::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window, WindowConfig::default());
    }

    #[test]
    fn builder_with_tps() {
        assert_eq!(Builder::new().with_tps(120.0).tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        Builder::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        Builder::new().with_tps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        Builder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_window_settings() {
        let builder = Builder::new().with_title("Demo").with_window_size(1280, 720);
        assert_eq!(builder.window.title, "Demo");
        assert_eq!((builder.window.width, builder.window.height), (1280, 720));
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = Builder::new()
            .with_tps(30.0)
            .with_channel_capacity(256)
            .with_title("Chained")
            .build();

        assert_eq!(engine.tps, 30.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.title, "Chained");
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_runs_against_systems_and_context() {
        let mut called = false;
        let _engine = Builder::new().build().init(|systems, context| {
            let _ = systems.input.push_layer(
                crate::core::input::InputLayer::new("Gameplay")
                    .with_binding(crate::core::input::KeyCode::Space, TestAction::Jump),
            );
            context.input_state.define_axis("Horizontal", Default::default());
            called = true;
        });
        assert!(called);
    }
}
