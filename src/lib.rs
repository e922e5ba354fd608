//=========================================================================
// Stratus Library Root
//
// Public surface of the Stratus runtime.
//
// Typical usage:
// ```no_run
// use stratus::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Stage { Main }
// impl SegmentKey for Stage {}
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum GameAction { Jump }
// impl Action for GameAction {}
//
// fn main() -> Result<(), stratus::core::PlatformError> {
//     EngineBuilder::<Stage, GameAction>::new().build().run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the thread-independent systems: input layers, action maps,
// the message bus, episodes and saves. It is usable without a window.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and is not part of the public API.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
