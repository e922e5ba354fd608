//=========================================================================
// Core
//=========================================================================
//
// Engine-independent runtime: input layers, event bus, episodes, saves,
// and the logic-thread orchestrator that ties them together.
//
// Architecture:
//   CoreSystemsOrchestrator (logic thread @ TPS)
//     ├─ GlobalSystems: InputSystem<A> + Episode<K>
//     └─ GlobalContext: StateTracker + MessageBus
//
//=========================================================================

//=== Module Declarations =================================================

pub mod episode;
pub mod globals;
pub mod input;
pub mod message_bus;
pub mod save;
pub mod validation;

pub(crate) mod orchestrator;
pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use episode::{Episode, Segment, SegmentEvent, SegmentKey, SegmentRequest};
pub use globals::{GlobalContext, GlobalSystems};
pub use input::Action;
pub use platform_bridge::PlatformError;
pub use validation::Validation;

//=== Internal API ========================================================

pub(crate) use orchestrator::CoreSystemsOrchestrator;
