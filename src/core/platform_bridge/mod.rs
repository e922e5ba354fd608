//=========================================================================
// Platform Bridge
//=========================================================================
//
// Connects the windowing backend to the logic thread.
//
// Components:
// - `interface`: event and error types shared by both sides
// - `event_collector`: logic-side channel draining into input batches
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
