//=========================================================================
// Message Bus Module
//=========================================================================
//
// Typed publish/subscribe scoped to the GlobalContext. Replaces ambient
// global dispatch: whoever holds the context can publish and read.
//
//=========================================================================

//=== Submodules ==========================================================

mod message_bus;
mod message_queue;

//=== Public API ==========================================================

pub use message_bus::{Message, MessageBus};
