//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the platform thread and the logic thread: the only
// message type that crosses the channel, and the platform's error type.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;
use winit::error::EventLoopError;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== PlatformEvent =======================================================

/// Events sent from the platform thread to the logic thread.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Input gathered since the previous frame boundary.
    ///
    /// `discrete` keeps key/button order; `continuous` holds cursor and
    /// axis samples. Empty frames are not sent.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// Window close requested; the logic thread stops after this.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Fatal platform failures returned by [`Engine::run`](crate::Engine::run).
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),

    #[error("Logic thread panicked")]
    LogicThreadPanicked,
}
