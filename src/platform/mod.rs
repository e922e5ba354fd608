//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Owns the OS window and forwards input to the logic thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────────┐
//  │  winit Event Loop        │    │  EventCollector      │
//  │   ↓                      │    │   ↓                  │
//  │  InputProcessor          │    │  InputSystem         │
//  │   ↓                      │    │   ├─ StateTracker    │
//  │  InputBuffer             │    │   └─ active layer    │
//  │   ├─ discrete            │    │   ↓                  │
//  │   └─ continuous          │    │  Episode / segments  │
//  │   ↓                      │    └──────────────────────┘
//  │  RedrawRequested (flush) │             ↑
//  │   ↓                      │             │
//  │  crossbeam (bounded) ────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// RedrawRequested is the frame boundary: everything buffered since the
// previous redraw is sent as one message. The logic thread ticks at its
// own rate, independent of the display refresh.
//
// winit requires the main thread on macOS/iOS, so this runs on the thread
// that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use crossbeam_channel::{Sender, TrySendError};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Window settings chosen through the engine builder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Stratus".to_string(),
            width: 800,
            height: 600,
        }
    }
}

//=== Platform ============================================================

/// Window owner and input forwarder. Not `Send`; stays on the main thread.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    config: WindowConfig,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    pub(crate) fn new(event_sender: Sender<PlatformEvent>, config: WindowConfig) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends everything buffered since the last frame boundary.
    ///
    /// A full channel drops the frame (the logic thread is behind); a
    /// disconnected one means the logic thread is gone. Neither stops the
    /// window from closing normally.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };

        let total = discrete.len() + continuous.len();
        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete.len(),
            continuous.len()
        );

        match self.event_sender.try_send(PlatformEvent::Inputs { discrete, continuous }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Channel full, dropping {} events", total);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {} events", total);
            }
        }
    }

    fn request_shutdown(&self, event_loop: &ActiveEventLoop) {
        if self.event_sender.send(PlatformEvent::WindowClosed).is_err() {
            debug!(target: "platform", "Logic thread already stopped");
        }
        event_loop.exit();
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume (later resumes reuse it).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.request_shutdown(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.request_shutdown(event_loop);
            }

            WindowEvent::RedrawRequested => {
                if let Some(release) = self.input_processor.end_frame() {
                    self.buffer.push(release);
                }
                self.flush_input_buffer();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {
                if let Some(input) = self.input_processor.translate(&event) {
                    self.buffer.push(input);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
