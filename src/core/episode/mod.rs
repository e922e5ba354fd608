//=========================================================================
// Episodes
//=========================================================================
//
// Gameplay orchestration as an ordered sequence of segments (intro,
// combat wave, cutscene, results). Exactly one segment is current.
//
// Architecture:
//   Episode
//     ├─ segments: Vec<(K, Box<dyn Segment<K>>)>   (registration order)
//     └─ current: Option<K>
//
// Flow:
//   update() → current Segment::update()
//   process_requests() → SegmentRequest<K> → enter/exit → SegmentEvent<K>
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::validation::Validation;

//=== Module Declarations =================================================

mod episode;

//=== Public API ==========================================================

pub use episode::Episode;

//=== SegmentKey ==========================================================

/// Marker trait for segment identifiers, usually a game enum.
pub trait SegmentKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Segment =============================================================

/// One phase of an episode with lifecycle hooks.
///
/// Only `update()` is required:
///
/// ```rust
/// # use stratus::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Stage { Intro }
/// # impl SegmentKey for Stage {}
/// struct Intro {
///     ticks: u32,
/// }
///
/// impl Segment<Stage> for Intro {
///     fn update(&mut self, _context: &mut GlobalContext) {
///         self.ticks += 1;
///     }
/// }
/// ```
pub trait Segment<K: SegmentKey>: Send {
    /// Called when the segment becomes current.
    fn on_enter(&mut self, _context: &mut GlobalContext) {}

    /// Called when the segment stops being current.
    fn on_exit(&mut self, _context: &mut GlobalContext) {}

    /// Called every tick while current.
    fn update(&mut self, context: &mut GlobalContext);

    /// Gate checked before entry. An invalid result refuses the transition
    /// and leaves the current segment untouched.
    fn validate_entry(&self, _context: &GlobalContext) -> Validation {
        Validation::valid()
    }
}

//=== Requests & Events ===================================================

/// Transition requested through the message bus, applied at the end of
/// the tick in publication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRequest<K: SegmentKey> {
    Enter(K),
    Next,
    Previous,
    Restart,
    Exit,
}

/// Segment lifecycle notification, published on the bus at the end of
/// the tick in which the transition happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentEvent<K: SegmentKey> {
    Entered(K),
    Exited(K),
}
