//=========================================================================
// Episode
//=========================================================================
//
// Owns registered segments in order and drives transitions between them.
//
// Segments are stored by key in registration order so `next`/`previous`
// are well defined; each keeps its own state across visits.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Segment, SegmentEvent, SegmentKey, SegmentRequest};
use crate::core::globals::GlobalContext;
use crate::core::validation::Validation;

//=== Episode =============================================================

/// Ordered segment sequence with a single current segment.
///
/// # Example
///
/// ```rust
/// # use stratus::prelude::*;
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Stage { Intro, Wave }
/// impl SegmentKey for Stage {}
///
/// struct Idle;
/// impl Segment<Stage> for Idle {
///     fn update(&mut self, _context: &mut GlobalContext) {}
/// }
///
/// let mut context = GlobalContext::new();
/// let mut episode = Episode::new();
/// episode.register(Stage::Intro, Idle);
/// episode.register(Stage::Wave, Idle);
///
/// assert!(episode.begin(&mut context).is_valid());
/// assert!(episode.next(&mut context).is_valid());
/// assert_eq!(episode.current(), Some(Stage::Wave));
/// assert!(!episode.next(&mut context).is_valid());
/// ```
pub struct Episode<K: SegmentKey> {
    segments: Vec<(K, Box<dyn Segment<K>>)>,
    current: Option<K>,
    looping: bool,
    events: Vec<SegmentEvent<K>>,
}

impl<K: SegmentKey> Episode<K> {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            current: None,
            looping: false,
            events: Vec::new(),
        }
    }

    /// When looping, `next` on the last segment wraps to the first and
    /// `previous` on the first wraps to the last.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    //--- Registration -----------------------------------------------------

    /// Registers a segment at the end of the sequence.
    ///
    /// Registering a key twice replaces the segment in place.
    pub fn register<T>(&mut self, key: K, segment: T)
    where
        T: Segment<K> + 'static,
    {
        match self.position(key) {
            Some(index) => {
                warn!(target: "episode", "Segment {:?} was already registered and has been replaced", key);
                self.segments[index].1 = Box::new(segment);
            }
            None => {
                debug!(target: "episode", "Registered segment {:?}", key);
                self.segments.push((key, Box::new(segment)));
            }
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Enters the first registered segment.
    pub fn begin(&mut self, context: &mut GlobalContext) -> Validation {
        match self.segments.first() {
            Some(&(first, _)) => {
                info!(target: "episode", "Beginning episode at {:?}", first);
                self.enter(first, context)
            }
            None => Validation::invalid("Episode has no registered segments"),
        }
    }

    /// Makes `key` the current segment.
    ///
    /// Refused when `key` is unregistered, already current, or its
    /// `validate_entry` fails. On success the previous segment exits
    /// before the new one enters.
    pub fn enter(&mut self, key: K, context: &mut GlobalContext) -> Validation {
        let Some(index) = self.position(key) else {
            warn!(target: "episode", "Attempted to enter unregistered segment {:?}", key);
            return Validation::invalid(format!("Segment {:?} is not registered", key));
        };

        if self.current == Some(key) {
            return Validation::invalid(format!("Segment {:?} is already current", key));
        }

        let gate = self.segments[index].1.validate_entry(context);
        if !gate.is_valid() {
            debug!(target: "episode", "Entry to {:?} refused: {}", key, gate);
            return gate;
        }

        self.exit_current(context);
        self.enter_at(index, context);
        Validation::valid()
    }

    /// Enters the segment after the current one.
    pub fn next(&mut self, context: &mut GlobalContext) -> Validation {
        let Some(index) = self.current_index() else {
            return self.begin(context);
        };

        let target = if index + 1 < self.segments.len() {
            index + 1
        } else if self.looping {
            0
        } else {
            return Validation::invalid("Already at the last segment");
        };

        self.enter_or_restart(target, context)
    }

    /// Enters the segment before the current one.
    pub fn previous(&mut self, context: &mut GlobalContext) -> Validation {
        let Some(index) = self.current_index() else {
            return Validation::invalid("No current segment");
        };

        let target = if index > 0 {
            index - 1
        } else if self.looping {
            self.segments.len() - 1
        } else {
            return Validation::invalid("Already at the first segment");
        };

        self.enter_or_restart(target, context)
    }

    /// Exits and re-enters the current segment.
    pub fn restart(&mut self, context: &mut GlobalContext) -> Validation {
        let Some(index) = self.current_index() else {
            return Validation::invalid("No current segment");
        };

        debug!(target: "episode", "Restarting segment {:?}", self.segments[index].0);
        self.exit_current(context);
        self.enter_at(index, context);
        Validation::valid()
    }

    /// Leaves the current segment without entering another.
    pub fn exit(&mut self, context: &mut GlobalContext) -> Validation {
        if self.current.is_none() {
            return Validation::invalid("No current segment");
        }
        self.exit_current(context);
        Validation::valid()
    }

    //--- Update Loop ------------------------------------------------------

    /// Updates the current segment.
    pub fn update(&mut self, context: &mut GlobalContext) {
        if let Some(index) = self.current_index() {
            self.segments[index].1.update(context);
        }
    }

    /// Applies queued [`SegmentRequest`]s in FIFO order, then replaces last
    /// tick's [`SegmentEvent`]s on the bus with this tick's.
    pub fn process_requests(&mut self, context: &mut GlobalContext) {
        for request in context.message_bus.drain::<SegmentRequest<K>>() {
            let outcome = match request {
                SegmentRequest::Enter(key) => self.enter(key, context),
                SegmentRequest::Next => self.next(context),
                SegmentRequest::Previous => self.previous(context),
                SegmentRequest::Restart => self.restart(context),
                SegmentRequest::Exit => self.exit(context),
            };

            if !outcome.is_valid() {
                debug!(target: "episode", "Request {:?} ignored: {}", request, outcome);
            }
        }

        context.message_bus.clear::<SegmentEvent<K>>();
        context.message_bus.extend(self.events.drain(..));
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> Option<K> {
        self.current
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    /// Registered keys in sequence order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.segments.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Takes the transitions recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<SegmentEvent<K>> {
        std::mem::take(&mut self.events)
    }

    //--- Internal Helpers -------------------------------------------------

    fn position(&self, key: K) -> Option<usize> {
        self.segments.iter().position(|(k, _)| *k == key)
    }

    fn current_index(&self) -> Option<usize> {
        self.current.and_then(|key| self.position(key))
    }

    /// Looping over a single segment lands on the current one.
    fn enter_or_restart(&mut self, index: usize, context: &mut GlobalContext) -> Validation {
        let key = self.segments[index].0;
        if self.current == Some(key) {
            self.restart(context)
        } else {
            self.enter(key, context)
        }
    }

    fn exit_current(&mut self, context: &mut GlobalContext) {
        let Some(index) = self.current_index() else {
            return;
        };

        let (key, segment) = &mut self.segments[index];
        debug!(target: "episode", "Exiting segment {:?}", key);
        segment.on_exit(context);
        self.events.push(SegmentEvent::Exited(*key));
        self.current = None;
    }

    fn enter_at(&mut self, index: usize, context: &mut GlobalContext) {
        let (key, segment) = &mut self.segments[index];
        debug!(target: "episode", "Entering segment {:?}", key);
        segment.on_enter(context);
        self.events.push(SegmentEvent::Entered(*key));
        self.current = Some(*key);
    }
}

impl<K: SegmentKey> Default for Episode<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
