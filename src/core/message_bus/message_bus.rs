//=========================================================================
// Message Bus
//=========================================================================
//
// Per-type message queues for communication between systems that do not
// hold references to each other (layers, segments, game code).
//
// Architecture:
//   Publishers → push<M>() → HashMap<TypeId, Vec<M>>
//                                ↓
//   N consumers ← read<M>()      (shared slice)
//   1 owner     ← drain<M>()     (takes messages, e.g. requests)
//                                ↓
//   Orchestrator → clear<M>() / clear_all() at tick boundary
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::error;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Message =============================================================

/// Marker trait for types that can travel on the [`MessageBus`].
///
/// Implemented for every `Send + 'static` type.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=== MessageBus ==========================================================

/// Typed event bus owned by the `GlobalContext`.
///
/// # Example
///
/// ```
/// use stratus::core::message_bus::MessageBus;
///
/// struct ScoreChanged(u32);
///
/// let mut bus = MessageBus::new();
/// bus.push(ScoreChanged(10));
///
/// assert_eq!(bus.read::<ScoreChanged>()[0].0, 10);
/// assert_eq!(bus.drain::<ScoreChanged>().len(), 1);
/// assert!(!bus.has_messages::<ScoreChanged>());
/// ```
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self { queues: HashMap::new() }
    }

    //--- Publishing -------------------------------------------------------

    /// Appends a message to the queue for its type.
    pub fn push<M: Message>(&mut self, msg: M) {
        match self.queue_mut::<M>() {
            Some(queue) => queue.push(msg),
            None => error!(
                target: "message_bus",
                "Queue type mismatch for {}",
                std::any::type_name::<M>()
            ),
        }
    }

    /// Appends every message of an iterator, preserving order.
    pub fn extend<M: Message>(&mut self, msgs: impl IntoIterator<Item = M>) {
        for msg in msgs {
            self.push(msg);
        }
    }

    //--- Consuming --------------------------------------------------------

    /// Messages of type `M` queued since the last clear, oldest first.
    ///
    /// Any number of systems may read the same messages within a tick.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Takes all messages of type `M`, leaving the queue empty.
    ///
    /// For single-owner messages such as stack or segment requests.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(std::mem::take)
            .unwrap_or_default()
    }

    //--- Queries ----------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map_or(0, |v| v.len())
    }

    /// Total number of queued messages across all types.
    pub fn total(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears messages of type `M`, keeping the allocation.
    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Clears every queue, keeping allocations.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    //--- Internal ---------------------------------------------------------

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }

    fn queue_mut<M: Message>(&mut self) -> Option<&mut Vec<M>> {
        self.queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()))
            .as_any_mut()
            .downcast_mut::<Vec<M>>()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Clone)]
    struct ScoreChanged(u32);

    #[derive(Debug, PartialEq, Clone)]
    struct PauseRequested {
        source: String,
    }

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<ScoreChanged>());
        assert!(bus.read::<ScoreChanged>().is_empty());
        assert_eq!(bus.total(), 0);
    }

    #[test]
    fn read_is_multi_consumer_and_ordered() {
        let mut bus = MessageBus::new();
        bus.extend([ScoreChanged(1), ScoreChanged(2), ScoreChanged(3)]);

        let first: Vec<_> = bus.read::<ScoreChanged>().iter().map(|m| m.0).collect();
        let second: Vec<_> = bus.read::<ScoreChanged>().iter().map(|m| m.0).collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn queues_are_separate_per_type() {
        let mut bus = MessageBus::new();
        bus.push(ScoreChanged(42));
        bus.push(PauseRequested { source: "menu".to_string() });
        bus.push(ScoreChanged(99));

        assert_eq!(bus.count::<ScoreChanged>(), 2);
        assert_eq!(bus.count::<PauseRequested>(), 1);
        assert_eq!(bus.total(), 3);
        assert_eq!(bus.read::<PauseRequested>()[0].source, "menu");
    }

    #[test]
    fn drain_takes_ownership_and_empties_queue() {
        let mut bus = MessageBus::new();
        bus.push(PauseRequested { source: "a".to_string() });
        bus.push(PauseRequested { source: "b".to_string() });

        let drained = bus.drain::<PauseRequested>();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].source, "b");
        assert!(!bus.has_messages::<PauseRequested>());

        assert!(bus.drain::<ScoreChanged>().is_empty());

        bus.push(PauseRequested { source: "c".to_string() });
        assert_eq!(bus.count::<PauseRequested>(), 1);
    }

    #[test]
    fn clear_affects_only_one_type() {
        let mut bus = MessageBus::new();
        bus.push(ScoreChanged(1));
        bus.push(PauseRequested { source: "x".to_string() });

        bus.clear::<ScoreChanged>();
        assert!(!bus.has_messages::<ScoreChanged>());
        assert!(bus.has_messages::<PauseRequested>());

        bus.clear_all();
        assert_eq!(bus.total(), 0);
    }

    #[test]
    fn read_clear_read_across_ticks() {
        let mut bus = MessageBus::new();
        bus.push(ScoreChanged(42));
        assert_eq!(bus.read::<ScoreChanged>().len(), 1);
        bus.clear_all();

        assert!(bus.read::<ScoreChanged>().is_empty());

        bus.push(ScoreChanged(99));
        assert_eq!(bus.read::<ScoreChanged>(), &[ScoreChanged(99)]);
    }
}
