//! Board notifications and the observer registry.
//!
//! Observers are plain closures registered per [`EventKind`] (or for all
//! kinds). They run synchronously, in registration order, and receive the
//! event plus a shared borrow of whatever context the registry dispatches
//! with. For a board that is the board itself, so observers can read state
//! but cannot start another play from inside a notification.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::grid::Swap;

/// Something observers may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardEvent {
    /// Visible grid changed: after a commit, a gravity/refill pass or an undo.
    BoardChanged,
    /// A play finished; fired exactly once per committed play.
    ScoreFinalized { score: i64 },
    /// A hint was handed out and charged.
    HintGiven { swap: Swap, penalty: i64 },
}

impl BoardEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::BoardChanged => EventKind::BoardChanged,
            Self::ScoreFinalized { .. } => EventKind::ScoreFinalized,
            Self::HintGiven { .. } => EventKind::HintGiven,
        }
    }
}

/// Discriminant of [`BoardEvent`], used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    BoardChanged,
    ScoreFinalized,
    HintGiven,
}

/// Handle for removing an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl ObserverId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0)
    }
}

/// A registered callback.
pub type Observer<C> = Box<dyn FnMut(&BoardEvent, &C)>;

/// Observers indexed by the event kind they listen for.
///
/// ## Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use rust_match3::play::{BoardEvent, EventKind, ObserverRegistry};
///
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
///
/// let mut registry: ObserverRegistry<()> = ObserverRegistry::new();
/// registry.subscribe(EventKind::BoardChanged, move |_, _| counter.set(counter.get() + 1));
///
/// registry.dispatch(&BoardEvent::BoardChanged, &());
/// registry.dispatch(&BoardEvent::ScoreFinalized { score: 10 }, &());
/// assert_eq!(seen.get(), 1);
/// ```
pub struct ObserverRegistry<C> {
    observers: FxHashMap<ObserverId, Observer<C>>,
    by_kind: FxHashMap<EventKind, Vec<ObserverId>>,
    all_kinds: Vec<ObserverId>,
    next_id: u32,
}

impl<C> Default for ObserverRegistry<C> {
    fn default() -> Self {
        Self {
            observers: FxHashMap::default(),
            by_kind: FxHashMap::default(),
            all_kinds: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C> std::fmt::Debug for ObserverRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .field("by_kind", &self.by_kind)
            .field("all_kinds", &self.all_kinds)
            .finish()
    }
}

impl<C> ObserverRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, observer: Observer<C>) -> ObserverId {
        let id = ObserverId::new(self.next_id);
        self.next_id += 1;
        self.observers.insert(id, observer);
        id
    }

    /// Listen for one kind of event.
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        observer: impl FnMut(&BoardEvent, &C) + 'static,
    ) -> ObserverId {
        let id = self.insert(Box::new(observer));
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Listen for every event.
    pub fn subscribe_all(&mut self, observer: impl FnMut(&BoardEvent, &C) + 'static) -> ObserverId {
        let id = self.insert(Box::new(observer));
        self.all_kinds.push(id);
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        if self.observers.remove(&id).is_none() {
            return false;
        }

        self.all_kinds.retain(|&other| other != id);
        let mut empty_kinds = Vec::new();
        for (kind, ids) in &mut self.by_kind {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                empty_kinds.push(*kind);
            }
        }
        for kind in empty_kinds {
            self.by_kind.remove(&kind);
        }
        true
    }

    /// Call every observer interested in `event`, oldest first.
    pub fn dispatch(&mut self, event: &BoardEvent, context: &C) {
        let mut ids: Vec<ObserverId> = self.all_kinds.clone();
        if let Some(kind_ids) = self.by_kind.get(&event.kind()) {
            ids.extend_from_slice(kind_ids);
        }
        ids.sort_unstable();

        for id in ids {
            if let Some(observer) = self.observers.get_mut(&id) {
                observer(event, context);
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::grid::Position;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn FnMut(&BoardEvent, &())>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::clone(&log);
        let make = move |name: &'static str| {
            let log = Rc::clone(&shared);
            Box::new(move |event: &BoardEvent, _: &()| {
                log.borrow_mut().push(format!("{name}:{:?}", event.kind()));
            }) as Box<dyn FnMut(&BoardEvent, &())>
        };
        (log, make)
    }

    #[test]
    fn test_event_kind() {
        let swap = Swap::new(Position::new(0, 0), Position::new(0, 1));
        assert_eq!(BoardEvent::BoardChanged.kind(), EventKind::BoardChanged);
        assert_eq!(BoardEvent::ScoreFinalized { score: 5 }.kind(), EventKind::ScoreFinalized);
        assert_eq!(BoardEvent::HintGiven { swap, penalty: 50 }.kind(), EventKind::HintGiven);
    }

    #[test]
    fn test_dispatch_by_kind() {
        let (log, make) = recorder();
        let mut registry = ObserverRegistry::new();
        registry.subscribe(EventKind::ScoreFinalized, make("score"));
        registry.subscribe(EventKind::BoardChanged, make("board"));

        registry.dispatch(&BoardEvent::BoardChanged, &());
        registry.dispatch(&BoardEvent::ScoreFinalized { score: 30 }, &());

        assert_eq!(*log.borrow(), vec!["board:BoardChanged", "score:ScoreFinalized"]);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let (log, make) = recorder();
        let mut registry = ObserverRegistry::new();
        registry.subscribe(EventKind::BoardChanged, make("a"));
        registry.subscribe_all(make("b"));
        registry.subscribe(EventKind::BoardChanged, make("c"));

        registry.dispatch(&BoardEvent::BoardChanged, &());
        assert_eq!(
            *log.borrow(),
            vec!["a:BoardChanged", "b:BoardChanged", "c:BoardChanged"]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let (log, make) = recorder();
        let mut registry = ObserverRegistry::new();
        let a = registry.subscribe(EventKind::BoardChanged, make("a"));
        let b = registry.subscribe_all(make("b"));
        assert_eq!(registry.len(), 2);

        assert!(registry.unsubscribe(a));
        assert!(!registry.unsubscribe(a));
        registry.dispatch(&BoardEvent::BoardChanged, &());
        assert_eq!(*log.borrow(), vec!["b:BoardChanged"]);

        assert!(registry.unsubscribe(b));
        assert!(registry.is_empty());
        assert!(registry.by_kind.is_empty());
    }

    #[test]
    fn test_event_serde() {
        let swap = Swap::new(Position::new(2, 3), Position::new(3, 3));
        let event = BoardEvent::HintGiven { swap, penalty: 50 };
        let json = serde_json::to_string(&event).unwrap();
        let back: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
