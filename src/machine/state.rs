//! State records and the ordered state set.

use super::fsm::Fsm;
use crate::core::{Key, StateKey, ValueList};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

/// Called when entering a state, with the transition's context arguments.
pub type EnterFn<K> = Arc<dyn Fn(&Fsm<K>, &ValueList) + Send + Sync>;

/// Called when leaving a state.
pub type ExitFn<K> = Arc<dyn Fn(&Fsm<K>) + Send + Sync>;

/// Decides where a request made from a state actually goes.
///
/// Receives the requested destination and the request's context arguments.
/// Must answer with [`ValueList::accept`] (or any list whose first element
/// is a `Key<K>` or `K`) to transition, or [`ValueList::deny`] to refuse.
pub type FilterFn<K> = Arc<dyn Fn(&Fsm<K>, &Key<K>, &ValueList) -> ValueList + Send + Sync>;

/// Replaces the exit/enter pair for one specific ordered pair of states.
pub type FromToFn<K> = Arc<dyn Fn(&Fsm<K>, &ValueList) + Send + Sync>;

/// A registered state: its key, optional callbacks and allowed destinations.
///
/// All callbacks are optional; a missing one does nothing. The allow-list
/// is only consulted by the default filter: when empty every destination is
/// accepted, otherwise only the listed ones (plus Off, which is always
/// reachable).
///
/// # Example
///
/// ```rust
/// use ely_fsm::machine::State;
///
/// let idle = State::new("Idle")
///     .on_enter(|fsm, _data| println!("{} idles", fsm.name()))
///     .on_exit(|_fsm| println!("leaving Idle"))
///     .allow(["Walk", "Jump"]);
///
/// assert_eq!(idle.key(), &"Idle");
/// assert_eq!(idle.allowed().len(), 2);
/// ```
pub struct State<K: StateKey> {
    key: K,
    pub(crate) on_enter: Option<EnterFn<K>>,
    pub(crate) on_exit: Option<ExitFn<K>>,
    pub(crate) filter: Option<FilterFn<K>>,
    allowed: BTreeSet<K>,
}

impl<K: StateKey> State<K> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            on_enter: None,
            on_exit: None,
            filter: None,
            allowed: BTreeSet::new(),
        }
    }

    /// Set the enter callback.
    pub fn on_enter<F>(mut self, enter: F) -> Self
    where
        F: Fn(&Fsm<K>, &ValueList) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(enter));
        self
    }

    /// Set the exit callback.
    pub fn on_exit<F>(mut self, exit: F) -> Self
    where
        F: Fn(&Fsm<K>) + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(exit));
        self
    }

    /// Set the filter callback, replacing the default filter for requests
    /// made while in this state.
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Fsm<K>, &Key<K>, &ValueList) -> ValueList + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Add destinations to the allow-list read by the default filter.
    pub fn allow(mut self, destinations: impl IntoIterator<Item = K>) -> Self {
        self.allowed.extend(destinations);
        self
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn allowed(&self) -> &BTreeSet<K> {
        &self.allowed
    }

    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }
}

impl<K: StateKey> Clone for State<K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
            filter: self.filter.clone(),
            allowed: self.allowed.clone(),
        }
    }
}

impl<K: StateKey> fmt::Debug for State<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("key", &self.key)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("filter", &self.filter.is_some())
            .field("allowed", &self.allowed)
            .finish()
    }
}

/// Registered states, kept in strict key order.
///
/// Inserting a state whose key is already present replaces it.
#[derive(Clone, Debug)]
pub struct StateSet<K: StateKey> {
    states: BTreeMap<K, State<K>>,
}

impl<K: StateKey> StateSet<K> {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
        }
    }

    /// Insert a state, returning the one it replaced.
    pub fn insert(&mut self, state: State<K>) -> Option<State<K>> {
        self.states.insert(state.key.clone(), state)
    }

    pub fn remove(&mut self, key: &K) -> Option<State<K>> {
        self.states.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&State<K>> {
        self.states.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.states.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.states.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &State<K>> {
        self.states.values()
    }

    /// The state following `from`, wrapping past the last one.
    ///
    /// From Off (or from a key that is not a member and has no successor)
    /// this is the first state. `None` only when the set is empty.
    pub fn next_after(&self, from: &Key<K>) -> Option<&K> {
        let following = match from {
            Key::Off => None,
            Key::State(key) => self
                .states
                .range((Bound::Excluded(key), Bound::Unbounded))
                .next()
                .map(|(key, _)| key),
        };
        following.or_else(|| self.states.keys().next())
    }

    /// The state preceding `from`, wrapping past the first one.
    ///
    /// From Off this is the last state. `None` only when the set is empty.
    pub fn prev_before(&self, from: &Key<K>) -> Option<&K> {
        let preceding = match from {
            Key::Off => None,
            Key::State(key) => self.states.range(..key).next_back().map(|(key, _)| key),
        };
        preceding.or_else(|| self.states.keys().next_back())
    }
}

impl<K: StateKey> Default for StateSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> FromIterator<State<K>> for StateSet<K> {
    fn from_iter<I: IntoIterator<Item = State<K>>>(iter: I) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}
