//! The machine object: shared state, construction-time operations and
//! introspection.

use super::error::FsmError;
use super::events::{self, EventSink, SerialCounter};
use super::state::{FromToFn, State, StateSet};
use super::transition::Deferred;
use crate::config::FsmConfig;
use crate::core::{Key, StateKey, Status, TransitionCause, TransitionHistory, ValueList};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// A generic, re-entrant, thread-safe finite state machine.
///
/// Every machine starts in [`Key::Off`]. States are registered with
/// [`Fsm::add_state`], transitions are asked for with [`Fsm::request`]
/// (filtered), [`Fsm::demand`] (filtered, queued when busy) or
/// [`Fsm::force_transition`] (unfiltered, queued when busy).
///
/// All operations take `&self`: the machine guards its state with a
/// reentrant mutex held for the whole duration of each call. Callbacks run
/// under that lock and receive the machine, so they may call back into it;
/// `demand` and `force_transition` made from enter/exit/from-to callbacks
/// are queued and serviced one per completed transition.
///
/// # Example
///
/// ```rust
/// use ely_fsm::core::Key;
/// use ely_fsm::machine::{Fsm, State};
///
/// let fsm = Fsm::new("door");
/// fsm.add_state(State::new("Closed").allow(["Open"]));
/// fsm.add_state(State::new("Open").allow(["Closed"]));
/// fsm.add_state(State::new("Locked"));
///
/// assert_eq!(fsm.request("Closed"), Some(Key::State("Closed")));
/// assert_eq!(fsm.request("Locked"), None); // not allowed from Closed
/// assert_eq!(fsm.request("Open"), Some(Key::State("Open")));
/// ```
pub struct Fsm<K: StateKey> {
    name: String,
    serial: u64,
    pub(crate) inner: ReentrantMutex<RefCell<Inner<K>>>,
}

/// Mutable machine state, only touched with the machine lock held and never
/// borrowed while a callback or the event sink runs.
pub(crate) struct Inner<K: StateKey> {
    pub(crate) states: StateSet<K>,
    pub(crate) from_to: BTreeMap<(K, K), FromToFn<K>>,
    pub(crate) status: Status<K>,
    pub(crate) pending: VecDeque<Deferred<K>>,
    pub(crate) filtering: bool,
    pub(crate) broadcast: bool,
    pub(crate) sink: Option<Arc<dyn EventSink>>,
    pub(crate) history: TransitionHistory<K>,
}

impl<K: StateKey> Inner<K> {
    /// The settled key, or an error naming `operation` while transitioning.
    pub(crate) fn ensure_settled(&self, operation: &'static str) -> Result<Key<K>, FsmError<K>> {
        match &self.status {
            Status::InTransition { from, to } => Err(FsmError::InTransition {
                operation,
                from: from.clone(),
                to: to.clone(),
            }),
            settled => Ok(settled.current_or_next()),
        }
    }

    /// Like `ensure_settled`, also rejecting calls made from a filter.
    pub(crate) fn ensure_requestable(
        &self,
        operation: &'static str,
    ) -> Result<Key<K>, FsmError<K>> {
        let current = self.ensure_settled(operation)?;
        if self.filtering {
            return Err(FsmError::InFilter {
                operation,
                state: current,
            });
        }
        Ok(current)
    }

    fn check_removable(&self, key: &Key<K>) -> Result<K, FsmError<K>> {
        let Key::State(state) = key else {
            return Err(FsmError::RemoveOff);
        };
        if self.status.is_at(key) {
            return Err(FsmError::RemoveCurrent(state.clone()));
        }
        if !self.states.contains(state) {
            return Err(FsmError::UnknownState(state.clone()));
        }
        Ok(state.clone())
    }

    /// Take out the from-to functions naming unregistered states.
    #[must_use]
    fn purge_from_to(&mut self) -> BTreeMap<(K, K), FromToFn<K>> {
        let states = &self.states;
        let (kept, purged) = std::mem::take(&mut self.from_to)
            .into_iter()
            .partition(|((from, to), _)| states.contains(from) && states.contains(to));
        self.from_to = kept;
        purged
    }
}

/// Guard holding a machine's lock.
///
/// While alive, other threads block on every operation of the machine; the
/// holding thread can keep calling into it. Lets callers group several
/// operations so no other thread observes the machine in between.
pub struct FsmLock<'a, K: StateKey> {
    _guard: ReentrantMutexGuard<'a, RefCell<Inner<K>>>,
}

impl<K: StateKey> Fsm<K> {
    /// Create a machine with the default configuration and a serial number
    /// from the process-wide counter.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, FsmConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: FsmConfig) -> Self {
        Self::with_serial(name, config, SerialCounter::global())
    }

    /// Create a machine drawing its serial number from `serials`.
    pub fn with_serial(
        name: impl Into<String>,
        config: FsmConfig,
        serials: &SerialCounter,
    ) -> Self {
        let name = name.into();
        let serial = serials.next();
        tracing::trace!(fsm = %name, serial, "machine created");
        Self {
            name,
            serial,
            inner: ReentrantMutex::new(RefCell::new(Inner {
                states: StateSet::new(),
                from_to: BTreeMap::new(),
                status: Status::Off,
                pending: VecDeque::new(),
                filtering: false,
                broadcast: config.broadcast_state_changes,
                sink: None,
                history: TransitionHistory::with_limit(config.history_limit),
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Name of the event broadcast on every state change.
    pub fn state_change_event(&self) -> String {
        events::state_change_event(self.serial, &self.name)
    }

    /// Hold the machine's lock until the returned guard is dropped.
    pub fn lock(&self) -> FsmLock<'_, K> {
        FsmLock {
            _guard: self.inner.lock(),
        }
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&Inner<K>) -> R) -> R {
        let guard = self.inner.lock();
        let inner = guard.borrow();
        f(&inner)
    }

    pub(crate) fn with_inner_mut<R>(&self, f: impl FnOnce(&mut Inner<K>) -> R) -> R {
        let guard = self.inner.lock();
        let mut inner = guard.borrow_mut();
        f(&mut inner)
    }

    /// Log a rejected operation, turning the result into an `Option`.
    pub(crate) fn report<T>(
        &self,
        operation: &'static str,
        result: Result<T, FsmError<K>>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(
                    fsm = %self.name,
                    serial = self.serial,
                    error = %error,
                    "{operation} rejected"
                );
                None
            }
        }
    }

    // Construction-time operations

    /// Register a state, replacing any state with the same key.
    ///
    /// Replacing follows the removal rules: the current state cannot be
    /// replaced. From-to functions of a replaced state are kept.
    pub fn add_state(&self, state: State<K>) -> bool {
        let result = self.try_add_state(state);
        self.report("add_state", result).is_some()
    }

    pub fn try_add_state(&self, state: State<K>) -> Result<(), FsmError<K>> {
        let _lock = self.inner.lock();
        self.with_inner(|inner| {
            inner.ensure_settled("add_state")?;
            if inner.states.contains(state.key()) {
                inner.check_removable(&Key::State(state.key().clone()))?;
            }
            Ok::<_, FsmError<K>>(())
        })?;
        let replaced = self.with_inner_mut(|inner| inner.states.insert(state));
        drop(replaced);
        Ok(())
    }

    /// Unregister a state, dropping every from-to function that names it.
    ///
    /// Off and the current state cannot be removed.
    pub fn remove_state(&self, key: impl Into<Key<K>>) -> bool {
        let result = self.try_remove_state(key);
        self.report("remove_state", result).is_some()
    }

    pub fn try_remove_state(&self, key: impl Into<Key<K>>) -> Result<(), FsmError<K>> {
        let key = key.into();
        let removed = self.with_inner_mut(|inner| {
            inner.ensure_settled("remove_state")?;
            let removed = inner.check_removable(&key)?;
            let state = inner.states.remove(&removed);
            Ok::<_, FsmError<K>>((state, inner.purge_from_to()))
        })?;
        drop(removed);
        Ok(())
    }

    /// Register a function replacing exit(`from`) + enter(`to`).
    ///
    /// Both states must already be registered. An existing function for the
    /// same pair is replaced.
    pub fn add_from_to<F>(&self, from: K, to: K, from_to: F) -> bool
    where
        F: Fn(&Fsm<K>, &ValueList) + Send + Sync + 'static,
    {
        let result = self.try_add_from_to(from, to, Arc::new(from_to));
        self.report("add_from_to", result).is_some()
    }

    pub fn try_add_from_to(
        &self,
        from: K,
        to: K,
        from_to: FromToFn<K>,
    ) -> Result<(), FsmError<K>> {
        let _lock = self.inner.lock();
        self.with_inner(|inner| {
            inner.ensure_settled("add_from_to")?;
            for key in [&from, &to] {
                if !inner.states.contains(key) {
                    return Err(FsmError::UnknownState(key.clone()));
                }
            }
            Ok(())
        })?;
        let replaced = self.with_inner_mut(|inner| inner.from_to.insert((from, to), from_to));
        drop(replaced);
        Ok(())
    }

    pub fn remove_from_to(&self, from: K, to: K) -> bool {
        let result = self.try_remove_from_to(from, to);
        self.report("remove_from_to", result).is_some()
    }

    pub fn try_remove_from_to(&self, from: K, to: K) -> Result<(), FsmError<K>> {
        let removed = self.with_inner_mut(|inner| {
            inner.ensure_settled("remove_from_to")?;
            inner
                .from_to
                .remove(&(from.clone(), to.clone()))
                .ok_or(FsmError::UnknownFromTo { from, to })
        })?;
        drop(removed);
        Ok(())
    }

    /// Replace all registered states at once.
    ///
    /// The current state (unless Off) must be part of the new set. From-to
    /// functions naming states outside the new set are dropped.
    pub fn set_state_set(&self, states: StateSet<K>) -> bool {
        let result = self.try_set_state_set(states);
        self.report("set_state_set", result).is_some()
    }

    pub fn try_set_state_set(&self, states: StateSet<K>) -> Result<(), FsmError<K>> {
        let _lock = self.inner.lock();
        self.with_inner(|inner| {
            if let Key::State(current) = inner.ensure_settled("set_state_set")? {
                if !states.contains(&current) {
                    return Err(FsmError::CurrentStateDropped(current));
                }
            }
            Ok(())
        })?;
        let replaced = self.with_inner_mut(|inner| {
            let old = std::mem::replace(&mut inner.states, states);
            (old, inner.purge_from_to())
        });
        drop(replaced);
        Ok(())
    }

    // Broadcasting

    /// Turn state-change broadcasting on or off.
    pub fn set_broadcast_state_changes(&self, broadcast: bool) {
        self.with_inner_mut(|inner| inner.broadcast = broadcast);
    }

    pub fn is_broadcasting(&self) -> bool {
        self.with_inner(|inner| inner.broadcast)
    }

    /// Set where state-change events go. Without a sink, broadcasting only
    /// logs the event.
    pub fn set_event_sink<S: EventSink + 'static>(&self, sink: S) {
        let sink: Arc<dyn EventSink> = Arc::new(sink);
        let replaced = self.with_inner_mut(|inner| inner.sink.replace(sink));
        drop(replaced);
    }

    // Introspection

    pub fn status(&self) -> Status<K> {
        self.with_inner(|inner| inner.status.clone())
    }

    /// The current state, or the state being entered when called from a
    /// transition callback.
    pub fn current_or_next(&self) -> Key<K> {
        self.with_inner(|inner| inner.status.current_or_next())
    }

    /// The current state paired with `None`, or while transitioning the
    /// state being left paired with the state being entered.
    pub fn current_state_or_transition(&self) -> (Key<K>, Option<Key<K>>) {
        self.with_inner(|inner| match &inner.status {
            Status::Off => (Key::Off, None),
            Status::Active(key) => (Key::State(key.clone()), None),
            Status::InTransition { from, to } => (from.clone(), Some(to.clone())),
        })
    }

    pub fn is_in_transition(&self) -> bool {
        self.with_inner(|inner| inner.status.is_in_transition())
    }

    /// Keys of the registered states, Off excluded.
    pub fn state_keys(&self) -> BTreeSet<K> {
        self.with_inner(|inner| inner.states.keys().cloned().collect())
    }

    /// Number of registered states, Off excluded.
    pub fn num_states(&self) -> usize {
        self.with_inner(|inner| inner.states.len())
    }

    pub fn has_from_to(&self, from: &K, to: &K) -> bool {
        self.with_inner(|inner| inner.from_to.contains_key(&(from.clone(), to.clone())))
    }

    /// Number of queued `demand`/`force_transition` calls.
    pub fn pending_requests(&self) -> usize {
        self.with_inner(|inner| inner.pending.len())
    }

    pub fn history(&self) -> TransitionHistory<K> {
        self.with_inner(|inner| inner.history.clone())
    }

    /// Send the machine back to Off and forget its configuration.
    ///
    /// Runs the current state's exit function, then drops all states,
    /// from-to functions and queued requests and turns broadcasting off.
    /// Requests queued by that exit function are dropped too. Rejected
    /// while transitioning or filtering. Safe to call repeatedly.
    pub fn cleanup(&self) {
        let _lock = self.inner.lock();
        let current = self.with_inner(|inner| inner.ensure_requestable("cleanup"));
        match current {
            Err(error) => {
                self.report::<()>("cleanup", Err(error));
                return;
            }
            Ok(Key::State(_)) => {
                let result =
                    self.transition(Key::Off, ValueList::new(), TransitionCause::Cleanup, false);
                self.report("cleanup", result);
            }
            Ok(Key::Off) => {}
        }
        let discarded = self.with_inner_mut(|inner| {
            inner.broadcast = false;
            (
                std::mem::take(&mut inner.states),
                std::mem::take(&mut inner.from_to),
                std::mem::take(&mut inner.pending),
            )
        });
        drop(discarded);
    }
}

impl<K: StateKey> fmt::Debug for Fsm<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .field("serial", &self.serial)
            .field("status", &self.status())
            .field("states", &self.state_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, Weak};

    /// Reads the machine it belongs to when dropped.
    struct Watcher {
        fsm: Weak<Fsm<&'static str>>,
        seen: Arc<Mutex<Vec<usize>>>,
    }

    impl Drop for Watcher {
        fn drop(&mut self) {
            if let Some(fsm) = self.fsm.upgrade() {
                self.seen.lock().unwrap().push(fsm.num_states());
            }
        }
    }

    fn watcher(fsm: &Arc<Fsm<&'static str>>, seen: &Arc<Mutex<Vec<usize>>>) -> Watcher {
        Watcher {
            fsm: Arc::downgrade(fsm),
            seen: Arc::clone(seen),
        }
    }

    fn watched_state(key: &'static str, watcher: Watcher) -> State<&'static str> {
        State::new(key).on_exit(move |_| {
            let _held = &watcher;
        })
    }

    fn watched_from_to(watcher: Watcher) -> FromToFn<&'static str> {
        Arc::new(move |_: &Fsm<&'static str>, _: &ValueList| {
            let _held = &watcher;
        })
    }

    #[test]
    fn new_machine_is_off() {
        let fsm: Fsm<&str> = Fsm::new("fsm1");
        assert_eq!(fsm.status(), Status::Off);
        assert_eq!(fsm.current_or_next(), Key::Off);
        assert_eq!(fsm.current_state_or_transition(), (Key::Off, None));
        assert!(!fsm.is_in_transition());
        assert_eq!(fsm.num_states(), 0);
        assert!(!fsm.is_broadcasting());
    }

    #[test]
    fn serials_come_from_the_given_counter() {
        let counter = SerialCounter::new();
        let a: Fsm<&str> = Fsm::with_serial("a", FsmConfig::default(), &counter);
        let b: Fsm<&str> = Fsm::with_serial("b", FsmConfig::default(), &counter);
        assert_eq!(a.serial(), 1);
        assert_eq!(b.serial(), 2);
        assert_eq!(b.state_change_event(), "FSM-2-b-stateChange");
    }

    #[test]
    fn config_enables_broadcasting() {
        let config = FsmConfig {
            broadcast_state_changes: true,
            ..FsmConfig::default()
        };
        let fsm: Fsm<u8> = Fsm::with_config("x", config);
        assert!(fsm.is_broadcasting());
    }

    #[test]
    fn add_state_replaces_non_current_state() {
        let fsm = Fsm::new("fsm");
        assert!(fsm.add_state(State::new("A")));
        assert!(fsm.add_state(State::new("A").allow(["B"])));
        assert_eq!(fsm.num_states(), 1);
    }

    #[test]
    fn add_state_cannot_replace_current_state() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.force_transition("A");

        let result = fsm.try_add_state(State::new("A"));
        assert_eq!(result, Err(FsmError::RemoveCurrent("A")));
    }

    #[test]
    fn remove_state_rejects_off_current_and_unknown() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.add_state(State::new("B"));
        fsm.force_transition("A");

        assert_eq!(fsm.try_remove_state(Key::Off), Err(FsmError::RemoveOff));
        assert_eq!(fsm.try_remove_state("A"), Err(FsmError::RemoveCurrent("A")));
        assert_eq!(fsm.try_remove_state("Z"), Err(FsmError::UnknownState("Z")));
        assert_eq!(fsm.num_states(), 2);

        assert!(fsm.remove_state("B"));
        assert_eq!(fsm.state_keys().into_iter().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn removing_a_state_purges_its_from_to_functions() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.add_state(State::new("B"));
        assert!(fsm.add_from_to("A", "B", |_, _| {}));
        assert!(fsm.add_from_to("B", "A", |_, _| {}));

        fsm.remove_state("B");
        assert!(!fsm.has_from_to(&"A", &"B"));
        assert!(!fsm.has_from_to(&"B", &"A"));
    }

    #[test]
    fn replacing_a_state_keeps_its_from_to_functions() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.add_state(State::new("B"));
        fsm.add_from_to("A", "B", |_, _| {});

        fsm.add_state(State::new("B").allow(["A"]));
        assert!(fsm.has_from_to(&"A", &"B"));
    }

    #[test]
    fn from_to_requires_registered_states() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));

        let result = fsm.try_add_from_to("A", "B", Arc::new(|_: &Fsm<&str>, _: &ValueList| {}));
        assert_eq!(result, Err(FsmError::UnknownState("B")));
        assert!(!fsm.remove_from_to("A", "B"));
    }

    #[test]
    fn set_state_set_keeps_current_state() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.add_state(State::new("B"));
        fsm.add_from_to("A", "B", |_, _| {});
        fsm.force_transition("A");

        let without_a: StateSet<&str> = [State::new("B")].into_iter().collect();
        assert_eq!(
            fsm.try_set_state_set(without_a),
            Err(FsmError::CurrentStateDropped("A"))
        );

        let with_a: StateSet<&str> = [State::new("A"), State::new("C")].into_iter().collect();
        assert!(fsm.set_state_set(with_a));
        assert_eq!(fsm.num_states(), 2);
        assert!(!fsm.has_from_to(&"A", &"B"));
    }

    #[test]
    fn cleanup_is_idempotent() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.force_transition("A");
        fsm.set_broadcast_state_changes(true);

        fsm.cleanup();
        fsm.cleanup();

        assert_eq!(fsm.status(), Status::Off);
        assert_eq!(fsm.num_states(), 0);
        assert!(!fsm.is_broadcasting());
    }

    #[test]
    fn replaced_state_callbacks_may_reenter_when_dropped() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(watched_state("A", watcher(&fsm, &seen)));

        assert!(fsm.add_state(State::new("A")));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn rejected_state_is_dropped_after_the_machine_is_released() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(State::new("A"));
        fsm.force_transition("A");

        let result = fsm.try_add_state(watched_state("A", watcher(&fsm, &seen)));
        assert_eq!(result, Err(FsmError::RemoveCurrent("A")));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn removed_states_and_from_to_functions_may_reenter_when_dropped() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(State::new("A"));
        fsm.add_state(watched_state("B", watcher(&fsm, &seen)));

        fsm.try_add_from_to("A", "B", watched_from_to(watcher(&fsm, &seen))).unwrap();
        fsm.try_add_from_to("A", "B", watched_from_to(watcher(&fsm, &seen))).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![2]);

        assert!(fsm.remove_from_to("A", "B"));
        assert_eq!(*seen.lock().unwrap(), vec![2, 2]);

        fsm.try_add_from_to("B", "A", watched_from_to(watcher(&fsm, &seen))).unwrap();
        assert!(fsm.remove_state("B"));
        assert_eq!(*seen.lock().unwrap(), vec![2, 2, 1, 1]);
    }

    #[test]
    fn replaced_state_set_may_reenter_when_dropped() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(watched_state("A", watcher(&fsm, &seen)));
        fsm.add_state(State::new("B"));
        fsm.try_add_from_to("A", "B", watched_from_to(watcher(&fsm, &seen))).unwrap();

        let replacement: StateSet<&str> = [State::new("C")].into_iter().collect();
        assert!(fsm.set_state_set(replacement));
        assert_eq!(*seen.lock().unwrap(), vec![1, 1]);
    }

    #[test]
    fn replaced_event_sink_may_reenter_when_dropped() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(State::new("A"));
        let held = watcher(&fsm, &seen);
        fsm.set_event_sink(move |_: &str| {
            let _held = &held;
        });

        fsm.set_event_sink(|_: &str| {});
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn cleanup_drops_callbacks_after_the_machine_is_released() {
        let fsm = Arc::new(Fsm::new("fsm"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        fsm.add_state(watched_state("A", watcher(&fsm, &seen)));
        fsm.add_state(State::new("B"));
        fsm.try_add_from_to("B", "A", watched_from_to(watcher(&fsm, &seen))).unwrap();
        fsm.force_transition("A");

        fsm.cleanup();
        assert_eq!(fsm.status(), Status::Off);
        assert_eq!(*seen.lock().unwrap(), vec![0, 0]);
    }

    #[test]
    fn lock_allows_nested_calls_from_the_holder() {
        let fsm = Fsm::new("fsm");
        let _lock = fsm.lock();
        fsm.add_state(State::new("A"));
        assert_eq!(fsm.request("A"), Some(Key::State("A")));
    }

    #[test]
    fn debug_shows_position() {
        let fsm: Fsm<&str> = Fsm::new("door");
        let debug = format!("{fsm:?}");
        assert!(debug.contains("door"));
        assert!(debug.contains("Off"));
    }
}
