//! Transition requests and the transition engine.
//!
//! `request` filters, `force_transition` does not, `demand` filters but
//! defers itself when the machine is busy. All of them end up in
//! `transition`, the only place that moves the machine between states.

use super::error::FsmError;
use super::fsm::{Fsm, Inner};
use super::state::{EnterFn, ExitFn, FilterFn, FromToFn};
use crate::core::{Key, StateKey, Status, TransitionCause, ValueList};

/// A `demand` or `force_transition` made while the machine was
/// transitioning, replayed once the transition is committed.
pub(crate) enum Deferred<K> {
    Demand(Key<K>, ValueList),
    Force(Key<K>, ValueList),
}

/// Filter that decides a request from the current state.
enum ActiveFilter<K: StateKey> {
    /// From Off every destination is accepted.
    Off,
    Default,
    Custom(FilterFn<K>),
}

/// Callbacks a transition runs, looked up before any of them is called.
enum Plan<K: StateKey> {
    FromTo(FromToFn<K>),
    ExitEnter {
        exit: Option<ExitFn<K>>,
        enter: Option<EnterFn<K>>,
    },
}

impl<K: StateKey> Inner<K> {
    fn active_filter(&self) -> ActiveFilter<K> {
        match &self.status {
            Status::Active(key) => match self.states.get(key).and_then(|s| s.filter.clone()) {
                Some(filter) => ActiveFilter::Custom(filter),
                None => ActiveFilter::Default,
            },
            _ => ActiveFilter::Off,
        }
    }

    fn plan(&self, from: &Key<K>, to: &Key<K>) -> Plan<K> {
        if let (Key::State(from), Key::State(to)) = (from, to) {
            if let Some(from_to) = self.from_to.get(&(from.clone(), to.clone())) {
                return Plan::FromTo(from_to.clone());
            }
        }
        Plan::ExitEnter {
            exit: from
                .state()
                .and_then(|key| self.states.get(key))
                .and_then(|state| state.on_exit.clone()),
            enter: to
                .state()
                .and_then(|key| self.states.get(key))
                .and_then(|state| state.on_enter.clone()),
        }
    }
}

impl<K: StateKey> Fsm<K> {
    /// Request a transition to `to`, subject to the current filter.
    ///
    /// Returns the state the machine is in afterwards, or `None` if the
    /// request was denied, malformed, made at the wrong time (during a
    /// transition or from a filter) or named an unknown state. A queued
    /// `demand`/`force_transition` serviced right after the transition may
    /// already have moved the machine on.
    pub fn request(&self, to: impl Into<Key<K>>) -> Option<Key<K>> {
        self.request_with(to, ValueList::new())
    }

    /// [`Fsm::request`] with context arguments for the filter and the
    /// transition callbacks.
    pub fn request_with(&self, to: impl Into<Key<K>>, data: ValueList) -> Option<Key<K>> {
        let result = self.try_request_with(to, data);
        self.report("request", result)
    }

    pub fn try_request(&self, to: impl Into<Key<K>>) -> Result<Key<K>, FsmError<K>> {
        self.try_request_with(to, ValueList::new())
    }

    pub fn try_request_with(
        &self,
        to: impl Into<Key<K>>,
        data: ValueList,
    ) -> Result<Key<K>, FsmError<K>> {
        let to = to.into();
        let _lock = self.inner.lock();
        let (from, filter) = self.with_inner_mut(|inner| {
            let from = inner.ensure_requestable("request")?;
            inner.filtering = true;
            Ok::<_, FsmError<K>>((from, inner.active_filter()))
        })?;

        let answer = match filter {
            ActiveFilter::Off => ValueList::accept(to.clone(), &data),
            ActiveFilter::Default => self.default_filter(&to, &data),
            ActiveFilter::Custom(filter) => filter(self, &to, &data),
        };
        self.with_inner_mut(|inner| inner.filtering = false);

        match answer.into_verdict::<K>() {
            Ok((Some(accepted), args)) => self.set_state(accepted, args, TransitionCause::Request),
            Ok((None, _)) => Err(FsmError::Denied {
                from,
                requested: to,
            }),
            Err(_) => Err(FsmError::MalformedFilterResult { state: from }),
        }
    }

    /// The filter used by states without one of their own.
    ///
    /// Off is always accepted. Otherwise an empty allow-list accepts any
    /// destination and a non-empty one accepts only its members. Custom
    /// filters may delegate here.
    pub fn default_filter(&self, to: &Key<K>, data: &ValueList) -> ValueList {
        if to.is_off() {
            return ValueList::accept(to.clone(), data);
        }
        let accepted = self.with_inner(|inner| {
            let Key::State(current) = inner.status.current_or_next() else {
                return true;
            };
            inner.states.get(&current).map_or(true, |state| {
                state.allowed().is_empty()
                    || to.state().is_some_and(|to| state.allowed().contains(to))
            })
        });
        if accepted {
            ValueList::accept(to.clone(), data)
        } else {
            tracing::debug!(fsm = %self.name(), to = %to, "no allowed states");
            ValueList::deny()
        }
    }

    /// Request the state after the current one in key order, wrapping
    /// around. From Off this is the first state.
    pub fn request_next(&self) -> Option<Key<K>> {
        self.request_next_with(ValueList::new())
    }

    pub fn request_next_with(&self, data: ValueList) -> Option<Key<K>> {
        let result = self.try_request_cycled("request_next", data, true);
        self.report("request_next", result)
    }

    /// Request the state before the current one in key order, wrapping
    /// around. From Off this is the last state.
    pub fn request_prev(&self) -> Option<Key<K>> {
        self.request_prev_with(ValueList::new())
    }

    pub fn request_prev_with(&self, data: ValueList) -> Option<Key<K>> {
        let result = self.try_request_cycled("request_prev", data, false);
        self.report("request_prev", result)
    }

    fn try_request_cycled(
        &self,
        operation: &'static str,
        data: ValueList,
        forward: bool,
    ) -> Result<Key<K>, FsmError<K>> {
        let _lock = self.inner.lock();
        let target = self.with_inner(|inner| {
            let current = inner.ensure_requestable(operation)?;
            let target = if forward {
                inner.states.next_after(&current)
            } else {
                inner.states.prev_before(&current)
            };
            target.cloned().ok_or(FsmError::NoStates)
        })?;
        self.try_request_with(target, data)
    }

    /// Request a transition by code that does not expect a denial.
    ///
    /// Called during a transition (from an enter, exit or from-to function)
    /// the demand is queued and replayed after the transition commits.
    /// Denials are logged.
    pub fn demand(&self, to: impl Into<Key<K>>) {
        self.demand_with(to, ValueList::new())
    }

    pub fn demand_with(&self, to: impl Into<Key<K>>, data: ValueList) {
        let _lock = self.inner.lock();
        let to = to.into();
        if self.is_in_transition() {
            tracing::trace!(fsm = %self.name(), to = %to, "demand queued");
            self.with_inner_mut(|inner| inner.pending.push_back(Deferred::Demand(to, data)));
            return;
        }
        if let Err(error) = self.try_request_with(to, data) {
            tracing::warn!(
                fsm = %self.name(),
                serial = self.serial(),
                error = %error,
                "demand denied"
            );
        }
    }

    /// Change to `to` unconditionally, bypassing filters.
    ///
    /// Queued like [`Fsm::demand`] when called during a transition. Unknown
    /// states are logged and leave the machine where it is.
    pub fn force_transition(&self, to: impl Into<Key<K>>) {
        self.force_transition_with(to, ValueList::new())
    }

    pub fn force_transition_with(&self, to: impl Into<Key<K>>, data: ValueList) {
        let _lock = self.inner.lock();
        let to = to.into();
        if self.is_in_transition() {
            tracing::trace!(fsm = %self.name(), to = %to, "forced transition queued");
            self.with_inner_mut(|inner| inner.pending.push_back(Deferred::Force(to, data)));
            return;
        }
        let result = self.set_state(to, data, TransitionCause::Force);
        self.report("force_transition", result);
    }

    fn set_state(
        &self,
        to: Key<K>,
        data: ValueList,
        cause: TransitionCause,
    ) -> Result<Key<K>, FsmError<K>> {
        self.transition(to, data, cause, true)
    }

    /// Move from the settled state to `to`.
    ///
    /// Runs the from-to function for the pair if there is one, otherwise the
    /// exit function of the old state and the enter function of the new one.
    /// Then broadcasts, commits, and, if `dequeue` is set, replays exactly
    /// one queued request. Requests that request queues are replayed by the
    /// transitions they cause, one per commit.
    pub(crate) fn transition(
        &self,
        to: Key<K>,
        data: ValueList,
        cause: TransitionCause,
        dequeue: bool,
    ) -> Result<Key<K>, FsmError<K>> {
        let _lock = self.inner.lock();
        let (from, plan) = self.with_inner_mut(|inner| {
            if let Key::State(key) = &to {
                if !inner.states.contains(key) {
                    return Err(FsmError::UnknownState(key.clone()));
                }
            }
            let from = inner.ensure_settled("set_state")?;
            let plan = inner.plan(&from, &to);
            inner.status = Status::InTransition {
                from: from.clone(),
                to: to.clone(),
            };
            Ok((from, plan))
        })?;

        match plan {
            Plan::FromTo(from_to) => from_to(self, &data),
            Plan::ExitEnter { exit, enter } => {
                if let Some(exit) = exit {
                    exit(self);
                }
                if let Some(enter) = enter {
                    enter(self, &data);
                }
            }
        }

        if let Some(sink) = self.with_inner(|inner| inner.broadcast.then(|| inner.sink.clone())) {
            let event = self.state_change_event();
            tracing::debug!(fsm = %self.name(), event = %event, "broadcasting state change");
            if let Some(sink) = sink {
                sink.notify(&event);
            }
        }

        let next = self.with_inner_mut(|inner| {
            inner.status = Status::from(to.clone());
            let sequence = inner.history.record(from.clone(), to.clone(), cause);
            tracing::debug!(
                fsm = %self.name(),
                serial = self.serial(),
                sequence,
                from = %from,
                to = %to,
                ?cause,
                "transition committed"
            );
            if dequeue {
                inner.pending.pop_front()
            } else {
                None
            }
        });

        match next {
            Some(Deferred::Demand(to, data)) => self.demand_with(to, data),
            Some(Deferred::Force(to, data)) => self.force_transition_with(to, data),
            None => {}
        }

        Ok(self.current_or_next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::State;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn logging_state(key: &'static str, log: &Log) -> State<&'static str> {
        let enter_log = Arc::clone(log);
        let exit_log = Arc::clone(log);
        State::new(key)
            .on_enter(move |_, _| enter_log.lock().unwrap().push(format!("enter {key}")))
            .on_exit(move |_| exit_log.lock().unwrap().push(format!("exit {key}")))
    }

    #[test]
    fn request_from_off_accepts_any_registered_state() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").allow(["B"]));
        fsm.add_state(State::new("C"));

        assert_eq!(fsm.request("C"), Some(Key::State("C")));
    }

    #[test]
    fn request_to_unknown_state_leaves_machine_unchanged() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A"));
        fsm.request("A");

        assert_eq!(fsm.try_request("Z"), Err(FsmError::UnknownState("Z")));
        assert_eq!(fsm.status(), Status::Active("A"));
    }

    #[test]
    fn off_is_always_allowed() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").allow(["B"]));
        fsm.add_state(State::new("B"));
        fsm.request("A");

        assert_eq!(fsm.request(Key::Off), Some(Key::Off));
    }

    #[test]
    fn exit_runs_before_enter() {
        let log: Log = Arc::default();
        let fsm = Fsm::new("fsm");
        fsm.add_state(logging_state("A", &log));
        fsm.add_state(logging_state("B", &log));

        fsm.request("A");
        fsm.request("B");

        assert_eq!(*log.lock().unwrap(), vec!["enter A", "exit A", "enter B"]);
    }

    #[test]
    fn transition_to_same_state_exits_and_reenters() {
        let log: Log = Arc::default();
        let fsm = Fsm::new("fsm");
        fsm.add_state(logging_state("A", &log));

        fsm.request("A");
        fsm.request("A");

        assert_eq!(*log.lock().unwrap(), vec!["enter A", "exit A", "enter A"]);
    }

    #[test]
    fn custom_filter_can_redirect() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("Idle").filter(|_, to, data| {
            if to == &Key::State("Run") {
                ValueList::accept(Key::State("Walk"), data)
            } else {
                ValueList::accept(to.clone(), data)
            }
        }));
        fsm.add_state(State::new("Walk"));
        fsm.add_state(State::new("Run"));

        fsm.request("Idle");
        assert_eq!(fsm.request("Run"), Some(Key::State("Walk")));
    }

    #[test]
    fn custom_filter_can_delegate_to_default() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(
            State::new("A")
                .allow(["B"])
                .filter(|fsm, to, data| fsm.default_filter(to, data)),
        );
        fsm.add_state(State::new("B"));
        fsm.add_state(State::new("C"));

        fsm.request("A");
        assert_eq!(fsm.request("C"), None);
        assert_eq!(fsm.request("B"), Some(Key::State("B")));
    }

    #[test]
    fn filter_answer_arguments_reach_enter() {
        let seen = Arc::new(Mutex::new(None));
        let seen_in_enter = Arc::clone(&seen);
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").filter(|_, to, _| {
            ValueList::accept(to.clone(), &ValueList::new().with(99u32))
        }));
        fsm.add_state(State::new("B").on_enter(move |_, data| {
            *seen_in_enter.lock().unwrap() = data.get::<u32>(0).copied();
        }));

        fsm.request("A");
        fsm.request_with("B", ValueList::new().with(1u32));

        assert_eq!(*seen.lock().unwrap(), Some(99));
    }

    #[test]
    fn request_inside_filter_is_rejected() {
        let inner_result = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&inner_result);
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").filter(move |fsm, to, data| {
            *captured.lock().unwrap() = Some(fsm.try_request("B"));
            ValueList::accept(to.clone(), data)
        }));
        fsm.add_state(State::new("B"));

        fsm.request("A");
        assert_eq!(fsm.request("B"), Some(Key::State("B")));

        let inner = inner_result.lock().unwrap().clone().unwrap();
        assert!(matches!(inner, Err(FsmError::InFilter { operation: "request", .. })));
    }

    #[test]
    fn request_inside_enter_is_rejected() {
        let inner_result = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&inner_result);
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").on_enter(move |fsm, _| {
            *captured.lock().unwrap() = Some(fsm.request_next());
        }));
        fsm.add_state(State::new("B"));

        assert_eq!(fsm.request("A"), Some(Key::State("A")));
        assert_eq!(*inner_result.lock().unwrap(), Some(None));
    }

    #[test]
    fn transition_is_visible_from_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").on_enter(move |fsm, _| {
            captured.lock().unwrap().push((
                fsm.is_in_transition(),
                fsm.current_or_next(),
                fsm.current_state_or_transition(),
            ));
        }));

        fsm.request("A");

        let seen = seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            [(true, Key::State("A"), (Key::Off, Some(Key::State("A"))))]
        );
    }

    #[test]
    fn construction_is_rejected_during_transition() {
        let result = Arc::new(Mutex::new(None));
        let captured = Arc::clone(&result);
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").on_enter(move |fsm, _| {
            *captured.lock().unwrap() = Some(fsm.try_add_state(State::new("X")));
        }));

        fsm.request("A");

        let result = result.lock().unwrap().clone().unwrap();
        assert!(matches!(result, Err(FsmError::InTransition { operation: "add_state", .. })));
        assert_eq!(fsm.num_states(), 1);
    }

    #[test]
    fn queued_requests_run_one_per_transition_in_order() {
        let log: Log = Arc::default();
        let fsm = Fsm::new("fsm");
        fsm.add_state(logging_state("A", &log).on_enter({
            let log = Arc::clone(&log);
            move |fsm, _| {
                log.lock().unwrap().push("enter A".to_string());
                fsm.demand("B");
                fsm.force_transition("C");
                log.lock().unwrap().push(format!("pending {}", fsm.pending_requests()));
            }
        }));
        fsm.add_state(logging_state("B", &log));
        fsm.add_state(logging_state("C", &log));

        assert_eq!(fsm.request("A"), Some(Key::State("C")));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter A", "pending 2", "exit A", "enter B", "exit B", "enter C"]
        );
        assert_eq!(fsm.pending_requests(), 0);

        let path: Vec<Key<&str>> = fsm.history().get_path().into_iter().cloned().collect();
        assert_eq!(
            path,
            vec![Key::Off, Key::State("A"), Key::State("B"), Key::State("C")]
        );
    }

    #[test]
    fn force_transition_bypasses_filter() {
        let fsm = Fsm::new("fsm");
        fsm.add_state(State::new("A").filter(|_, _, _| ValueList::deny()));
        fsm.add_state(State::new("B"));
        fsm.request("A");

        assert_eq!(fsm.request("B"), None);
        fsm.force_transition("B");
        assert_eq!(fsm.status(), Status::Active("B"));
        assert_eq!(
            fsm.history().last().map(|r| r.cause),
            Some(TransitionCause::Force)
        );
    }
}
