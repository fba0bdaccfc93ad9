//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::FsmConfig;
use crate::core::{StateKey, ValueList};
use crate::machine::{EventSink, FromToFn, Fsm, SerialCounter, State, StateSet};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check<K> = Validation<(), NonEmptyVec<BuildError<K>>>;

/// Describes a machine up front and validates the whole description at once.
///
/// Unlike registering states one by one on a live [`Fsm`], `build` checks
/// every state and from-to function together and reports all problems.
///
/// # Example
///
/// ```rust
/// use ely_fsm::builder::FsmBuilder;
/// use ely_fsm::machine::State;
///
/// let fsm = FsmBuilder::new()
///     .name("door")
///     .state(State::new("Closed").allow(["Open"]))
///     .state(State::new("Open").allow(["Closed"]))
///     .from_to("Closed", "Open", |_fsm, _data| println!("creak"))
///     .build()
///     .ok()
///     .unwrap();
///
/// assert_eq!(fsm.num_states(), 2);
/// assert!(fsm.has_from_to(&"Closed", &"Open"));
/// ```
pub struct FsmBuilder<'a, K: StateKey> {
    name: Option<String>,
    config: FsmConfig,
    serials: &'a SerialCounter,
    states: Vec<State<K>>,
    from_to: Vec<(K, K, FromToFn<K>)>,
    sink: Option<Arc<dyn EventSink>>,
}

impl<'a, K: StateKey> FsmBuilder<'a, K> {
    pub fn new() -> Self {
        Self {
            name: None,
            config: FsmConfig::default(),
            serials: SerialCounter::global(),
            states: Vec::new(),
            from_to: Vec::new(),
            sink: None,
        }
    }

    /// Set the machine name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn config(mut self, config: FsmConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw the serial number from `serials` instead of the global counter.
    pub fn serial_from(mut self, serials: &'a SerialCounter) -> Self {
        self.serials = serials;
        self
    }

    pub fn state(mut self, state: State<K>) -> Self {
        self.states.push(state);
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = State<K>>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn from_to<F>(mut self, from: K, to: K, from_to: F) -> Self
    where
        F: Fn(&Fsm<K>, &ValueList) + Send + Sync + 'static,
    {
        let from_to: FromToFn<K> = Arc::new(from_to);
        self.from_to.push((from, to, from_to));
        self
    }

    pub fn event_sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Validate the description and create the machine, Off.
    pub fn build(self) -> Result<Fsm<K>, NonEmptyVec<BuildError<K>>> {
        match validate(self.name.as_deref(), &self.states, &self.from_to) {
            Validation::Success(()) => {}
            Validation::Failure(errors) => return Err(errors),
        }

        let name = self.name.unwrap_or_default();
        let fsm = Fsm::with_serial(name, self.config, self.serials);
        let states: StateSet<K> = self.states.into_iter().collect();
        let from_to: BTreeMap<_, _> = self
            .from_to
            .into_iter()
            .map(|(from, to, f)| ((from, to), f))
            .collect();
        fsm.with_inner_mut(|inner| {
            inner.states = states;
            inner.from_to = from_to;
            inner.sink = self.sink;
        });
        tracing::debug!(
            fsm = %fsm.name(),
            serial = fsm.serial(),
            states = fsm.num_states(),
            "machine built"
        );
        Ok(fsm)
    }
}

impl<K: StateKey> Default for FsmBuilder<'_, K> {
    fn default() -> Self {
        Self::new()
    }
}

fn validate<K: StateKey>(
    name: Option<&str>,
    states: &[State<K>],
    from_to: &[(K, K, FromToFn<K>)],
) -> Check<K> {
    let mut checks: Vec<Check<K>> = Vec::new();

    checks.push(match name {
        Some(name) if !name.is_empty() => Validation::success(()),
        _ => Validation::fail(BuildError::MissingName),
    });

    let mut defined = BTreeSet::new();
    for state in states {
        if !defined.insert(state.key().clone()) {
            checks.push(Validation::fail(BuildError::DuplicateState(state.key().clone())));
        }
    }

    for state in states {
        for destination in state.allowed() {
            if !defined.contains(destination) {
                checks.push(Validation::fail(BuildError::UnknownDestination {
                    state: state.key().clone(),
                    destination: destination.clone(),
                }));
            }
        }
    }

    let mut pairs = BTreeSet::new();
    for (from, to, _) in from_to {
        if !pairs.insert((from.clone(), to.clone())) {
            checks.push(Validation::fail(BuildError::DuplicateFromTo {
                from: from.clone(),
                to: to.clone(),
            }));
        }
        for missing in [from, to] {
            if !defined.contains(missing) {
                checks.push(Validation::fail(BuildError::UnknownFromToState {
                    from: from.clone(),
                    to: to.clone(),
                    missing: missing.clone(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}
