//! State-change broadcasting and machine serial numbers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receiver of state-change notifications.
///
/// A machine with broadcasting enabled calls [`EventSink::notify`] once per
/// committed transition, after the transition callbacks ran and before the
/// new state is committed. The call happens with the machine's lock held by
/// the notifying thread, so a sink must not block on another thread that
/// could be waiting for the same machine.
///
/// Any `Fn(&str) + Send + Sync` closure is a sink.
pub trait EventSink: Send + Sync {
    fn notify(&self, event: &str);
}

impl<F> EventSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, event: &str) {
        self(event)
    }
}

/// Source of machine serial numbers.
///
/// Serial numbers start at 1 and strictly increase; they make state-change
/// event names unique even among machines sharing a name. Machines draw from
/// [`SerialCounter::global`] unless a counter is supplied at construction.
#[derive(Debug)]
pub struct SerialCounter {
    last: AtomicU64,
}

static GLOBAL_SERIALS: SerialCounter = SerialCounter::new();

impl SerialCounter {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// The process-wide counter.
    pub fn global() -> &'static SerialCounter {
        &GLOBAL_SERIALS
    }

    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for SerialCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the event broadcast when a machine changes state.
pub fn state_change_event(serial: u64, name: &str) -> String {
    format!("FSM-{serial}-{name}-stateChange")
}
