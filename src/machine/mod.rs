//! The state machine.
//!
//! [`Fsm`] owns a set of [`State`]s and moves between them through the
//! filtered [`Fsm::request`] family, the queued [`Fsm::demand`] and the
//! unfiltered [`Fsm::force_transition`]. Each machine is protected by a
//! reentrant lock, so it can be shared across threads and called back
//! from its own callbacks.

mod error;
mod events;
mod fsm;
mod state;
mod transition;

pub use error::FsmError;
pub use events::{state_change_event, EventSink, SerialCounter};
pub use fsm::{Fsm, FsmLock};
pub use state::{EnterFn, ExitFn, FilterFn, FromToFn, State, StateSet};
