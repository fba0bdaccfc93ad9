//! Ely FSM: a generic, re-entrant, thread-safe finite state machine
//!
//! A machine is parametrized over its state key type and starts in the
//! implicit `Off` state. Each registered state may carry enter, exit and
//! filter callbacks plus an allow-list; ordered pairs of states may carry a
//! from-to function replacing exit + enter for that transition.
//!
//! # Core Concepts
//!
//! - **Requests**: `request` asks the current state's filter where to go;
//!   the filter may accept, redirect or deny
//! - **Demands**: like requests, but queued when made mid-transition and
//!   serviced one per completed transition
//! - **Forced transitions**: bypass filters, queued the same way
//! - **Reentrancy**: callbacks receive the machine and may call back into it
//!   from the same thread; other threads wait on the machine's lock
//!
//! # Example
//!
//! ```rust
//! use ely_fsm::core::{Key, ValueList};
//! use ely_fsm::machine::{Fsm, State};
//!
//! let fsm = Fsm::new("avatar");
//! fsm.add_state(State::new("Idle").allow(["Walk"]));
//! fsm.add_state(State::new("Walk").on_enter(|fsm, data| {
//!     if data.get::<f32>(0).is_some_and(|speed| *speed > 5.0) {
//!         fsm.demand("Run");
//!     }
//! }));
//! fsm.add_state(State::new("Run"));
//!
//! fsm.request("Idle");
//! assert_eq!(fsm.request("Run"), None);
//!
//! let speed = ValueList::new().with(7.5f32);
//! assert_eq!(fsm.request_with("Walk", speed), Some(Key::State("Run")));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder};
pub use checkpoint::{CheckpointError, Snapshot};
pub use config::FsmConfig;
pub use core::{Key, Null, Status, ValueList};
pub use machine::{EventSink, Fsm, FsmError, State};
