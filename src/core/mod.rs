//! Core value types of the state machine.
//!
//! This module contains the plain data a machine is made of:
//! - State keys and the reserved `Off`/`Null` markers
//! - The machine `Status`
//! - Context argument lists
//! - Committed transition history
//!
//! Nothing in here locks or runs callbacks; that is the job of
//! [`crate::machine`].

mod history;
mod key;
mod status;
mod value;

pub use history::{TransitionCause, TransitionHistory, TransitionRecord};
pub use key::{Key, Null, StateKey};
pub use status::Status;
pub use value::{Value, ValueList};
