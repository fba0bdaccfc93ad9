//! Builder API for ergonomic machine construction.
//!
//! [`FsmBuilder`] validates a complete machine description before creating
//! the machine, accumulating every problem with stillwater's `Validation`
//! instead of stopping at the first. The [`state_keys!`](crate::state_keys)
//! and [`values!`](crate::values) macros cut the boilerplate of defining
//! key enums and context lists.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::FsmBuilder;
