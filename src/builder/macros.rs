//! Macros for ergonomic machine construction.

/// Define an enum usable as a state key.
///
/// Derives everything [`StateKey`](crate::core::StateKey) needs plus serde
/// support, and displays each variant by its name.
///
/// # Example
///
/// ```
/// use ely_fsm::state_keys;
/// use ely_fsm::machine::{Fsm, State};
///
/// state_keys! {
///     pub enum Gait {
///         Idle,
///         Walk,
///         Run,
///     }
/// }
///
/// let fsm = Fsm::new("avatar");
/// fsm.add_state(State::new(Gait::Idle));
/// fsm.add_state(State::new(Gait::Walk));
/// assert_eq!(Gait::Walk.to_string(), "Walk");
/// ```
#[macro_export]
macro_rules! state_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => stringify!($variant)),*
                })
            }
        }
    };
}

/// Build a [`ValueList`](crate::core::ValueList) from expressions.
///
/// ```
/// use ely_fsm::values;
///
/// let data = values![1u32, "two", 3.0f64];
/// assert_eq!(data.len(), 3);
/// assert_eq!(data.get::<&str>(1), Some(&"two"));
/// ```
#[macro_export]
macro_rules! values {
    () => {
        $crate::core::ValueList::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut list = $crate::core::ValueList::new();
        $(list.push_back($value);)+
        list
    }};
}
