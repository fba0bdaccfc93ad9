//! Context arguments passed through requests into callbacks.

use super::key::{Key, Null, StateKey};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// A single opaque context value.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Ordered, heterogeneous list of context values.
///
/// Values given to `request_with`, `demand_with` and `force_transition_with`
/// reach the filter, enter and from-to callbacks. Filters also answer with a
/// `ValueList`: its first element names the accepted destination (a `Key<K>`
/// or a bare `K`) or is [`Null`] to deny; the remaining elements become the
/// arguments of the transition.
///
/// Cloning is cheap: values are reference counted.
///
/// # Example
///
/// ```rust
/// use ely_fsm::core::ValueList;
///
/// let mut data = ValueList::new();
/// data.push_back(3.5f32);
/// data.push_back("door");
///
/// assert_eq!(data.get::<f32>(0), Some(&3.5));
/// assert_eq!(data.get::<&str>(1), Some(&"door"));
/// assert_eq!(data.get::<u8>(1), None);
/// ```
#[derive(Clone, Default)]
pub struct ValueList {
    values: VecDeque<Value>,
}

impl ValueList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter answer accepting `to`, carrying `data` on to the transition.
    pub fn accept<K: StateKey>(to: Key<K>, data: &ValueList) -> Self {
        let mut answer = data.clone();
        answer.push_front(to);
        answer
    }

    /// Filter answer denying the request.
    pub fn deny() -> Self {
        let mut answer = Self::new();
        answer.push_front(Null);
        answer
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push_back<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push_back(Arc::new(value));
    }

    pub fn push_front<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push_front(Arc::new(value));
    }

    /// Append a value, builder style.
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push_back(value);
        self
    }

    pub fn pop_front(&mut self) -> Option<Value> {
        self.values.pop_front()
    }

    pub fn front(&self) -> Option<&Value> {
        self.values.front()
    }

    /// Typed access to the value at `index`.
    ///
    /// Returns `None` if the index is out of range or the value has another
    /// type.
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values
            .get(index)
            .and_then(|value| (**value).downcast_ref::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Split a filter answer into its destination and remaining arguments.
    ///
    /// `Ok(Some(key))` accepts, `Ok(None)` denies, `Err` hands back the
    /// malformed answer untouched.
    pub(crate) fn into_verdict<K: StateKey>(mut self) -> Result<(Option<Key<K>>, Self), Self> {
        let Some(first) = self.values.front() else {
            return Err(self);
        };

        let verdict = if let Some(key) = (**first).downcast_ref::<Key<K>>() {
            Some(key.clone())
        } else if let Some(key) = (**first).downcast_ref::<K>() {
            Some(Key::State(key.clone()))
        } else if (**first).is::<Null>() {
            None
        } else {
            return Err(self);
        };

        self.values.pop_front();
        Ok((verdict, self))
    }
}

impl fmt::Debug for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueList")
            .field("len", &self.values.len())
            .finish()
    }
}

impl<T: Any + Send + Sync> FromIterator<T> for ValueList {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.push_back(value);
        }
        list
    }
}
