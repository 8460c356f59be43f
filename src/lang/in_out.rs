use std::fmt;
use std::hash::{Hash, Hasher};

/// A mutable slot passed into a function to carry a value back out
#[derive(Debug, Clone, Default)]
pub struct InOutParameter<T> {
    value: Option<T>,
}

impl<T> InOutParameter<T> {
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }

    pub fn empty() -> Self {
        Self { value: None }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}

impl<T: PartialEq> PartialEq for InOutParameter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for InOutParameter<T> {}

impl<T: PartialEq> PartialEq<T> for InOutParameter<T> {
    fn eq(&self, other: &T) -> bool {
        self.value.as_ref() == Some(other)
    }
}

impl<T: Hash> Hash for InOutParameter<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.value {
            Some(value) => value.hash(state),
            None => 0_u8.hash(state),
        }
    }
}

impl<T: fmt::Display> fmt::Display for InOutParameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "null"),
        }
    }
}
