use std::cmp::Ordering;

/// Compare two optional values with `None` sorting last
pub fn compare<T: Ord + ?Sized>(left: Option<&T>, right: Option<&T>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(right),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Accumulates a lexicographic ordering across several fields.
/// The first non-equal comparison wins; later ones are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparatorAccumulator {
    result: Ordering,
}

impl Default for ComparatorAccumulator {
    fn default() -> Self {
        Self {
            result: Ordering::Equal,
        }
    }
}

impl ComparatorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn do_compare<T: Ord + ?Sized>(mut self, left: Option<&T>, right: Option<&T>) -> Self {
        if self.result == Ordering::Equal {
            self.result = compare(left, right);
        }
        self
    }

    pub fn result(&self) -> Ordering {
        self.result
    }
}
