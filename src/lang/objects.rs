use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

/// Return the first present value
pub fn default_if_none<T, I>(values: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    values.into_iter().flatten().next()
}

/// Equal when both are absent or both present and equal
pub fn equals_ignore_null<T: PartialEq + ?Sized>(left: Option<&T>, right: Option<&T>) -> bool {
    left == right
}

/// Equal only when `left` is present and equals `right`
pub fn null_safe_equals<T: PartialEq + ?Sized>(left: Option<&T>, right: Option<&T>) -> bool {
    matches!((left, right), (Some(left), Some(right)) if left == right)
}

/// 0 for `None`, otherwise a hash of the value
pub fn hash_code<T: Hash + ?Sized>(value: Option<&T>) -> u64 {
    value.map_or(0, |value| {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    })
}

pub fn to_string<T: Display + ?Sized>(value: Option<&T>) -> Option<String> {
    value.map(|value| value.to_string())
}
