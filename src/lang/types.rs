//! Runtime type inspection over `std::any`

use std::any::{Any, TypeId};

pub fn type_name_of<T: ?Sized>(_value: &T) -> &'static str {
    std::any::type_name::<T>()
}

/// Type name without module path or generic arguments
pub fn simple_type_name_of<T: ?Sized>(value: &T) -> &'static str {
    simple_name(type_name_of(value))
}

pub fn simple_name(type_name: &str) -> &str {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit("::").next().unwrap_or(base)
}

pub fn is_instance_of<T: Any>(value: Option<&dyn Any>) -> bool {
    value.is_some_and(|value| value.is::<T>())
}

/// True when `value` is none of `types`; vacuously true for no types
pub fn is_not_instance_of(value: Option<&dyn Any>, types: &[TypeId]) -> bool {
    match value {
        Some(value) => !types.contains(&value.type_id()),
        None => true,
    }
}
