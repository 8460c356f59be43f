//! Small capability traits shared across the helper modules

/// Accept or reject a value
pub trait Filter<T: ?Sized> {
    fn accept(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Filter<T> for F
where
    F: Fn(&T) -> bool,
{
    fn accept(&self, value: &T) -> bool {
        self(value)
    }
}

/// Something with a natural sort key
pub trait Orderable<T: Ord> {
    fn order(&self) -> T;
}

/// Something with a mutable position in a sequence
pub trait Ordered {
    fn index(&self) -> usize;
    fn set_index(&mut self, index: usize);
}

pub trait Identifiable<T: Ord> {
    fn id(&self) -> Option<&T>;
    fn set_id(&mut self, id: T);
}

pub trait Initable {
    fn is_initialized(&self) -> bool;
    fn init(&mut self);
}

pub mod initializer {
    use super::Initable;

    /// Initialize `target` if one was given; reports whether `init` ran
    pub fn init(target: Option<&mut dyn Initable>) -> bool {
        match target {
            Some(initable) => {
                initable.init();
                true
            }
            None => false,
        }
    }
}
