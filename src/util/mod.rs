//! Array, collection, comparison, properties and archive helpers

pub mod arrays;
pub mod collections;
pub mod comparator;
pub mod properties;
pub mod zip;

pub use comparator::ComparatorAccumulator;
pub use properties::{Properties, PropertiesBuilder, PropertiesDiff};
