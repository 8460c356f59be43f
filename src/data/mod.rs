//! Lightweight data rendering helpers

pub mod json;

pub use json::to_simple_json;
