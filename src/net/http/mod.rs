//! HTTP vocabulary used to describe hypermedia links

pub mod link;
pub mod link_index;
pub mod method;

pub use link::Link;
pub use link_index::LinkIndex;
pub use method::HttpMethod;
