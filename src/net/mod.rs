//! Networking helpers, HTTP link types and the sample client/server programs

pub mod client_server;
pub mod http;
pub mod network;
pub mod sample;
pub mod sockets;
pub mod uri;

pub use client_server::{ClientRequestHandler, ServerHandle, start_server};
