//! Sample echo and message servers for exercising TCP connectivity by hand

pub mod echo;
pub mod message;

pub use echo::{EchoClient, EchoHandler, run_echo_client};
pub use message::{MessageHandler, send_message};
