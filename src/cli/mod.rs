//! Command-line layer: argument types, dispatch and handlers

pub mod command_handlers;
pub mod dispatcher;
pub mod main_types;
