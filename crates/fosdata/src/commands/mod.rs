//! Command handlers, one module per top-level command.

pub mod config_cmd;
pub mod kinds;
pub mod read;
pub mod schema;
