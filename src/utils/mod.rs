//! Utilities

pub mod config_store;
pub mod logging;
