//! Domain - Pure Data Structures and Protocol Types
//!
//! Commands, envelopes, service replies and configuration. Nothing here
//! performs I/O.

pub mod command;
pub mod config;
pub mod response;
