//! Switch Relay Library
//!
//! Forwards switch commands from a wearable's button presses to the local
//! light control service as JSON POST requests and logs the outcome.

pub mod constants;
pub mod domain;
pub mod error;
pub mod eventing;
pub mod helpers;
pub mod services;
pub mod utils;
