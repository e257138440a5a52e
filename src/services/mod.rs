//! Service Layer
//!
//! Relays device commands to the light control service and reports outcomes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   DeviceEvent   ┌──────────────┐   POST JSON   ┌────────────────┐
//! │ Event source │ ──────────────► │ CommandRelay │ ────────────► │ Control service│
//! │ (stdin)      │                 │              │ ◄──────────── │                │
//! └──────────────┘                 └──────────────┘   reply       └────────────────┘
//!                                         │
//!                                         ▼ RelayEvent + tracing
//! ```

mod events;
mod relay;
mod runtime;
mod source;
mod transport;

pub use events::*;
pub use relay::*;
pub use runtime::*;
pub use source::*;
pub use transport::*;
