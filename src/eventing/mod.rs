//! Eventing - Inbound Device Events

pub mod device_event;

pub use device_event::DeviceEvent;
