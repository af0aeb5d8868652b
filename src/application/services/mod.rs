//! Business logic services for the application layer.

pub mod availability_monitor;
pub mod link_service;

pub use availability_monitor::{AvailabilityMonitor, DEFAULT_SWEEP_INTERVAL, SweepReport};
pub use link_service::{LinkService, LinkStats, MAX_CODE_ATTEMPTS};
