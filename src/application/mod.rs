//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and background work, and
//! give HTTP handlers and the admin CLI a single entry point.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup and stats
//! - [`services::availability_monitor::AvailabilityMonitor`] - Periodic reachability sweeps

pub mod services;
