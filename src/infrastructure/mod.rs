//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementations
//! - [`http`] - Outbound HTTP reachability probe

pub mod http;
pub mod persistence;
