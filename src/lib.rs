//! # linkwatch
//!
//! A URL shortener with non-blocking click analytics and link availability
//! monitoring, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, the click pipeline
//! - **Application Layer** ([`application`]) - Link service and availability monitor
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite repositories and the HTTP probe
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Features
//!
//! - Random 62-symbol short codes with bounded collision retries
//! - Redirects that never wait on click persistence; clicks are dropped under overload
//! - Periodic reachability sweeps with transition notifications
//!
//! ## Quick Start
//!
//! ```bash
//! # Apply the schema (also done on server start)
//! cargo run --bin admin -- migrate
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AvailabilityMonitor, LinkService, LinkStats};
    pub use crate::domain::click_event::ClickEvent;
    pub use crate::domain::click_pipeline::{ClickPipeline, spawn_click_workers};
    pub use crate::domain::entities::{Click, Link, NewLink};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
