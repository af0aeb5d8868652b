//! Domain layer containing business entities and contracts.
//!
//! Defines entities, repository interfaces and the click pipeline, independent
//! of the HTTP and SQLite layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click tracking event model
//! - [`click_pipeline`] - Bounded, lossy click queue with background workers
//! - [`availability`] - Reachability probe and transition notifier contracts
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves the short code
//! 2. A [`click_event::ClickEvent`] is submitted to [`click_pipeline::ClickPipeline`] without waiting
//! 3. One of the workers started by [`click_pipeline::spawn_click_workers`] takes the event
//! 4. The click is persisted via [`repositories::ClickRepository`]

pub mod availability;
pub mod click_event;
pub mod click_pipeline;
pub mod entities;
pub mod repositories;
