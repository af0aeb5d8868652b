//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Click`] - A recorded redirect
//!
//! Separate `NewLink` / `NewClick` structs carry the fields supplied on creation;
//! identifiers are assigned by the store.

pub mod click;
pub mod link;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
