//! Repository trait definitions for the domain layer.
//!
//! These traits are the narrow contract the core holds with the backing store.
//! Concrete implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link creation and lookup
//! - [`ClickRepository`] - Click recording and counting

pub mod click_repository;
pub mod link_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
