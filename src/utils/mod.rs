//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Long URL validation
//! - [`client_addr`] - Client address extraction from HTTP requests

pub mod client_addr;
pub mod code_generator;
pub mod url_validator;
