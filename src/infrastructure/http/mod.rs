//! Outbound HTTP integrations.

pub mod http_probe;

pub use http_probe::HttpProbe;
