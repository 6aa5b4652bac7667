//! Core interfaces implemented by the host

pub mod host;

pub use host::Host;
