//! Core types and service wiring for resolving Amsterdam waste passes by postal code.

/// Domain models: postal codes, districts, and resolved passes.
pub mod model;
/// Error types and the table source trait.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;
/// Table sources backed by files and HTTP endpoints.
pub mod sources;
/// Validated lookup tables and range matching.
pub mod tables;

pub use model::*;
pub use ports::*;
pub use service::*;
pub use sources::*;
pub use tables::*;
