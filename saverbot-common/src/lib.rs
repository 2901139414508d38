//! Shared infrastructure for the saverbot workspace.
//!
//! Currently this is just the [`observability`] module: a single place to
//! initialise `tracing` so the binary and the integration tests write into
//! the same rolling file sink. The crate is intentionally lightweight so
//! every other member can depend on it without heavy transitive costs.

pub mod observability;
