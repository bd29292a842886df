//! Core library for the procurement tender platform's bid evaluation service.
//!
//! The `workflows::tender::bids` module carries the domain model, the scoring
//! and staging rules, and the service facade that the HTTP layer exposes.
//! Configuration, telemetry, and application-level errors live alongside it so
//! binaries only need to wire ports and serve.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
