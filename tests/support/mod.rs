//! Shared test utilities.

pub mod review_server;
pub mod runtime;
