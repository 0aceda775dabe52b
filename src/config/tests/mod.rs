//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Item, locator, and mode resolution tests
//! - `loading`: Loading from environment and CLI arguments

mod field_resolution;
