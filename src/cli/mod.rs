//! CLI operation handlers.
//!
//! - [`browse`]: Load an upload's file list and render the viewer page
//!
//! Output writing utilities are in [`output`].

pub mod browse;
pub mod output;
