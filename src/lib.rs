//! Bookshelf application library.
//!
//! Pulls the application modules together for the binary and for the
//! integration tests, which build the real router out of these parts.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
