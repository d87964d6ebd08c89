pub mod fixtures;
pub mod setup;

// Re-export main utilities for use by test files
pub use fixtures::*;
pub use setup::{TestSetup, TestSetupBuilder};
