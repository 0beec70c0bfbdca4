pub mod adapters;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod legacy;
pub mod marker;
pub mod migrations;
pub mod paths;
pub mod probe;
pub mod profile;
pub mod project;
pub mod reconcile;
pub mod tools;
pub mod types;

pub use error::{Result, SpecwrightError};

/// Version stamped into every generated artifact.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
