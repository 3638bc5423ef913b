pub mod backup;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fetch;
pub mod install;
pub mod io;
pub mod paths;
pub mod plan;
pub mod remote;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, SimoneError};
