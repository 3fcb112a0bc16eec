//! Shared types for reqsmith: error taxonomy and configuration.

pub mod config;
pub mod error;

pub use config::ReqsmithConfig;
pub use error::{Result, RqError};
