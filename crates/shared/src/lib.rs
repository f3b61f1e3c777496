//! Shared types, errors, and configuration for TIA.
//!
//! This crate provides common types used across all other crates:
//! - Currency types and the money rounding rule
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
