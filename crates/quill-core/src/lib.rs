//! Quill Core — shared error types.
//!
//! This crate provides the foundational types used across all Quill crates.
//! It has no internal Quill dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
