//! Shared types and models for the Fashion Advisor client
//!
//! This crate contains the transport-agnostic pieces shared between the
//! native client and the browser build (via WASM): the upload request, the
//! analysis result and its formatting rules, the UI state machine and its
//! projection onto the screen.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
