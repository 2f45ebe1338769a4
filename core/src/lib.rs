//! # PersonalWebSite Core
//!
//! Token core shared by the gateway and the auth service.
//! This crate contains the token entities, the revocation store and refresh
//! exchange interfaces, the token manager service, and the error types the
//! HTTP layer maps to responses.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
