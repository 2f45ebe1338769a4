//! HTTP layer of the PersonalWebSite auth core
//!
//! Exposes the auth service endpoints (`/refresh` with rotation, `/logout`),
//! the gateway's refresh-on-expiry middleware and the plain JWT middleware.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
