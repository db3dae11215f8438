//! MathLens Gateway HTTP API Server
//!
//! The long-running hosting adapter: an axum router exposing the solve and
//! health endpoints, with every failure rendered as `{ "error": <tag> }`.

pub mod health_api;
pub mod server;
pub mod solve_api;

pub use server::{GatewayState, build_router, start_server};
