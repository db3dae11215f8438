//! `mathlens-config` — environment-driven runtime configuration.
//!
//! The service is stateless and deployed to hosts where the environment is
//! the only configuration surface, so there is no config file: everything is
//! read once at startup via [`MathLensConfig::from_env`]. Missing model
//! credentials are deliberately not fatal here — they surface per request as
//! a `missing_api_key` error so a half-configured deploy still boots and
//! reports health.

pub mod schema;

pub use schema::{ExplainConfig, MathLensConfig, VisionConfig};
