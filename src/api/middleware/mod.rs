pub mod auth;
pub mod metrics;
pub mod size_limits;
pub mod validation;
