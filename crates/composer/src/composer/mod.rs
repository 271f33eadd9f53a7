//! The composer engine proper

pub mod browse;
pub mod cache;
pub mod draft;
pub mod orchestrator;
pub mod schema;
pub mod session;
pub mod steps;
