// Library exports for Fellowship
// This allows integration tests and external code to use Fellowship modules

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod schema;
pub mod state;
pub mod storage;
