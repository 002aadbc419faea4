//! HTTP API for the task tracker.
//!
//! Routes live under `/api/tasks`; every response uses the
//! `{ success, message?, data? }` envelope from [`response::ApiResponse`].

pub mod handlers;
pub mod response;
mod server;

pub use response::ApiResponse;
pub use server::{ApiState, ServerHandle, build_router, start_server};
