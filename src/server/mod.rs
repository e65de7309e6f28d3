//! HTTP server implementation
//!
//! This module provides the HTTP server, its middleware and routing.

pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;

#[cfg(test)]
mod tests;

pub use server::HttpServer;
pub use state::AppState;
