//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod catalog;
pub mod health;
pub mod recipe;
pub mod shopping;
pub mod user;
