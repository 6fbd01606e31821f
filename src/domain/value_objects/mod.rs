//! # Value Objects
//!
//! Immutable value types shared by repositories and services.

mod pagination;

pub use pagination::{Page, PageRequest};
