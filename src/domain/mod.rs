//! # Domain Layer
//!
//! The domain layer contains the core business logic of the recipe service.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (User, Recipe, Ingredient, Tag, relations)
//! - **value_objects**: Immutable value types (pagination)
//! - **services**: Domain services for non-trivial transformations (shopping list)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain rules (edit permission, recipe invariants)

pub mod entities;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use services::*;
pub use value_objects::*;
