//! # Domain Services
//!
//! Stateless domain logic that does not belong to a single entity.
//!
//! - **shopping_list**: consolidation of cart ingredient lines into an
//!   exportable quantity list

pub mod shopping_list;

pub use shopping_list::{IngredientLine, ShoppingList, ShoppingListItem};
