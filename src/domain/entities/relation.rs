//! User relations: favorites, shopping cart and subscriptions.
//!
//! All three are (owner, target) pairs with a uniqueness constraint on the
//! pair, so they share one repository contract. The [`RelationKind`] selects
//! the table and therefore the identity of the relation.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// The relation a repository instance manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// user -> recipe bookmark (`favorites`)
    Favorite,
    /// user -> recipe shopping intent (`shopping_cart`)
    ShoppingCart,
    /// follower -> author (`subscriptions`)
    Subscription,
}

impl RelationKind {
    /// Backing table.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Favorite => "favorites",
            Self::ShoppingCart => "shopping_cart",
            Self::Subscription => "subscriptions",
        }
    }

    /// Column holding the owning user.
    pub fn owner_column(&self) -> &'static str {
        "user_id"
    }

    /// Column holding the target (recipe or author).
    pub fn target_column(&self) -> &'static str {
        match self {
            Self::Favorite | Self::ShoppingCart => "recipe_id",
            Self::Subscription => "author_id",
        }
    }

    /// Human readable name used in error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Favorite => "favorites",
            Self::ShoppingCart => "shopping cart",
            Self::Subscription => "subscriptions",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Repository trait shared by every (owner, target) relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// The relation this repository manages.
    fn kind(&self) -> RelationKind;

    /// Create the pair. Fails with `AlreadyExists` if it is already present.
    async fn add(&self, owner_id: i64, target_id: i64) -> Result<(), AppError>;

    /// Delete the pair. Fails with `NotFound` if it is absent.
    async fn remove(&self, owner_id: i64, target_id: i64) -> Result<(), AppError>;

    /// Check whether the pair exists.
    async fn exists(&self, owner_id: i64, target_id: i64) -> Result<bool, AppError>;

    /// Subset of `target_ids` related to `owner_id`.
    async fn filter_existing(&self, owner_id: i64, target_ids: &[i64]) -> Result<Vec<i64>, AppError>;
}
