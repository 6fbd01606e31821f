//! Tag entity and repository trait.
//!
//! Maps to the `tags` table.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A categorical label attached to recipes.
///
/// Maps to the `tags` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(200) NOT NULL UNIQUE
/// - color: VARCHAR(7) NOT NULL UNIQUE (`#RRGGBB`)
/// - slug: VARCHAR(200) NOT NULL UNIQUE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Catalog record as it appears in the bulk-load file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl NewTag {
    /// `#RRGGBB` hex color.
    pub fn has_valid_color(&self) -> bool {
        let bytes = self.color.as_bytes();
        bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
    }
}

/// Repository trait for Tag data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// List all tags ordered by name.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    /// Find a tag by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Fetch several tags at once; missing IDs are skipped.
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError>;

    /// Insert catalog tags whose name, color and slug are all unused.
    ///
    /// Returns the number of inserted rows.
    async fn insert_missing(&self, tags: &[NewTag]) -> Result<u64, AppError>;
}
