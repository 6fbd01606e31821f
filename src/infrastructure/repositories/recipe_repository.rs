//! Recipe Repository Implementation
//!
//! PostgreSQL implementation of the RecipeRepository trait. A recipe spans
//! three tables (`recipes`, `recipe_tags`, `recipe_ingredients`); writes touch
//! all of them inside one transaction and reads batch-load the link tables
//! for every recipe on the page.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::domain::{
    IngredientLine, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient,
    RecipeRepository, RecipeSummary, Tag,
};
use crate::shared::error::AppError;

/// Database row representation matching the recipes table schema.
#[derive(Debug, sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    author_id: i64,
    name: String,
    image: String,
    text: String,
    cooking_time: i32,
    created_at: DateTime<Utc>,
}

impl RecipeRow {
    /// Convert database row to domain Recipe entity.
    /// Note: tags and ingredients are loaded separately.
    fn into_recipe(self, tags: Vec<Tag>, ingredients: Vec<RecipeIngredient>) -> Recipe {
        Recipe {
            id: self.id,
            author_id: self.author_id,
            name: self.name,
            image: self.image,
            text: self.text,
            cooking_time: self.cooking_time,
            created_at: self.created_at,
            tags,
            ingredients,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    id: i64,
    name: String,
    color: String,
    slug: String,
}

#[derive(Debug, sqlx::FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    ingredient_id: i64,
    name: String,
    measurement_unit: String,
    amount: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    image: String,
    cooking_time: i32,
}

#[derive(Debug, sqlx::FromRow)]
struct LineRow {
    name: String,
    measurement_unit: String,
    amount: i32,
}

const RECIPE_COLUMNS: &str =
    "r.id, r.author_id, r.name, r.image, r.text, r.cooking_time, r.created_at";

/// Map write failures on the link tables to client errors.
fn map_write_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            let field = match db_err.constraint() {
                Some(name) if name.contains("tag") => "tags",
                _ => "ingredients",
            };
            AppError::validation(field, "References an unknown id")
        }
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::validation("ingredients", "Entries must not repeat")
        }
        _ => AppError::Database(e),
    }
}

/// Append the WHERE clause for `filter` to a query over `recipes r`.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    builder.push(" WHERE TRUE");

    if let Some(author_id) = filter.author_id {
        builder.push(" AND r.author_id = ").push_bind(author_id);
    }

    if !filter.tag_slugs.is_empty() {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM recipe_tags rt INNER JOIN tags t ON t.id = rt.tag_id \
                 WHERE rt.recipe_id = r.id AND t.slug = ANY(",
            )
            .push_bind(filter.tag_slugs.clone())
            .push("))");
    }

    if let Some(user_id) = filter.favorited_by {
        builder
            .push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.recipe_id = r.id AND f.user_id = ")
            .push_bind(user_id)
            .push(")");
    }

    if let Some(user_id) = filter.in_cart_of {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM shopping_cart sc WHERE sc.recipe_id = r.id AND sc.user_id = ",
            )
            .push_bind(user_id)
            .push(")");
    }
}

/// PostgreSQL recipe repository implementation.
#[derive(Clone)]
pub struct PgRecipeRepository {
    pool: PgPool,
}

impl PgRecipeRepository {
    /// Create a new PgRecipeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the tag links and ingredient lines of a draft.
    async fn insert_links(
        conn: &mut PgConnection,
        recipe_id: i64,
        draft: &RecipeDraft,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO recipe_tags (recipe_id, tag_id)
            SELECT $1, tag_id FROM UNNEST($2::BIGINT[]) AS t(tag_id)
            "#,
        )
        .bind(recipe_id)
        .bind(&draft.tag_ids[..])
        .execute(&mut *conn)
        .await
        .map_err(map_write_error)?;

        let ingredient_ids: Vec<i64> = draft.ingredients.iter().map(|i| i.ingredient_id).collect();
        let amounts: Vec<i32> = draft.ingredients.iter().map(|i| i.amount).collect();

        sqlx::query(
            r#"
            INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount)
            SELECT $1, ingredient_id, amount
            FROM UNNEST($2::BIGINT[], $3::INTEGER[]) AS l(ingredient_id, amount)
            "#,
        )
        .bind(recipe_id)
        .bind(&ingredient_ids[..])
        .bind(&amounts[..])
        .execute(&mut *conn)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    /// Load tags and ingredient lines for a batch of recipe rows.
    async fn attach_details(&self, rows: Vec<RecipeRow>) -> Result<Vec<Recipe>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let tag_rows = sqlx::query_as::<_, RecipeTagRow>(
            r#"
            SELECT rt.recipe_id, t.id, t.name, t.color, t.slug
            FROM recipe_tags rt
            INNER JOIN tags t ON t.id = rt.tag_id
            WHERE rt.recipe_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let ingredient_rows = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.recipe_id, i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
            FROM recipe_ingredients ri
            INNER JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = ANY($1)
            ORDER BY i.name, i.measurement_unit
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.recipe_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                color: row.color,
                slug: row.slug,
            });
        }

        let mut ingredients: HashMap<i64, Vec<RecipeIngredient>> = HashMap::new();
        for row in ingredient_rows {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(RecipeIngredient {
                    ingredient_id: row.ingredient_id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_recipe(
                    tags.remove(&id).unwrap_or_default(),
                    ingredients.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn load(&self, id: i64) -> Result<Recipe, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe with id {} not found", id)))
    }
}

#[async_trait]
impl RecipeRepository for PgRecipeRepository {
    async fn create(&self, id: i64, author_id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO recipes (id, author_id, name, image, text, cooking_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(&draft.text)
        .bind(draft.cooking_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::NotFound(format!("User with id {} not found", author_id))
            }
            _ => AppError::Database(e),
        })?;

        Self::insert_links(&mut *tx, id, draft).await?;

        tx.commit().await?;

        self.load(id).await
    }

    async fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE recipes
            SET name = $2, image = $3, text = $4, cooking_time = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.image)
        .bind(&draft.text)
        .bind(draft.cooking_time)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Recipe with id {} not found", id)));
        }

        sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_links(&mut *tx, id, draft).await?;

        tx.commit().await?;

        self.load(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        // Links, favorites and cart entries go via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Recipe with id {} not found", id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_details(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> Result<Page<Recipe>, AppError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM recipes r");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {RECIPE_COLUMNS} FROM recipes r"));
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY r.created_at DESC, r.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = select
            .build_query_as::<RecipeRow>()
            .fetch_all(&self.pool)
            .await?;

        let recipes = self.attach_details(rows).await?;

        Ok(Page::new(recipes, total, page))
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, AppError> {
        // LIMIT NULL means no limit
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, name, image, cooking_time
            FROM recipes
            WHERE author_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(author_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecipeSummary {
                id: r.id,
                name: r.name,
                image: r.image,
                cooking_time: r.cooking_time,
            })
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes WHERE author_id = $1")
                .bind(author_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn cart_ingredient_lines(&self, user_id: i64) -> Result<Vec<IngredientLine>, AppError> {
        let rows = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT i.name, i.measurement_unit, ri.amount
            FROM shopping_cart sc
            INNER JOIN recipe_ingredients ri ON ri.recipe_id = sc.recipe_id
            INNER JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE sc.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| IngredientLine {
                name: r.name,
                measurement_unit: r.measurement_unit,
                amount: r.amount,
            })
            .collect())
    }
}
