//! In-memory repositories
//!
//! Implements every repository trait over one mutex-guarded store so the
//! API can be driven end to end without PostgreSQL. Constraint behaviour
//! (uniqueness, cascades, self-subscription) mirrors the SQL schema.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use foodgram::domain::{
    Ingredient, IngredientAmount, IngredientLine, IngredientRepository, NewIngredient, NewTag,
    Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeIngredient, RecipeRepository,
    RecipeSummary, RelationKind, RelationRepository, Tag, TagRepository, User, UserRepository,
};
use foodgram::infrastructure::repositories::Repositories;
use foodgram::shared::error::AppError;

struct StoredRecipe {
    id: i64,
    author_id: i64,
    name: String,
    image: String,
    text: String,
    cooking_time: i32,
    created_at: DateTime<Utc>,
    tag_ids: Vec<i64>,
    ingredients: Vec<IngredientAmount>,
}

#[derive(Default)]
struct Store {
    users: BTreeMap<i64, User>,
    ingredients: BTreeMap<i64, Ingredient>,
    tags: BTreeMap<i64, Tag>,
    recipes: BTreeMap<i64, StoredRecipe>,
    relations: HashMap<RelationKind, BTreeSet<(i64, i64)>>,
    next_catalog_id: i64,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_catalog_id += 1;
        self.next_catalog_id
    }

    fn pairs(&self, kind: RelationKind) -> impl Iterator<Item = &(i64, i64)> + '_ {
        self.relations.get(&kind).into_iter().flatten()
    }

    fn related(&self, kind: RelationKind, owner_id: i64, target_id: i64) -> bool {
        self.relations
            .get(&kind)
            .is_some_and(|set| set.contains(&(owner_id, target_id)))
    }

    fn hydrate(&self, stored: &StoredRecipe) -> Recipe {
        let mut tags: Vec<Tag> = stored
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let mut ingredients: Vec<RecipeIngredient> = stored
            .ingredients
            .iter()
            .filter_map(|line| {
                self.ingredients
                    .get(&line.ingredient_id)
                    .map(|i| RecipeIngredient {
                        ingredient_id: i.id,
                        name: i.name.clone(),
                        measurement_unit: i.measurement_unit.clone(),
                        amount: line.amount,
                    })
            })
            .collect();
        ingredients.sort_by(|a, b| {
            (a.name.as_str(), a.measurement_unit.as_str())
                .cmp(&(b.name.as_str(), b.measurement_unit.as_str()))
        });

        Recipe {
            id: stored.id,
            author_id: stored.author_id,
            name: stored.name.clone(),
            image: stored.image.clone(),
            text: stored.text.clone(),
            cooking_time: stored.cooking_time,
            created_at: stored.created_at,
            tags,
            ingredients,
        }
    }

    fn check_links(&self, draft: &RecipeDraft) -> Result<(), AppError> {
        if draft.tag_ids.iter().any(|id| !self.tags.contains_key(id)) {
            return Err(AppError::validation("tags", "Unknown tag"));
        }
        if draft
            .ingredients
            .iter()
            .any(|line| !self.ingredients.contains_key(&line.ingredient_id))
        {
            return Err(AppError::validation("ingredients", "Unknown ingredient"));
        }
        Ok(())
    }

    /// Recipes newest first.
    fn recipes_newest_first(&self) -> Vec<&StoredRecipe> {
        let mut recipes: Vec<&StoredRecipe> = self.recipes.values().collect();
        recipes.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        recipes
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let slice = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(slice, items.len() as i64, page)
}

/// Shared in-memory database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Store>>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().expect("memory store poisoned")
    }

    /// Repository bundle backed by this store.
    pub fn repositories(&self) -> Repositories {
        let relation = |kind| -> Arc<dyn RelationRepository> {
            Arc::new(MemoryRelations {
                store: self.clone(),
                kind,
            })
        };

        Repositories {
            users: Arc::new(self.clone()),
            ingredients: Arc::new(self.clone()),
            tags: Arc::new(self.clone()),
            recipes: Arc::new(self.clone()),
            favorites: relation(RelationKind::Favorite),
            shopping_cart: relation(RelationKind::ShoppingCart),
            subscriptions: relation(RelationKind::Subscription),
        }
    }

    pub fn insert_user(&self, user: User) {
        self.lock().users.insert(user.id, user);
    }

    pub fn recipe_count(&self) -> usize {
        self.lock().recipes.len()
    }

    pub fn relation_count(&self, kind: RelationKind) -> usize {
        self.lock().pairs(kind).count()
    }

    pub fn has_relation(&self, kind: RelationKind, owner_id: i64, target_id: i64) -> bool {
        self.lock().related(kind, owner_id, target_id)
    }

    pub fn ingredient_id(&self, name: &str, unit: &str) -> i64 {
        self.lock()
            .ingredients
            .values()
            .find(|i| i.name == name && i.measurement_unit == unit)
            .map(|i| i.id)
            .unwrap_or_else(|| panic!("ingredient {name} ({unit}) not seeded"))
    }

    pub fn tag_id(&self, slug: &str) -> i64 {
        self.lock()
            .tags
            .values()
            .find(|t| t.slug == slug)
            .map(|t| t.id)
            .unwrap_or_else(|| panic!("tag {slug} not seeded"))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<User>, AppError> {
        let store = self.lock();
        let mut users: Vec<User> = ids
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| store.users.get(id).cloned())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.lock().users.contains_key(&id))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, AppError> {
        let store = self.lock();
        let mut users: Vec<User> = store.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&users, page))
    }

    async fn list_followed_by(
        &self,
        follower_id: i64,
        page: PageRequest,
    ) -> Result<Page<User>, AppError> {
        let store = self.lock();
        let mut users: Vec<User> = store
            .pairs(RelationKind::Subscription)
            .filter(|(owner, _)| *owner == follower_id)
            .filter_map(|(_, author)| store.users.get(author).cloned())
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(paginate(&users, page))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut store = self.lock();
        let taken = store.users.values().any(|u| {
            u.email.eq_ignore_ascii_case(&user.email) || u.username == user.username
        });
        if taken {
            return Err(AppError::AlreadyExists("User already exists".into()));
        }
        store.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.lock().users.values().any(|u| u.username == username))
    }
}

#[async_trait]
impl IngredientRepository for MemoryStore {
    async fn list(&self, name_prefix: Option<String>) -> Result<Vec<Ingredient>, AppError> {
        let store = self.lock();
        let prefix = name_prefix.map(|p| p.to_lowercase());
        let mut ingredients: Vec<Ingredient> = store
            .ingredients
            .values()
            .filter(|i| match &prefix {
                Some(p) => i.name.to_lowercase().starts_with(p.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| {
            (a.name.as_str(), a.measurement_unit.as_str())
                .cmp(&(b.name.as_str(), b.measurement_unit.as_str()))
        });
        Ok(ingredients)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        Ok(self.lock().ingredients.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError> {
        let store = self.lock();
        Ok(ids
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| store.ingredients.get(id).cloned())
            .collect())
    }

    async fn insert_missing(&self, ingredients: &[NewIngredient]) -> Result<u64, AppError> {
        let mut store = self.lock();
        let mut inserted = 0;
        for record in ingredients {
            let exists = store
                .ingredients
                .values()
                .any(|i| i.name == record.name && i.measurement_unit == record.measurement_unit);
            if !exists {
                let id = store.next_id();
                store.ingredients.insert(
                    id,
                    Ingredient {
                        id,
                        name: record.name.clone(),
                        measurement_unit: record.measurement_unit.clone(),
                    },
                );
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Tag>, AppError> {
        let mut tags: Vec<Tag> = self.lock().tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        Ok(self.lock().tags.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError> {
        let store = self.lock();
        Ok(ids
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|id| store.tags.get(id).cloned())
            .collect())
    }

    async fn insert_missing(&self, tags: &[NewTag]) -> Result<u64, AppError> {
        let mut store = self.lock();
        let mut inserted = 0;
        for record in tags {
            let exists = store
                .tags
                .values()
                .any(|t| t.name == record.name || t.slug == record.slug);
            if !exists {
                let id = store.next_id();
                store.tags.insert(
                    id,
                    Tag {
                        id,
                        name: record.name.clone(),
                        color: record.color.clone(),
                        slug: record.slug.clone(),
                    },
                );
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create(&self, id: i64, author_id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let mut store = self.lock();
        if !store.users.contains_key(&author_id) {
            return Err(AppError::NotFound(format!("User with id {} not found", author_id)));
        }
        store.check_links(draft)?;

        let stored = StoredRecipe {
            id,
            author_id,
            name: draft.name.clone(),
            image: draft.image.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            created_at: Utc::now(),
            tag_ids: draft.tag_ids.clone(),
            ingredients: draft.ingredients.clone(),
        };
        let recipe = store.hydrate(&stored);
        store.recipes.insert(id, stored);
        Ok(recipe)
    }

    async fn update(&self, id: i64, draft: &RecipeDraft) -> Result<Recipe, AppError> {
        let mut store = self.lock();
        store.check_links(draft)?;

        let stored = store
            .recipes
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe with id {} not found", id)))?;
        stored.name = draft.name.clone();
        stored.image = draft.image.clone();
        stored.text = draft.text.clone();
        stored.cooking_time = draft.cooking_time;
        stored.tag_ids = draft.tag_ids.clone();
        stored.ingredients = draft.ingredients.clone();

        let store = &*store;
        Ok(store.hydrate(&store.recipes[&id]))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut store = self.lock();
        if store.recipes.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Recipe with id {} not found", id)));
        }
        for kind in [RelationKind::Favorite, RelationKind::ShoppingCart] {
            if let Some(set) = store.relations.get_mut(&kind) {
                set.retain(|(_, recipe_id)| *recipe_id != id);
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let store = self.lock();
        Ok(store.recipes.get(&id).map(|r| store.hydrate(r)))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.lock().recipes.contains_key(&id))
    }

    async fn list(&self, filter: &RecipeFilter, page: PageRequest) -> Result<Page<Recipe>, AppError> {
        let store = self.lock();
        let matching: Vec<Recipe> = store
            .recipes_newest_first()
            .into_iter()
            .filter(|r| filter.author_id.map_or(true, |author| r.author_id == author))
            .filter(|r| {
                filter.tag_slugs.is_empty()
                    || r.tag_ids.iter().any(|id| {
                        store
                            .tags
                            .get(id)
                            .is_some_and(|t| filter.tag_slugs.contains(&t.slug))
                    })
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .map_or(true, |user| store.related(RelationKind::Favorite, user, r.id))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .map_or(true, |user| store.related(RelationKind::ShoppingCart, user, r.id))
            })
            .map(|r| store.hydrate(r))
            .collect();

        Ok(paginate(&matching, page))
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, AppError> {
        let store = self.lock();
        Ok(store
            .recipes_newest_first()
            .into_iter()
            .filter(|r| r.author_id == author_id)
            .take(limit.map_or(usize::MAX, |l| l as usize))
            .map(|r| store.hydrate(r).summary())
            .collect())
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        Ok(self
            .lock()
            .recipes
            .values()
            .filter(|r| r.author_id == author_id)
            .count() as i64)
    }

    async fn cart_ingredient_lines(&self, user_id: i64) -> Result<Vec<IngredientLine>, AppError> {
        let store = self.lock();
        let lines = store
            .pairs(RelationKind::ShoppingCart)
            .filter(|(owner, _)| *owner == user_id)
            .filter_map(|(_, recipe_id)| store.recipes.get(recipe_id))
            .flat_map(|r| store.hydrate(r).ingredients)
            .map(|i| IngredientLine::new(i.name, i.measurement_unit, i.amount))
            .collect();
        Ok(lines)
    }
}

/// One relation table.
pub struct MemoryRelations {
    store: MemoryStore,
    kind: RelationKind,
}

#[async_trait]
impl RelationRepository for MemoryRelations {
    fn kind(&self) -> RelationKind {
        self.kind
    }

    async fn add(&self, owner_id: i64, target_id: i64) -> Result<(), AppError> {
        let mut store = self.store.lock();

        let target_exists = match self.kind {
            RelationKind::Subscription => store.users.contains_key(&target_id),
            RelationKind::Favorite | RelationKind::ShoppingCart => {
                store.recipes.contains_key(&target_id)
            }
        };
        if !store.users.contains_key(&owner_id) || !target_exists {
            return Err(AppError::NotFound("Related record not found".into()));
        }
        if self.kind == RelationKind::Subscription && owner_id == target_id {
            return Err(AppError::InvalidOperation(
                "You cannot subscribe to yourself".into(),
            ));
        }

        let inserted = store
            .relations
            .entry(self.kind)
            .or_default()
            .insert((owner_id, target_id));
        if !inserted {
            return Err(AppError::AlreadyExists(format!("Already in {}", self.kind)));
        }
        Ok(())
    }

    async fn remove(&self, owner_id: i64, target_id: i64) -> Result<(), AppError> {
        let removed = self
            .store
            .lock()
            .relations
            .get_mut(&self.kind)
            .is_some_and(|set| set.remove(&(owner_id, target_id)));
        if !removed {
            return Err(AppError::NotFound(format!("Not in {}", self.kind)));
        }
        Ok(())
    }

    async fn exists(&self, owner_id: i64, target_id: i64) -> Result<bool, AppError> {
        Ok(self.store.lock().related(self.kind, owner_id, target_id))
    }

    async fn filter_existing(&self, owner_id: i64, target_ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let store = self.store.lock();
        Ok(target_ids
            .iter()
            .copied()
            .filter(|target| store.related(self.kind, owner_id, *target))
            .collect())
    }
}
