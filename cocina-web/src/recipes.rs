//! Recipe repository
//!
//! Sequences validation, uniqueness checks, database writes and image file
//! side effects for the Recipe aggregate. File effects are ordered so that a
//! failure part-way leaves at worst an orphaned file, never a recipe that
//! points at a missing one:
//!
//! 1. validate the submission and check the name
//! 2. check and store the new image (if any)
//! 3. write the database row (the new file is removed if this fails)
//! 4. delete the replaced image, best effort

use cocina_common::validation::{name_key, RecipeInput};
use cocina_common::{
    uuid_utils, validate_recipe, Error, Recipe, Result, Step, StepContent, DEFAULT_IMAGE,
};
use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::{self, ListFilter};
use crate::images::{ImageStore, UploadedImage};
use crate::pagination::{calculate_pagination, Pagination, PAGE_SIZE};

/// One page of a filtered listing
#[derive(Debug, Clone)]
pub struct RecipePage {
    pub items: Vec<Recipe>,
    pub total_count: i64,
    pub pagination: Pagination,
}

/// CRUD over recipes and their steps, backed by the injected pool and
/// image store
#[derive(Debug, Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
    images: ImageStore,
}

impl RecipeRepository {
    pub fn new(pool: SqlitePool, images: ImageStore) -> Self {
        Self { pool, images }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Filtered page of recipes plus the total match count
    pub async fn list_page(&self, filter: &ListFilter, page: i64) -> Result<RecipePage> {
        let total_count = db::recipes::count_recipes(&self.pool, filter).await?;
        let pagination = calculate_pagination(total_count, page);
        let items =
            db::recipes::list_recipes(&self.pool, filter, pagination.offset, PAGE_SIZE).await?;

        Ok(RecipePage {
            items,
            total_count,
            pagination,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Recipe> {
        db::recipes::load_recipe(&self.pool, id)
            .await?
            .ok_or_else(Error::recipe_not_found)
    }

    /// Case-insensitive whole-name probe, optionally ignoring one recipe
    pub async fn name_exists(&self, title: &str, exclude: Option<Uuid>) -> Result<bool> {
        let key = name_key(title);
        if key.is_empty() {
            return Ok(false);
        }
        db::recipes::name_taken(&self.pool, &key, exclude).await
    }

    /// Validate and insert a new recipe with no steps
    pub async fn create(
        &self,
        input: &RecipeInput,
        image: Option<&UploadedImage>,
    ) -> Result<Recipe> {
        let draft = validate_recipe(input)?;
        if db::recipes::name_taken(&self.pool, &draft.name_key(), None).await? {
            return Err(Error::DuplicateName(draft.name));
        }

        let stored = match image {
            Some(upload) => Some(self.images.store(upload).await?),
            None => None,
        };
        let image_name = stored.clone().unwrap_or_else(|| DEFAULT_IMAGE.to_string());

        let id = uuid_utils::generate();
        if let Err(e) = db::recipes::insert_recipe(&self.pool, id, &draft, &image_name).await {
            if let Some(name) = &stored {
                self.images.delete(name).await;
            }
            return Err(e);
        }

        info!("Created recipe {} ({})", draft.name, id);

        Ok(Recipe {
            id,
            name: draft.name,
            description: draft.description,
            ingredients: draft.ingredients,
            category: draft.category,
            difficulty: draft.difficulty,
            preparation_time: draft.preparation_time,
            image: image_name,
            steps: Vec::new(),
        })
    }

    /// Validate and overwrite a recipe, applying the image policy
    ///
    /// A new upload replaces the current image. Without an upload,
    /// `remove_image` resets it to the placeholder. Otherwise the image is
    /// kept. Steps are never touched.
    pub async fn update(
        &self,
        id: Uuid,
        input: &RecipeInput,
        image: Option<&UploadedImage>,
        remove_image: bool,
    ) -> Result<Recipe> {
        let draft = validate_recipe(input)?;

        let current_image = db::recipes::load_image(&self.pool, id)
            .await?
            .ok_or_else(Error::recipe_not_found)?;

        if db::recipes::name_taken(&self.pool, &draft.name_key(), Some(id)).await? {
            return Err(Error::DuplicateName(draft.name));
        }

        let stored = match image {
            Some(upload) => Some(self.images.store(upload).await?),
            None => None,
        };
        let next_image = match &stored {
            Some(name) => name.clone(),
            None if remove_image => DEFAULT_IMAGE.to_string(),
            None => current_image.clone(),
        };

        let updated = db::recipes::update_recipe(&self.pool, id, &draft, &next_image).await;
        match updated {
            Ok(true) => {}
            Ok(false) => {
                if let Some(name) = &stored {
                    self.images.delete(name).await;
                }
                return Err(Error::recipe_not_found());
            }
            Err(e) => {
                if let Some(name) = &stored {
                    self.images.delete(name).await;
                }
                return Err(e);
            }
        }

        if next_image != current_image {
            self.images.delete(&current_image).await;
        }

        info!("Updated recipe {} ({})", draft.name, id);
        self.find_by_id(id).await
    }

    /// Remove a recipe, its steps and its image
    ///
    /// Returns false when no recipe matched.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        match db::recipes::delete_recipe(&self.pool, id).await? {
            Some(image) => {
                self.images.delete(&image).await;
                info!("Deleted recipe {}", id);
                Ok(true)
            }
            None => {
                warn!("Delete requested for missing recipe {}", id);
                Ok(false)
            }
        }
    }

    pub async fn add_step(&self, recipe_id: Uuid, name: &str, description: &str) -> Result<Step> {
        let step = db::add_step(&self.pool, recipe_id, name, description).await?;
        info!(
            "Added step {} (order {}) to recipe {}",
            step.id, step.order, recipe_id
        );
        Ok(step)
    }

    pub async fn get_step(&self, recipe_id: Uuid, step_id: Uuid) -> Result<Step> {
        db::get_step(&self.pool, recipe_id, step_id).await
    }

    pub async fn update_step(
        &self,
        recipe_id: Uuid,
        step_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<StepContent> {
        let content = db::update_step(&self.pool, recipe_id, step_id, name, description).await?;
        info!("Updated step {} of recipe {}", step_id, recipe_id);
        Ok(content)
    }

    pub async fn delete_step(&self, recipe_id: Uuid, step_id: Uuid) -> Result<()> {
        db::delete_step(&self.pool, recipe_id, step_id).await?;
        info!("Deleted step {} of recipe {}", step_id, recipe_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use cocina_common::db::init::init_memory_database;
    use cocina_common::ValidationError;

    async fn setup() -> (RecipeRepository, tempfile::TempDir) {
        let pool = init_memory_database().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let images = ImageStore::new(dir.path());
        images.ensure_ready().await.unwrap();
        (RecipeRepository::new(pool, images), dir)
    }

    fn input(name: &str) -> RecipeInput {
        RecipeInput {
            name: Some(name.to_string()),
            description: Some("X".repeat(25)),
            ingredients: Some("eggs".to_string()),
            category: Some("postre".to_string()),
            difficulty: Some("facil".to_string()),
            preparation_time: Some("30".to_string()),
        }
    }

    fn jpeg(name: &str) -> UploadedImage {
        UploadedImage {
            original_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: Bytes::from_static(b"\xff\xd8\xff"),
        }
    }

    #[tokio::test]
    async fn test_create_without_image_uses_placeholder() {
        let (repo, _dir) = setup().await;
        let recipe = repo.create(&input("Tarta"), None).await.unwrap();
        assert_eq!(recipe.image, DEFAULT_IMAGE);
        assert!(recipe.steps.is_empty());

        let loaded = repo.find_by_id(recipe.id).await.unwrap();
        assert_eq!(loaded, recipe);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_case_insensitive() {
        let (repo, _dir) = setup().await;
        repo.create(&input("Tarta"), None).await.unwrap();

        let mut lower = input("Tarta");
        lower.name = Some("tarta".to_string());
        // Lower-case names fail the capitalization rule before uniqueness
        assert!(matches!(
            repo.create(&lower, None).await,
            Err(Error::Validation(ValidationError::NameNotCapitalized))
        ));

        let err = repo.create(&input(" TARTA "), None).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
        assert!(repo.name_exists("tarta", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_may_keep_own_name() {
        let (repo, _dir) = setup().await;
        let recipe = repo.create(&input("Tarta"), None).await.unwrap();
        let other = repo.create(&input("Pan"), None).await.unwrap();

        assert!(!repo.name_exists("Tarta", Some(recipe.id)).await.unwrap());
        repo.update(recipe.id, &input("Tarta"), None, false).await.unwrap();

        let err = repo.update(other.id, &input("Tarta"), None, false).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_image_replace_then_remove() {
        let (repo, dir) = setup().await;
        let recipe = repo.create(&input("Tarta"), Some(&jpeg("a.jpg"))).await.unwrap();
        let first = recipe.image.clone();
        assert!(dir.path().join(&first).exists());

        let replaced = repo
            .update(recipe.id, &input("Tarta"), Some(&jpeg("b.jpg")), false)
            .await
            .unwrap();
        assert_ne!(replaced.image, first);
        assert!(!dir.path().join(&first).exists(), "Old image removed");
        assert!(dir.path().join(&replaced.image).exists());

        let removed = repo.update(recipe.id, &input("Tarta"), None, true).await.unwrap();
        assert_eq!(removed.image, DEFAULT_IMAGE);
        assert!(!dir.path().join(&replaced.image).exists());
        assert!(dir.path().join(DEFAULT_IMAGE).exists());
    }

    #[tokio::test]
    async fn test_failed_validation_stores_nothing() {
        let (repo, dir) = setup().await;
        let mut bad = input("Tarta");
        bad.preparation_time = Some("0".to_string());

        let err = repo.create(&bad, Some(&jpeg("a.jpg"))).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidPreparationTime)
        ));
        // Only the placeholder is present
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_steps_and_image() {
        let (repo, dir) = setup().await;
        let recipe = repo.create(&input("Tarta"), Some(&jpeg("a.jpg"))).await.unwrap();
        let s1 = repo.add_step(recipe.id, "Uno", "Primero").await.unwrap();
        let s2 = repo.add_step(recipe.id, "Dos", "Segundo").await.unwrap();

        assert!(repo.delete(recipe.id).await.unwrap());
        assert!(!dir.path().join(&recipe.image).exists());

        for step in [s1, s2] {
            assert!(matches!(
                repo.get_step(recipe.id, step.id).await,
                Err(Error::NotFound(_))
            ));
        }
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_steps")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 0);

        assert!(!repo.delete(recipe.id).await.unwrap(), "Second delete is soft");
    }

    #[tokio::test]
    async fn test_update_missing_recipe_is_not_found() {
        let (repo, _dir) = setup().await;
        let err = repo
            .update(Uuid::new_v4(), &input("Tarta"), None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_page_filters() {
        let (repo, _dir) = setup().await;
        for name in ["Tarta de queso", "Pan", "Tarta de manzana"] {
            repo.create(&input(name), None).await.unwrap();
        }
        let mut vegan = input("Ensalada");
        vegan.category = Some("vegano".to_string());
        repo.create(&vegan, None).await.unwrap();

        let page = repo
            .list_page(&ListFilter::new(Some("TARTA"), None), 1)
            .await
            .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items[0].name, "Tarta de queso");

        let page = repo
            .list_page(&ListFilter::new(None, Some("vegano")), 1)
            .await
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].name, "Ensalada");

        let page = repo
            .list_page(&ListFilter::new(Some("%"), None), 1)
            .await
            .unwrap();
        assert_eq!(page.total_count, 0, "Wildcards match literally");
    }
}
