//! Initial catalog import
//!
//! On startup, an empty recipe table is filled from `data/recipes.json` under
//! the root folder. Images named by the catalog are copied from
//! `data/images/` into the upload directory. Every seeded step gets a fresh
//! id; steps without an `order` are numbered by position. The import is
//! all-or-nothing: one bad entry leaves the catalog empty.

use cocina_common::validation::{RecipeDraft, RecipeInput};
use cocina_common::{uuid_utils, validate_recipe, Error, Result, DEFAULT_IMAGE};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info};

use crate::db;
use crate::images::ImageStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecipe {
    name: String,
    description: String,
    ingredients: String,
    category: String,
    difficulty: String,
    /// Either a JSON number or a numeric string
    preparation_time: serde_json::Value,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    steps: Vec<SeedStep>,
}

#[derive(Debug, Deserialize)]
struct SeedStep {
    name: String,
    description: String,
    #[serde(default)]
    order: Option<i64>,
}

impl SeedRecipe {
    fn to_input(&self) -> RecipeInput {
        let preparation_time = match &self.preparation_time {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        RecipeInput {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            ingredients: Some(self.ingredients.clone()),
            category: Some(self.category.clone()),
            difficulty: Some(self.difficulty.clone()),
            preparation_time: Some(preparation_time),
        }
    }
}

/// Load the seed catalog when the database holds no recipes
///
/// Returns the number of recipes inserted. A missing seed file is not an
/// error; a malformed one is.
pub async fn seed_if_empty(
    pool: &SqlitePool,
    images: &ImageStore,
    seed_file: &Path,
    seed_images_dir: &Path,
) -> Result<usize> {
    if db::recipes::count_all(pool).await? > 0 {
        info!("Database already contains recipes, skipping seed");
        return Ok(0);
    }

    if !tokio::fs::try_exists(seed_file).await? {
        debug!("No seed file at {}", seed_file.display());
        return Ok(0);
    }

    info!("Empty database, loading seed data from {}", seed_file.display());

    let content = tokio::fs::read_to_string(seed_file).await?;
    let recipes: Vec<SeedRecipe> = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", seed_file.display(), e)))?;

    let mut drafts = Vec::with_capacity(recipes.len());
    for recipe in &recipes {
        let draft = validate_recipe(&recipe.to_input())
            .map_err(|e| Error::Config(format!("Seed recipe {:?}: {}", recipe.name, e)))?;
        drafts.push(draft);
    }

    let mut imported = Vec::new();
    let outcome =
        insert_catalog(pool, images, seed_images_dir, &recipes, &drafts, &mut imported).await;
    if let Err(e) = outcome {
        for name in &imported {
            images.delete(name).await;
        }
        return Err(e);
    }

    info!("Seeded {} recipes", recipes.len());
    Ok(recipes.len())
}

/// All-or-nothing insert of the validated catalog
///
/// Copied image names are pushed to `imported` so the caller can remove
/// them when the transaction is rolled back.
async fn insert_catalog(
    pool: &SqlitePool,
    images: &ImageStore,
    seed_images_dir: &Path,
    recipes: &[SeedRecipe],
    drafts: &[RecipeDraft],
    imported: &mut Vec<String>,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    for (recipe, draft) in recipes.iter().zip(drafts) {
        let id = uuid_utils::generate();
        let image = match recipe.image.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() && name != DEFAULT_IMAGE => name,
            _ => DEFAULT_IMAGE,
        };
        db::recipes::insert_recipe(&mut *tx, id, draft, image).await?;

        for (index, step) in recipe.steps.iter().enumerate() {
            let order = step.order.filter(|o| *o > 0).unwrap_or(index as i64 + 1);
            db::steps::insert_step_with_order(&mut *tx, id, order, &step.name, &step.description)
                .await?;
        }

        if image != DEFAULT_IMAGE {
            images.import(&seed_images_dir.join(image), image).await?;
            imported.push(image.to_string());
        }
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocina_common::db::init::init_memory_database;

    const CATALOG: &str = r#"[
        {
            "name": "Tortilla de patatas",
            "description": "La tortilla clásica con patata y cebolla",
            "ingredients": "huevos, patatas, cebolla",
            "category": "principal",
            "difficulty": "media",
            "preparationTime": 40,
            "image": "tortilla.jpg",
            "steps": [
                { "name": "Pelar", "description": "Pelar las patatas" },
                { "name": "Freír", "description": "Freír a fuego lento", "order": 5 }
            ]
        },
        {
            "name": "Gazpacho",
            "description": "Sopa fría de tomate para el verano",
            "ingredients": "tomate, pepino, pimiento",
            "category": "entrante",
            "difficulty": "facil",
            "preparationTime": "15"
        }
    ]"#;

    fn seed_dirs(catalog: &str) -> (tempfile::TempDir, ImageStore) {
        let root = tempfile::tempdir().unwrap();
        let seed_images = root.path().join("data").join("images");
        std::fs::create_dir_all(&seed_images).unwrap();
        std::fs::write(root.path().join("data").join("recipes.json"), catalog).unwrap();
        std::fs::write(seed_images.join("tortilla.jpg"), b"jpeg").unwrap();
        let images = ImageStore::new(root.path().join("uploads"));
        (root, images)
    }

    #[tokio::test]
    async fn test_seed_loads_empty_database_once() {
        let pool = init_memory_database().await.unwrap();
        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let seed_images = data.join("images");
        std::fs::create_dir_all(&seed_images).unwrap();
        std::fs::write(data.join("recipes.json"), CATALOG).unwrap();
        std::fs::write(seed_images.join("tortilla.jpg"), b"jpeg").unwrap();

        let images = ImageStore::new(root.path().join("uploads"));
        images.ensure_ready().await.unwrap();

        let seed_file = data.join("recipes.json");
        let inserted = seed_if_empty(&pool, &images, &seed_file, &seed_images)
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert!(root.path().join("uploads").join("tortilla.jpg").exists());

        let orders: Vec<i64> =
            sqlx::query_scalar("SELECT step_order FROM recipe_steps ORDER BY seq")
                .fetch_all(&pool)
                .await
                .unwrap();
        assert_eq!(orders, vec![1, 5]);

        let gazpacho_image: String =
            sqlx::query_scalar("SELECT image FROM recipes WHERE name = 'Gazpacho'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(gazpacho_image, DEFAULT_IMAGE);

        // Non-empty catalog is left alone
        let again = seed_if_empty(&pool, &images, &seed_file, &seed_images)
            .await
            .unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn test_missing_seed_file_is_skipped() {
        let pool = init_memory_database().await.unwrap();
        let root = tempfile::tempdir().unwrap();
        let images = ImageStore::new(root.path().join("uploads"));

        let inserted = seed_if_empty(
            &pool,
            &images,
            &root.path().join("missing.json"),
            root.path(),
        )
        .await
        .unwrap();
        assert_eq!(inserted, 0);
    }

    #[tokio::test]
    async fn test_bad_entry_leaves_catalog_empty() {
        let pool = init_memory_database().await.unwrap();
        let catalog = CATALOG.replace(r#""preparationTime": "15""#, r#""preparationTime": 0"#);
        let (root, images) = seed_dirs(&catalog);
        images.ensure_ready().await.unwrap();
        let data = root.path().join("data");

        let result =
            seed_if_empty(&pool, &images, &data.join("recipes.json"), &data.join("images")).await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(db::recipes::count_all(&pool).await.unwrap(), 0);
        assert!(!root.path().join("uploads").join("tortilla.jpg").exists());

        // The next start retries the whole catalog
        std::fs::write(data.join("recipes.json"), CATALOG).unwrap();
        let inserted =
            seed_if_empty(&pool, &images, &data.join("recipes.json"), &data.join("images"))
                .await
                .unwrap();
        assert_eq!(inserted, 2);
    }

    #[tokio::test]
    async fn test_missing_image_rolls_back_everything() {
        let pool = init_memory_database().await.unwrap();
        let catalog = CATALOG.replace(
            r#""preparationTime": "15""#,
            r#""preparationTime": "15", "image": "gazpacho.jpg""#,
        );
        let (root, images) = seed_dirs(&catalog);
        images.ensure_ready().await.unwrap();
        let data = root.path().join("data");

        let result =
            seed_if_empty(&pool, &images, &data.join("recipes.json"), &data.join("images")).await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(db::recipes::count_all(&pool).await.unwrap(), 0);
        let steps: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipe_steps")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(steps, 0);
        assert!(!root.path().join("uploads").join("tortilla.jpg").exists());
    }
}
