//! Recipe table operations
//!
//! Row-level SQL only. Validation and image side effects are sequenced by
//! [`crate::recipes::RecipeRepository`].

use cocina_common::validation::RecipeDraft;
use cocina_common::{Category, Difficulty, Error, Recipe, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use super::steps::load_steps;

/// Listing filter parsed from the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Case-insensitive substring of the recipe name
    pub search: Option<String>,
    /// Exact category tag
    pub category: Option<String>,
}

impl ListFilter {
    /// Blank values count as absent
    pub fn new(search: Option<&str>, category: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            search: clean(search),
            category: clean(category),
        }
    }

    /// LIKE pattern for the search text, with wildcards escaped
    fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(|s| {
            let mut pattern = String::with_capacity(s.len() + 2);
            pattern.push('%');
            for c in s.to_lowercase().chars() {
                if matches!(c, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

const FILTER_CLAUSE: &str = r"
    WHERE (? IS NULL OR name_key LIKE ? ESCAPE '\')
      AND (? IS NULL OR category = ?)
";

/// Count recipes matching the filter
pub async fn count_recipes(pool: &SqlitePool, filter: &ListFilter) -> Result<i64> {
    let pattern = filter.search_pattern();
    let sql = format!("SELECT COUNT(*) FROM recipes {}", FILTER_CLAUSE);

    let total: i64 = sqlx::query_scalar(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&filter.category)
        .bind(&filter.category)
        .fetch_one(pool)
        .await?;

    Ok(total)
}

/// One page of matching recipes in insertion order, steps included
pub async fn list_recipes(
    pool: &SqlitePool,
    filter: &ListFilter,
    offset: i64,
    limit: i64,
) -> Result<Vec<Recipe>> {
    let pattern = filter.search_pattern();
    let sql = format!(
        r#"
        SELECT guid, name, description, ingredients, category, difficulty,
               preparation_time, image
        FROM recipes
        {}
        ORDER BY rowid ASC
        LIMIT ? OFFSET ?
        "#,
        FILTER_CLAUSE
    );

    let rows = sqlx::query(&sql)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&filter.category)
        .bind(&filter.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    let mut recipes = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut recipe = recipe_from_row(row)?;
        recipe.steps = load_steps(pool, recipe.id).await?;
        recipes.push(recipe);
    }
    Ok(recipes)
}

/// Load a recipe with its steps
pub async fn load_recipe(pool: &SqlitePool, id: Uuid) -> Result<Option<Recipe>> {
    let row = sqlx::query(
        r#"
        SELECT guid, name, description, ingredients, category, difficulty,
               preparation_time, image
        FROM recipes
        WHERE guid = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let mut recipe = recipe_from_row(&row)?;
            recipe.steps = load_steps(pool, id).await?;
            Ok(Some(recipe))
        }
        None => Ok(None),
    }
}

/// Current image file name of a recipe
pub async fn load_image(pool: &SqlitePool, id: Uuid) -> Result<Option<String>> {
    let image: Option<String> = sqlx::query_scalar("SELECT image FROM recipes WHERE guid = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    Ok(image)
}

pub async fn count_all(pool: &SqlitePool) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Whether another recipe already uses this case-folded name
pub async fn name_taken(pool: &SqlitePool, name_key: &str, exclude: Option<Uuid>) -> Result<bool> {
    let taken: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM recipes WHERE name_key = ? AND (? IS NULL OR guid != ?))",
    )
    .bind(name_key)
    .bind(exclude.map(|id| id.to_string()))
    .bind(exclude.map(|id| id.to_string()))
    .fetch_one(pool)
    .await?;
    Ok(taken != 0)
}

/// Insert a validated recipe with no steps
pub async fn insert_recipe(
    executor: impl SqliteExecutor<'_>,
    id: Uuid,
    draft: &RecipeDraft,
    image: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO recipes (
            guid, name, name_key, description, ingredients, category,
            difficulty, preparation_time, image, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(id.to_string())
    .bind(&draft.name)
    .bind(draft.name_key())
    .bind(&draft.description)
    .bind(&draft.ingredients)
    .bind(draft.category.as_str())
    .bind(draft.difficulty.as_str())
    .bind(draft.preparation_time)
    .bind(image)
    .execute(executor)
    .await
    .map_err(|e| duplicate_or(e, &draft.name))?;

    Ok(())
}

/// Overwrite a recipe's fields; returns false when no row matched
pub async fn update_recipe(
    pool: &SqlitePool,
    id: Uuid,
    draft: &RecipeDraft,
    image: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE recipes SET
            name = ?,
            name_key = ?,
            description = ?,
            ingredients = ?,
            category = ?,
            difficulty = ?,
            preparation_time = ?,
            image = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&draft.name)
    .bind(draft.name_key())
    .bind(&draft.description)
    .bind(&draft.ingredients)
    .bind(draft.category.as_str())
    .bind(draft.difficulty.as_str())
    .bind(draft.preparation_time)
    .bind(image)
    .bind(id.to_string())
    .execute(pool)
    .await
    .map_err(|e| duplicate_or(e, &draft.name))?;

    Ok(result.rows_affected() > 0)
}

/// Delete a recipe and its steps in one transaction
///
/// Returns the deleted recipe's image name, or `None` if nothing matched.
pub async fn delete_recipe(pool: &SqlitePool, id: Uuid) -> Result<Option<String>> {
    let guid = id.to_string();
    let mut tx = pool.begin().await?;

    let image: Option<String> = sqlx::query_scalar("SELECT image FROM recipes WHERE guid = ?")
        .bind(&guid)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(image) = image else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM recipe_steps WHERE recipe_id = ?")
        .bind(&guid)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM recipes WHERE guid = ?")
        .bind(&guid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok((result.rows_affected() > 0).then_some(image))
}

/// Map a unique-constraint violation on `name_key` to a duplicate name error
fn duplicate_or(err: sqlx::Error, name: &str) -> Error {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return Error::DuplicateName(name.to_string());
        }
    }
    Error::Database(err)
}

fn recipe_from_row(row: &SqliteRow) -> Result<Recipe> {
    let guid: String = row.get("guid");
    let category: String = row.get("category");
    let difficulty: String = row.get("difficulty");

    Ok(Recipe {
        id: Uuid::parse_str(&guid)
            .map_err(|e| Error::Internal(format!("Corrupt recipe id {}: {}", guid, e)))?,
        name: row.get("name"),
        description: row.get("description"),
        ingredients: row.get("ingredients"),
        category: category
            .parse::<Category>()
            .map_err(|e| Error::Internal(format!("Recipe {}: {}", guid, e)))?,
        difficulty: difficulty
            .parse::<Difficulty>()
            .map_err(|e| Error::Internal(format!("Recipe {}: {}", guid, e)))?,
        preparation_time: row.get("preparation_time"),
        image: row.get("image"),
        steps: Vec::new(),
    })
}
