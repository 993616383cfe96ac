//! Step lifecycle operations
//!
//! Steps are child rows of exactly one recipe and are always addressed by
//! the `(recipe_id, step_id)` pair, so a step id paired with the wrong
//! recipe matches nothing. `order` is fixed at creation as the recipe's step
//! count plus one and is never renumbered.

use cocina_common::validation::validate_step;
use cocina_common::{uuid_utils, Error, Result, Step, StepContent};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

/// All steps of a recipe in insertion order
pub async fn load_steps(pool: &SqlitePool, recipe_id: Uuid) -> Result<Vec<Step>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, name, description, step_order
        FROM recipe_steps
        WHERE recipe_id = ?
        ORDER BY seq ASC
        "#,
    )
    .bind(recipe_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(step_from_row).collect()
}

/// Append a step to a recipe
///
/// The order is computed inside the INSERT itself, so the count and the
/// write happen under one statement. Zero inserted rows means the recipe
/// does not exist.
pub async fn add_step(
    pool: &SqlitePool,
    recipe_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Step> {
    let (name, description) = validate_step(name, description)?;
    let step_id = uuid_utils::generate();

    let order: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO recipe_steps (guid, recipe_id, step_order, name, description)
        SELECT ?, r.guid,
               (SELECT COUNT(*) FROM recipe_steps s WHERE s.recipe_id = r.guid) + 1,
               ?, ?
        FROM recipes r
        WHERE r.guid = ?
        RETURNING step_order
        "#,
    )
    .bind(step_id.to_string())
    .bind(&name)
    .bind(&description)
    .bind(recipe_id.to_string())
    .fetch_optional(pool)
    .await?;

    let order = order.ok_or_else(Error::recipe_not_found)?;

    Ok(Step {
        id: step_id,
        name,
        description,
        order,
    })
}

/// Fetch one step, scoped to its recipe
pub async fn get_step(pool: &SqlitePool, recipe_id: Uuid, step_id: Uuid) -> Result<Step> {
    let row = sqlx::query(
        r#"
        SELECT guid, name, description, step_order
        FROM recipe_steps
        WHERE recipe_id = ? AND guid = ?
        "#,
    )
    .bind(recipe_id.to_string())
    .bind(step_id.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => step_from_row(&row),
        None => Err(Error::step_not_found()),
    }
}

/// Replace a step's name and description in place
///
/// `id` and `order` are untouched. Re-sending identical content still
/// matches the row and succeeds.
pub async fn update_step(
    pool: &SqlitePool,
    recipe_id: Uuid,
    step_id: Uuid,
    name: &str,
    description: &str,
) -> Result<StepContent> {
    let (name, description) = validate_step(name, description)?;

    let result = sqlx::query(
        r#"
        UPDATE recipe_steps
        SET name = ?, description = ?
        WHERE recipe_id = ? AND guid = ?
        "#,
    )
    .bind(&name)
    .bind(&description)
    .bind(recipe_id.to_string())
    .bind(step_id.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::step_not_found());
    }

    Ok(StepContent { name, description })
}

/// Remove a step from its recipe
pub async fn delete_step(pool: &SqlitePool, recipe_id: Uuid, step_id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM recipe_steps WHERE recipe_id = ? AND guid = ?")
        .bind(recipe_id.to_string())
        .bind(step_id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::step_not_found());
    }

    Ok(())
}

/// Insert a step with a caller-chosen order (seed import)
pub async fn insert_step_with_order(
    executor: impl SqliteExecutor<'_>,
    recipe_id: Uuid,
    order: i64,
    name: &str,
    description: &str,
) -> Result<Step> {
    let (name, description) = validate_step(name, description)?;
    let step_id = uuid_utils::generate();

    sqlx::query(
        r#"
        INSERT INTO recipe_steps (guid, recipe_id, step_order, name, description)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(step_id.to_string())
    .bind(recipe_id.to_string())
    .bind(order)
    .bind(&name)
    .bind(&description)
    .execute(executor)
    .await?;

    Ok(Step {
        id: step_id,
        name,
        description,
        order,
    })
}

fn step_from_row(row: &SqliteRow) -> Result<Step> {
    let guid: String = row.get("guid");
    Ok(Step {
        id: Uuid::parse_str(&guid)
            .map_err(|e| Error::Internal(format!("Corrupt step id {}: {}", guid, e)))?,
        name: row.get("name"),
        description: row.get("description"),
        order: row.get("step_order"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cocina_common::db::init::init_memory_database;
    use cocina_common::ValidationError;

    async fn setup() -> (SqlitePool, Uuid) {
        let pool = init_memory_database()
            .await
            .expect("Failed to create in-memory database");
        let recipe_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO recipes (guid, name, name_key, description, ingredients, category, difficulty, preparation_time)
             VALUES (?, 'Tarta', 'tarta', 'Una descripción suficientemente larga', 'huevos', 'postre', 'facil', 30)",
        )
        .bind(recipe_id.to_string())
        .execute(&pool)
        .await
        .unwrap();
        (pool, recipe_id)
    }

    #[tokio::test]
    async fn test_add_then_get_roundtrip() {
        let (pool, recipe_id) = setup().await;

        let created = add_step(&pool, recipe_id, " Mezclar ", "Mezclar todo").await.unwrap();
        assert_eq!(created.order, 1);
        assert_eq!(created.name, "Mezclar");

        let loaded = get_step(&pool, recipe_id, created.id).await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_order_is_count_plus_one_and_not_renumbered() {
        let (pool, recipe_id) = setup().await;

        let first = add_step(&pool, recipe_id, "Uno", "Primero").await.unwrap();
        let second = add_step(&pool, recipe_id, "Dos", "Segundo").await.unwrap();
        assert_eq!((first.order, second.order), (1, 2));

        delete_step(&pool, recipe_id, first.id).await.unwrap();

        let steps = load_steps(&pool, recipe_id).await.unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].order, 2, "Remaining step keeps its order");

        // One step left, so the next order is 2 again
        let third = add_step(&pool, recipe_id, "Tres", "Tercero").await.unwrap();
        assert_eq!(third.order, 2);

        let steps = load_steps(&pool, recipe_id).await.unwrap();
        let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dos", "Tres"], "Display order is insertion order");
    }

    #[tokio::test]
    async fn test_add_to_missing_recipe_is_not_found() {
        let (pool, _) = setup().await;
        let err = add_step(&pool, Uuid::new_v4(), "Mezclar", "Mezclar todo").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let (pool, recipe_id) = setup().await;

        let err = add_step(&pool, recipe_id, "  ", "Mezclar todo").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::BlankStepFields)));

        let step = add_step(&pool, recipe_id, "Mezclar", "Mezclar todo").await.unwrap();
        let err = update_step(&pool, recipe_id, step.id, "Mezclar", "").await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::BlankStepFields)));
    }

    #[tokio::test]
    async fn test_update_is_idempotent_and_keeps_order() {
        let (pool, recipe_id) = setup().await;
        add_step(&pool, recipe_id, "Uno", "Primero").await.unwrap();
        let step = add_step(&pool, recipe_id, "Dos", "Segundo").await.unwrap();

        let first = update_step(&pool, recipe_id, step.id, "Batir", "Batir fuerte").await.unwrap();
        let second = update_step(&pool, recipe_id, step.id, "Batir", "Batir fuerte").await.unwrap();
        assert_eq!(first, second);

        let loaded = get_step(&pool, recipe_id, step.id).await.unwrap();
        assert_eq!(loaded.name, "Batir");
        assert_eq!(loaded.description, "Batir fuerte");
        assert_eq!(loaded.order, 2);
        assert_eq!(load_steps(&pool, recipe_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_recipe_touches_nothing() {
        let (pool, recipe_id) = setup().await;
        let step = add_step(&pool, recipe_id, "Mezclar", "Mezclar todo").await.unwrap();
        let other_recipe = Uuid::new_v4();

        assert!(matches!(
            delete_step(&pool, other_recipe, step.id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            update_step(&pool, other_recipe, step.id, "X", "Y").await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            get_step(&pool, other_recipe, step.id).await,
            Err(Error::NotFound(_))
        ));

        let loaded = get_step(&pool, recipe_id, step.id).await.unwrap();
        assert_eq!(loaded.name, "Mezclar");
    }
}
