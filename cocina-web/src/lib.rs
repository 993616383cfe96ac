//! cocina-web library - recipe catalog service
//!
//! Server-rendered pages plus JSON endpoints for the AJAX client. Recipes
//! own an ordered list of steps that are edited independently through the
//! recipe's step sub-routes.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use sqlx::SqlitePool;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod images;
pub mod pagination;
pub mod recipes;
pub mod seed;
pub mod views;

use images::{ImageStore, MAX_IMAGE_BYTES};
use recipes::RecipeRepository;

/// Room for the text fields and multipart framing on top of the image
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Recipe and step operations
    pub recipes: RecipeRepository,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, images: ImageStore) -> Self {
        Self {
            recipes: RecipeRepository::new(db.clone(), images),
            db,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let uploads = ServeDir::new(state.recipes.images().dir());

    let pages = Router::new()
        .route("/", get(api::list_recipes))
        .route(
            "/receta/nueva",
            get(api::new_recipe_form).post(api::create_recipe),
        )
        .route("/receta/:id", get(api::show_recipe))
        .route(
            "/receta/editar/:id",
            get(api::edit_recipe_form).post(api::update_recipe),
        )
        .route("/receta/borrar/:id", post(api::delete_recipe))
        .route("/receta/:id/paso/nuevo", post(api::add_step))
        .route(
            "/receta/:id/paso/editar/:step_id",
            get(api::edit_step_form).post(api::update_step),
        )
        .route("/receta/:id/paso/borrar/:step_id", post(api::delete_step))
        .route("/api/check-title", get(api::check_title));

    let assets = Router::new()
        .route("/static/app.js", get(api::serve_app_js))
        .route("/static/style.css", get(api::serve_style_css))
        .nest_service("/uploads", uploads)
        .merge(api::health_routes());

    Router::new()
        .merge(pages)
        .merge(assets)
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + FORM_OVERHEAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
