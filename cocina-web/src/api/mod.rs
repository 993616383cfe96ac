//! HTTP handlers for cocina-web

pub mod check_title;
pub mod envelope;
pub mod error;
pub mod forms;
pub mod health;
pub mod listing;
pub mod recipes;
pub mod steps;
pub mod ui;

pub use check_title::check_title;
pub use error::{ApiError, PageError};
pub use health::health_routes;
pub use listing::list_recipes;
pub use recipes::{
    create_recipe, delete_recipe, edit_recipe_form, new_recipe_form, show_recipe, update_recipe,
};
pub use steps::{add_step, delete_step, edit_step_form, update_step};
pub use ui::{serve_app_js, serve_style_css};
