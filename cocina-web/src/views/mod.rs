//! Server-rendered HTML pages
//!
//! Every page is a pure function of its data. All user-supplied text goes
//! through [`escape`] before it reaches the markup.

mod detail;
mod error;
mod form;
mod index;
mod layout;
mod step;

use cocina_common::{Category, Difficulty, Recipe, Step};

use crate::pagination::Pagination;

pub use layout::layout;

/// Data for the catalog listing page
#[derive(Debug, Clone, Copy)]
pub struct IndexPage<'a> {
    pub recipes: &'a [Recipe],
    pub total_count: i64,
    pub pagination: Pagination,
    pub search: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// A page to render
#[derive(Debug, Clone, Copy)]
pub enum View<'a> {
    Index(IndexPage<'a>),
    Detail(&'a Recipe),
    NewRecipe,
    EditRecipe(&'a Recipe),
    EditStep { recipe: &'a Recipe, step: &'a Step },
    Error { status: u16, message: &'a str },
}

/// Render a full HTML document
pub fn render(view: View<'_>) -> String {
    match view {
        View::Index(page) => index::render(&page),
        View::Detail(recipe) => detail::render(recipe),
        View::NewRecipe => form::render(None),
        View::EditRecipe(recipe) => form::render(Some(recipe)),
        View::EditStep { recipe, step } => step::render(recipe, step),
        View::Error { status, message } => error::render(status, message),
    }
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Category highlight flags for the filter pills
///
/// Built from the fixed category list; an unknown active tag highlights
/// nothing.
pub fn category_flags(active: Option<&str>) -> Vec<(Category, bool)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, active == Some(c.as_str())))
        .collect()
}

/// Difficulty selection flags for the recipe form
pub fn difficulty_flags(selected: Option<Difficulty>) -> Vec<(Difficulty, bool)> {
    Difficulty::ALL
        .into_iter()
        .map(|d| (d, selected == Some(d)))
        .collect()
}
