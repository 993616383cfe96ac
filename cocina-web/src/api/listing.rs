//! Catalog listing
//!
//! `GET /?page&search&category&format`. With `format=json` the response is
//! the infinite-scroll fragment `{recipes, nextPage}` and never HTML;
//! otherwise the full index page is rendered.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use cocina_common::Recipe;
use serde::{Deserialize, Serialize};

use super::error::{ApiError, PageError};
use crate::db::ListFilter;
use crate::pagination::parse_page;
use crate::views::{render, IndexPage, View};
use crate::AppState;

/// Query parameters for the listing
///
/// Kept as raw strings so a malformed `page` falls back to 1 instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub format: Option<String>,
}

impl ListingQuery {
    fn wants_json(&self) -> bool {
        self.format.as_deref() == Some("json")
    }
}

/// Infinite-scroll fragment
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub recipes: Vec<Recipe>,
    pub next_page: Option<i64>,
}

/// GET /
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Response {
    let page = parse_page(query.page.as_deref());
    let filter = ListFilter::new(query.search.as_deref(), query.category.as_deref());
    let result = state.recipes.list_page(&filter, page).await;

    if query.wants_json() {
        return match result {
            Ok(listing) => Json(ListingResponse {
                next_page: listing.pagination.next_page(),
                recipes: listing.items,
            })
            .into_response(),
            Err(e) => ApiError::from(e).into_response(),
        };
    }

    match result {
        Ok(listing) => Html(render(View::Index(IndexPage {
            recipes: &listing.items,
            total_count: listing.total_count,
            pagination: listing.pagination,
            search: filter.search.as_deref(),
            category: filter.category.as_deref(),
        })))
        .into_response(),
        Err(e) => PageError(e).into_response(),
    }
}
