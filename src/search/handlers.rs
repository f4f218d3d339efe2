use super::filter::compile_filters;
use super::index::ProductIndex;
use super::types::{ErrorResponse, SearchEnvelope, SearchQuery};
use crate::translation::client::QueryTranslator;
use crate::translation::normalizer::normalize;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub const ENDPOINT_PRODUCTS: &str = "/api/products";

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_LIMIT: u32 = 20;

/// Shared, immutable handles to the two external services.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn QueryTranslator>,
    pub index: Arc<dyn ProductIndex>,
}

/// Builds the HTTP router. CORS is open because the frontend is served from another origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ENDPOINT_PRODUCTS, get(handle_products))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Query string of `GET /api/products`.
///
/// `page` and `limit` are taken as text so a malformed value falls back to its default
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("search failed: {0:#}")]
    Search(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Details stay in the server log.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                message: "Server error".to_string(),
            }),
        )
            .into_response()
    }
}

pub async fn handle_products(
    State(state): State<AppState>,
    Query(params): Query<ProductsParams>,
) -> Result<Json<SearchEnvelope>, ApiError> {
    let raw_query = params.q.unwrap_or_default();
    let page = parse_page(params.page.as_deref());
    let hits_per_page = parse_limit(params.limit.as_deref());

    let normalized = normalize(state.translator.as_ref(), &raw_query).await;
    let query = SearchQuery {
        filters: compile_filters(&normalized.filters),
        keywords: normalized.keywords,
        page,
        hits_per_page,
    };

    match state.index.search(&query).await {
        Ok(envelope) => Ok(Json(envelope)),
        Err(err) => {
            tracing::error!("Error in {}: {:#}", ENDPOINT_PRODUCTS, err);
            Err(ApiError::Search(err))
        }
    }
}

pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .and_then(|page| u32::try_from(page).ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// A zero limit means "default", as does anything unparseable.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .and_then(|limit| u32::try_from(limit).ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

/// Reads the integer at the start of `raw`, ignoring anything after it: `"2abc"` and
/// `"1.5"` both read as their leading digits.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    let sign_len = trimmed.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    trimmed[..sign_len + digits].parse().ok()
}
