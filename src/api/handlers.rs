//! API Handlers
//!
//! HTTP request handlers for each image cache endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::SharedImageCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::loader::ImageCache;
use crate::models::requests::validate_key;
use crate::models::{HealthResponse, StatsResponse, StoreImageQuery, StoreResponse};

pub const X_IMAGE_WIDTH: HeaderName = HeaderName::from_static("x-image-width");
pub const X_IMAGE_HEIGHT: HeaderName = HeaderName::from_static("x-image-height");
pub const X_IMAGE_FORMAT: HeaderName = HeaderName::from_static("x-image-format");

/// Application state shared across all handlers.
///
/// Holds a handle to the one cache this server owns; the handle serializes
/// access internally.
#[derive(Clone)]
pub struct AppState {
    /// Shared image cache
    pub cache: SharedImageCache,
    /// Largest accepted upload body in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: SharedImageCache) -> Self {
        Self {
            cache,
            max_upload_bytes: Config::default().max_upload_bytes,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Resolves the configured capacity policy once to size the cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = SharedImageCache::with_policy(config.capacity_policy().as_ref())?;
        Ok(Self {
            cache,
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}

/// Handler for PUT /images/:key
///
/// Stores the raw pixel body as an image of the shape given in the query.
pub async fn store_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<StoreImageQuery>,
    body: Bytes,
) -> Result<Json<StoreResponse>> {
    validate_key(&key)?;

    let image = query.into_image(body.to_vec())?;
    let byte_size = image.byte_size();
    let outcome = state.cache.put(key.clone(), Arc::new(image))?;

    Ok(Json(StoreResponse::new(
        key,
        byte_size,
        outcome.cached,
        outcome.cache_bytes,
    )))
}

/// Handler for GET /images/:key
///
/// Returns the raw pixels, with shape and format in `x-image-*` headers.
pub async fn fetch_image_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response> {
    let image = state
        .cache
        .fetch(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (X_IMAGE_WIDTH, image.width().to_string()),
        (X_IMAGE_HEIGHT, image.height().to_string()),
        (X_IMAGE_FORMAT, image.format().to_string()),
    ];

    Ok((headers, Bytes::copy_from_slice(image.pixels())).into_response())
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
