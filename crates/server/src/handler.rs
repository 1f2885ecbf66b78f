//! Request handlers for the item API

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use geotrip::{GeoTripError, ItemService};
use geotrip_types::point::ItemId;
use geotrip_types::record::{
    ItemPatch, ItemRecord, NearbyQuery, NewItem, OptimizeQuery, TripPlan,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    service: Arc<ItemService>,
}

impl AppState {
    pub fn new(service: Arc<ItemService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<ItemService> {
        &self.service
    }
}

/// Error returned by every handler, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GeoTripError> for ApiError {
    fn from(err: GeoTripError) -> Self {
        let status = match &err {
            GeoTripError::Validation(_) => StatusCode::BAD_REQUEST,
            GeoTripError::NotFound(_) => StatusCode::NOT_FOUND,
            GeoTripError::Config(_) | GeoTripError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("Request failed: {}", self.message);
        } else {
            debug!("Request rejected ({}): {}", self.status, self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

fn item_id(path: Result<Path<u64>, PathRejection>) -> ApiResult<ItemId> {
    let Path(id) = path?;
    Ok(ItemId(id))
}

/// `GET /items`: nearby search, or every item when the query is incomplete.
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<NearbyQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ItemRecord>>> {
    let Query(query) = query?;
    Ok(Json(state.service.nearby_search(&query)?))
}

pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ItemRecord>)> {
    let Json(item) = payload?;
    let record = state.service.create_item(item)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<ItemRecord>> {
    let id = item_id(path)?;
    Ok(Json(state.service.get_item(id)?))
}

pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> ApiResult<Json<ItemRecord>> {
    let id = item_id(path)?;
    let Json(patch) = payload?;
    Ok(Json(state.service.update_item(id, patch)?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = item_id(path)?;
    state.service.delete_item(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Runs a clustering job off the async workers.
async fn blocking<T, F>(state: AppState, job: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&ItemService) -> geotrip::Result<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || job(service.as_ref()))
        .await
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Optimization task failed: {}", e),
            )
        })?
        .map_err(ApiError::from)
}

pub async fn optimize_trips(
    State(state): State<AppState>,
    query: Result<Query<OptimizeQuery>, QueryRejection>,
) -> ApiResult<Json<TripPlan>> {
    let Query(query) = query?;
    let plan = blocking(state, move |service| service.optimize_trips(query.capacity)).await?;
    Ok(Json(plan))
}

pub async fn optimize_trips_geojson(
    State(state): State<AppState>,
    query: Result<Query<OptimizeQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let body = blocking(state, move |service| {
        service.optimize_trips_geojson(query.capacity)
    })
    .await?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body))
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "items": state.service.index().len(),
        "version": geotrip::VERSION,
    }))
}
