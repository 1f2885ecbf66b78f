//! HTTP/REST transport
//!
//! | method | path                                  |
//! |--------|---------------------------------------|
//! | GET    | `/items?lat=&lng=&radius=`            |
//! | POST   | `/items`                              |
//! | GET    | `/items/:id`                          |
//! | PUT    | `/items/:id`                          |
//! | DELETE | `/items/:id`                          |
//! | GET    | `/items/optimize?capacity=`           |
//! | GET    | `/items/optimize/geojson?capacity=`   |
//! | GET    | `/health`                             |

use crate::handler::{self, AppState};
use axum::Router;
use axum::routing::get;
use geotrip::ItemService;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Builds the item API router over a shared service.
pub fn router(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/health", get(handler::health))
        .route(
            "/items",
            get(handler::list_items).post(handler::create_item),
        )
        .route("/items/optimize", get(handler::optimize_trips))
        .route(
            "/items/optimize/geojson",
            get(handler::optimize_trips_geojson),
        )
        .route(
            "/items/:id",
            get(handler::get_item)
                .put(handler::update_item)
                .delete(handler::delete_item),
        )
        .with_state(AppState::new(service))
}

/// Serve the item API on `listener` until `shutdown` resolves.
pub async fn run_server(
    listener: TcpListener,
    service: Arc<ItemService>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    info!("geotrip HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}
