//! API router.
//!
//! Returns a composable `Router` with every endpoint under `/api/`.
//! Layers (outermost → innermost): CORS → request log → handler.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
/// `/profiles/active` is a static segment and wins over `/profiles/:id`.
pub fn api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/profiles",
            get(endpoints::profiles::list).post(endpoints::profiles::create),
        )
        .route(
            "/profiles/active",
            get(endpoints::profiles::active).put(endpoints::profiles::set_active),
        )
        .route(
            "/profiles/:id",
            get(endpoints::profiles::detail)
                .put(endpoints::profiles::update)
                .delete(endpoints::profiles::remove),
        )
        .route(
            "/profiles/:id/symptoms",
            get(endpoints::symptoms::list).post(endpoints::symptoms::create),
        )
        .route(
            "/symptoms/:id",
            put(endpoints::symptoms::update).delete(endpoints::symptoms::remove),
        )
        .route(
            "/profiles/:id/entries",
            get(endpoints::entries::list).post(endpoints::entries::create),
        )
        .route(
            "/profiles/:id/entries/bulk-delete",
            post(endpoints::entries::bulk_delete),
        )
        .route(
            "/entries/:id",
            get(endpoints::entries::detail)
                .put(endpoints::entries::update)
                .delete(endpoints::entries::remove),
        )
        .route("/profiles/:id/analysis", get(endpoints::analysis::report))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::request_log::log_request))
        .layer(CorsLayer::permissive())
}
