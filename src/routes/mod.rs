pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::model::{ProductResource, UserResource};
use crate::state::AppState;
use crate::telemetry::access_log;
use axum::{middleware, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request bodies above this size are rejected with 413.
pub const BODY_LIMIT: usize = 100 * 1024;

/// Full application: common routes plus CRUD for every resource.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(resource_routes::<ProductResource>(state.clone()))
        .merge(resource_routes::<UserResource>(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(access_log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::telemetry::capture::Captured;
    use axum::{body::Body, http::Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn requests_are_traced_at_info() {
        let router = app(AppState::new(Arc::new(MemoryStore::new()), "http://localhost"));
        let captured = Captured::default();
        let _guard = tracing::subscriber::set_default(captured.subscriber(Level::INFO));
        let req = Request::builder().uri("/user").body(Body::empty()).unwrap();
        router.oneshot(req).await.unwrap();

        let log = captured.text();
        assert!(log.contains("finished processing request"), "{log}");
        assert!(log.contains("status=200"), "{log}");
    }
}
