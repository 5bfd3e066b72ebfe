//! CRUD routes for one resource: `/<name>` and `/<name>/:id`.

use crate::handlers::resource::{create, delete, list, read, update};
use crate::model::Resource;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes<R: Resource>(state: AppState) -> Router {
    Router::new()
        .route(&format!("/{}", R::NAME), get(list::<R>).post(create::<R>))
        .route(
            &format!("/{}/:id", R::NAME),
            get(read::<R>).put(update::<R>).delete(delete::<R>),
        )
        .with_state(state)
}
