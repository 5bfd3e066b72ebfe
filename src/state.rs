//! Shared application state for all routes.

use crate::store::Store;
use std::sync::Arc;
use utoipa::openapi::OpenApi;

#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; the only shared resource between handlers.
    pub store: Arc<dyn Store>,
    pub api_doc: Arc<OpenApi>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, public_url: &str) -> Self {
        AppState {
            store,
            api_doc: Arc::new(crate::openapi::api_doc(public_url)),
        }
    }
}
