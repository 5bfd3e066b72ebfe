//! REST service exposing CRUD over the `product` and `user` tables through a
//! pooled MySQL connection, with a generated OpenAPI document.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{AppConfig, DbConfig};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{Product, ProductResource, Resource, TableSpec, User, UserResource};
pub use routes::{app, common_routes, resource_routes};
pub use state::AppState;
pub use store::{MemoryStore, MySqlStore, Store};
