use crate::model::{lenient_number, lenient_text, Resource, TableSpec};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Product fields as submitted on create and update.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Title of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Image of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Price of the product
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
    /// Company of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Info of the product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// InCart of the product, stored as text
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub in_cart: Option<String>,
    /// Count of the product
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>)]
    pub count: Option<Value>,
    /// Total of the product
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<f64>)]
    pub total: Option<Value>,
}

pub struct ProductResource;

impl Resource for ProductResource {
    const NAME: &'static str = "product";
    const TAG: &'static str = "Product";
    const ID_KEY: &'static str = "id";
    const TABLE: TableSpec = TableSpec {
        name: "product",
        primary_key: "id",
        columns: &[
            "title", "image", "price", "company", "info", "inCart", "count", "total",
        ],
    };
    type Payload = Product;
}
