use crate::model::{Resource, TableSpec};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Firstname of the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Lastname of the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

pub struct UserResource;

impl Resource for UserResource {
    const NAME: &'static str = "user";
    const TAG: &'static str = "User";
    const ID_KEY: &'static str = "userid";
    const TABLE: TableSpec = TableSpec {
        name: "user",
        primary_key: "id",
        columns: &["firstName", "lastName"],
    };
    type Payload = User;
}
