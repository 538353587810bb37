use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::StreamingAccount;

/// Catalog row as served to storefront visitors: the shared `email` and
/// `password` columns stay out of the projection.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamingAccountPublic {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub type_id: Uuid,
    pub duration: Option<String>,
    pub quality: Option<String>,
    pub screens: i32,
    pub image: Option<String>,
    pub sale_type: String,
    pub price_per_profile: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub type_id: Uuid,
    pub duration: Option<String>,
    pub quality: Option<String>,
    pub screens: i32,
    pub active: Option<bool>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub sale_type: Option<String>,
    pub price_per_profile: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub type_id: Option<Uuid>,
    pub duration: Option<String>,
    pub quality: Option<String>,
    pub screens: Option<i32>,
    pub active: Option<bool>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub sale_type: Option<String>,
    pub price_per_profile: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PublicAccountList {
    #[schema(value_type = Vec<StreamingAccountPublic>)]
    pub items: Vec<StreamingAccountPublic>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AccountList {
    #[schema(value_type = Vec<StreamingAccount>)]
    pub items: Vec<StreamingAccount>,
}
