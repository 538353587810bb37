use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub streaming_account_id: Uuid,
    pub quantity: i32,
    pub sale_type: String,
}

/// Catalog summary embedded in each cart line. Never carries the shared
/// login; that is only issued on the order receipt.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartAccountView {
    pub id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    pub image: Option<String>,
    pub screens: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: Uuid,
    pub quantity: i32,
    pub sale_type: String,
    pub price_at_time: i64,
    pub created_at: DateTime<Utc>,
    pub streaming_account: CartAccountView,
}

/// `GET /api/cart` body. A user with no cart row gets the empty shape,
/// never a 404.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_amount: i64,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_amount: 0,
        }
    }
}
