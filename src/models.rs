use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const SALE_TYPE_FULL: &str = "FULL";
pub const SALE_TYPE_PROFILES: &str = "PROFILES";

pub const ORDER_STATUS_PENDING: &str = "PENDING";

/// Placeholder credential issued when a FULL account has no login loaded yet;
/// the admin replaces it out of band before the buyer is notified.
pub const PENDING_EMAIL: &str = "pending@admin.com";
pub const PENDING_PASSWORD: &str = "pending";

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: String,
    /// Wallet balance in credit hundredths (9.99 credits = 999).
    pub credits: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamingType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Full catalog row, including the shared login. Only admin endpoints and
/// purchase receipts ever serialize this; the public catalog uses
/// `dto::catalog::StreamingAccountPublic`.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamingAccount {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in credit hundredths.
    pub price: i64,
    pub type_id: Uuid,
    pub duration: Option<String>,
    pub quality: Option<String>,
    pub screens: i32,
    pub active: bool,
    pub image: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub sale_type: String,
    pub price_per_profile: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: Uuid,
    pub streaming_account_id: Uuid,
    pub profile_name: String,
    pub profile_pin: Option<String>,
    pub is_available: bool,
    pub sold_to_user_id: Option<Uuid>,
    pub sold_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Always equals the sum of price_at_time * quantity over the items;
    /// recomputed from the rows after every mutation.
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub streaming_account_id: Uuid,
    pub quantity: i32,
    pub sale_type: String,
    /// Catalog price captured when the line was added; checkout never
    /// re-reads the catalog.
    pub price_at_time: i64,
    pub created_at: DateTime<Utc>,
}

/// Immutable receipt for one purchased unit. A cart line of quantity N
/// produces N of these.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub streaming_account_id: Uuid,
    pub account_email: String,
    pub account_password: String,
    pub profile_name: Option<String>,
    pub sale_type: String,
    pub quantity: i32,
    pub total_price: i64,
    /// PENDING | COMPLETED | CANCELLED | EXPIRED
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecharge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub method: String,
    pub reference: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
