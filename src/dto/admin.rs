use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{AccountProfile, CreditRecharge, StreamingType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeWithCount {
    #[serde(flatten)]
    pub streaming_type: StreamingType,
    pub accounts_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TypeList {
    #[schema(value_type = Vec<TypeWithCount>)]
    pub items: Vec<TypeWithCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TypeResponse {
    pub message: String,
    #[serde(rename = "type")]
    pub streaming_type: StreamingType,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub streaming_account_id: Uuid,
    pub profile_name: String,
    pub profile_pin: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
    pub profile_pin: Option<String>,
    pub is_available: Option<bool>,
}

/// Admin listing row: the profile plus its account and, when sold, the buyer.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: Uuid,
    pub streaming_account_id: Uuid,
    pub profile_name: String,
    pub profile_pin: Option<String>,
    pub is_available: bool,
    pub sold_to_user_id: Option<Uuid>,
    pub sold_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub account_name: String,
    pub sold_to_email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProfileList {
    #[schema(value_type = Vec<ProfileView>)]
    pub items: Vec<ProfileView>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub profile: AccountProfile,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RechargeRequest {
    pub user_id: Uuid,
    pub amount: i64,
    pub method: Option<String>,
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RechargeResponse {
    pub message: String,
    pub recharge: CreditRecharge,
    pub credits: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserView {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
    pub orders_count: i64,
    pub recharges_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<AdminUserView>)]
    pub items: Vec<AdminUserView>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_revenue: i64,
    pub active_accounts: i64,
}
