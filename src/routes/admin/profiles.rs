use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::{
        MessageResponse,
        admin::{CreateProfileRequest, ProfileList, ProfileResponse, UpdateProfileRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::profile_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub account_id: Option<Uuid>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_profiles).post(create_profile))
        .route(
            "/{id}",
            axum::routing::put(update_profile).delete(delete_profile),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/profiles",
    params(
        ("accountId" = Option<Uuid>, Query, description = "Filter by streaming account")
    ),
    responses(
        (status = 200, description = "Profiles with account and buyer context", body = ProfileList),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_profiles(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProfileQuery>,
) -> AppResult<Json<ProfileList>> {
    let resp = profile_service::list_profiles(&state, &user, query.account_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Invalid data or duplicate profile"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Account not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let resp = profile_service::create_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Profile already sold"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Profile not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let resp = profile_service::update_profile(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 400, description = "Profile already sold"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Profile not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = profile_service::delete_profile(&state, &user, id).await?;
    Ok(Json(resp))
}
