use axum::{Json, Router, extract::State, routing::get, routing::post};

use crate::{
    dto::admin::{RechargeRequest, RechargeResponse, UserList},
    error::AppResult,
    middleware::auth::AuthUser,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/recharges", post(recharge_credits))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users with order and recharge counts", body = UserList),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserList>> {
    let resp = admin_service::list_users(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/users/recharges",
    request_body = RechargeRequest,
    responses(
        (status = 200, description = "Credits added", body = RechargeResponse),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recharge_credits(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RechargeRequest>,
) -> AppResult<Json<RechargeResponse>> {
    let resp = admin_service::recharge_credits(&state, &user, payload).await?;
    Ok(Json(resp))
}
