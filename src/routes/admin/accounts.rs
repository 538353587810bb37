use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        MessageResponse,
        catalog::{AccountList, CreateAccountRequest, UpdateAccountRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::StreamingAccount,
    response::ApiResponse,
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/{id}", axum::routing::put(update_account).delete(delete_account))
}

#[utoipa::path(
    get,
    path = "/api/admin/streaming-accounts",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "All catalog accounts including credentials", body = ApiResponse<AccountList>),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AccountList>>> {
    let resp = catalog_service::list_all(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/streaming-accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = StreamingAccount),
        (status = 400, description = "Invalid data"),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_account(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> AppResult<Json<StreamingAccount>> {
    let account = catalog_service::create_account(&state, &user, payload).await?;
    Ok(Json(account))
}

#[utoipa::path(
    put,
    path = "/api/admin/streaming-accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated", body = StreamingAccount),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Account not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAccountRequest>,
) -> AppResult<Json<StreamingAccount>> {
    let account = catalog_service::update_account(&state, &user, id, payload).await?;
    Ok(Json(account))
}

#[utoipa::path(
    delete,
    path = "/api/admin/streaming-accounts/{id}",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Account not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = catalog_service::delete_account(&state, &user, id).await?;
    Ok(Json(resp))
}
