use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        MessageResponse,
        admin::{CreateTypeRequest, TypeList, TypeResponse, UpdateTypeRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::type_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_types).post(create_type))
        .route("/{id}", axum::routing::put(update_type).delete(delete_type))
}

#[utoipa::path(
    get,
    path = "/api/admin/streaming-types",
    responses(
        (status = 200, description = "All streaming types with account counts", body = TypeList),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_types(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<TypeList>> {
    let resp = type_service::list_types(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/streaming-types",
    request_body = CreateTypeRequest,
    responses(
        (status = 200, description = "Type created", body = TypeResponse),
        (status = 400, description = "Missing or duplicate name"),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTypeRequest>,
) -> AppResult<Json<TypeResponse>> {
    let resp = type_service::create_type(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/streaming-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Type ID")
    ),
    request_body = UpdateTypeRequest,
    responses(
        (status = 200, description = "Type updated", body = TypeResponse),
        (status = 400, description = "Missing or duplicate name"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Type not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTypeRequest>,
) -> AppResult<Json<TypeResponse>> {
    let resp = type_service::update_type(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/streaming-types/{id}",
    params(
        ("id" = Uuid, Path, description = "Type ID")
    ),
    responses(
        (status = 200, description = "Type deleted", body = MessageResponse),
        (status = 400, description = "Accounts still reference this type"),
        (status = 401, description = "Not an admin"),
        (status = 404, description = "Type not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_type(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = type_service::delete_type(&state, &user, id).await?;
    Ok(Json(resp))
}
