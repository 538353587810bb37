use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::catalog::PublicAccountList,
    error::AppResult,
    response::ApiResponse,
    routes::params::Pagination,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_accounts))
}

#[utoipa::path(
    get,
    path = "/api/streaming-accounts",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "List active catalog accounts", body = ApiResponse<PublicAccountList>)
    ),
    tag = "Catalog"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<PublicAccountList>>> {
    let resp = catalog_service::list_public(&state, pagination).await?;
    Ok(Json(resp))
}
