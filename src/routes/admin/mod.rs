use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::admin::StatsResponse,
    error::AppResult,
    middleware::auth::AuthUser,
    services::admin_service,
    state::AppState,
};

pub mod accounts;
pub mod profiles;
pub mod types;
pub mod users;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/streaming-accounts", accounts::router())
        .nest("/streaming-types", types::router())
        .nest("/profiles", profiles::router())
        .nest("/users", users::router())
        .route("/stats", get(get_stats))
}

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Storefront totals", body = StatsResponse),
        (status = 401, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<StatsResponse>> {
    let resp = admin_service::get_stats(&state, &user).await?;
    Ok(Json(resp))
}
