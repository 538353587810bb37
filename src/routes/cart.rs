use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        MessageResponse,
        cart::{AddToCartRequest, CartView},
        orders::CheckoutResponse,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    services::{cart_service, order_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart))
        .route("/checkout", post(checkout))
        .route("/{item_id}", delete(remove_from_cart))
}

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current user's cart; empty shape when no cart exists", body = CartView)
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<CartView>> {
    let cart = cart_service::get_cart(&state.pool, &user).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Line added or merged", body = MessageResponse),
        (status = 400, description = "Invalid quantity or sale type"),
        (status = 404, description = "Account not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<MessageResponse>> {
    let resp = cart_service::add_to_cart(&state.pool, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/checkout",
    responses(
        (status = 200, description = "One order per purchased unit", body = CheckoutResponse),
        (status = 400, description = "Empty cart, insufficient credits or insufficient profiles"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<CheckoutResponse>> {
    let resp = order_service::checkout(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{item_id}",
    params(
        ("item_id" = Uuid, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Line removed, total recomputed", body = MessageResponse),
        (status = 404, description = "Cart or item not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item_id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    let resp = cart_service::remove_from_cart(&state.pool, &user, item_id).await?;
    Ok(Json(resp))
}
