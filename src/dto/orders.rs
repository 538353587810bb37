use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Order;

/// `POST /api/cart/checkout` success body: one order row per purchased unit.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub message: String,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub orders: Vec<Order>,
}
