use chrono::{Duration, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CheckoutResponse, OrderList},
    entity::{
        account_profiles::{
            ActiveModel as ProfileActive, Column as ProfileCol, Entity as AccountProfiles,
        },
        cart_items::{Column as CartItemCol, Entity as CartItems},
        carts::{ActiveModel as CartActive, Column as CartCol, Entity as Carts},
        orders::{ActiveModel as OrderActive, Model as OrderModel},
        streaming_accounts::Entity as StreamingAccounts,
        users::{ActiveModel as UserActive, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{
        ORDER_STATUS_PENDING, Order, PENDING_EMAIL, PENDING_PASSWORD, SALE_TYPE_PROFILES,
    },
    state::AppState,
};

/// Converts every cart line into concrete inventory: FULL lines fan out into
/// one order per unit against the shared login, PROFILES lines claim specific
/// seats. The whole body runs in one transaction with row locks on the buyer
/// and the claimed profiles, so a failure on any line leaves nothing behind.
pub async fn checkout(state: &AppState, user: &AuthUser) -> AppResult<CheckoutResponse> {
    let txn = state.orm.begin().await?;

    let cart = Carts::find()
        .filter(CartCol::UserId.eq(user.user_id))
        .one(&txn)
        .await?;
    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::BadRequest("Carrito vacío".to_string())),
    };

    let items = CartItems::find()
        .filter(CartItemCol::CartId.eq(cart.id))
        .order_by_asc(CartItemCol::CreatedAt)
        .all(&txn)
        .await?;

    if items.is_empty() {
        return Err(AppError::BadRequest("Carrito vacío".to_string()));
    }

    let buyer = Users::find_by_id(user.user_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let buyer = match buyer {
        Some(u) => u,
        None => return Err(AppError::NotFound("Usuario no encontrado".to_string())),
    };

    if buyer.credits < cart.total_amount {
        return Err(AppError::BadRequest("Créditos insuficientes".to_string()));
    }

    let now = Utc::now();
    let expires_at = now + Duration::days(30);
    let buyer_id = buyer.id;
    let remaining_credits = buyer.credits - cart.total_amount;

    let mut orders: Vec<Order> = Vec::new();

    for item in &items {
        let account = StreamingAccounts::find_by_id(item.streaming_account_id)
            .one(&txn)
            .await?;
        let account = match account {
            Some(a) => a,
            None => return Err(AppError::NotFound("Cuenta no encontrada".to_string())),
        };

        let account_email = account
            .email
            .clone()
            .unwrap_or_else(|| PENDING_EMAIL.to_string());
        let account_password = account
            .password
            .clone()
            .unwrap_or_else(|| PENDING_PASSWORD.to_string());

        if item.sale_type == SALE_TYPE_PROFILES {
            let profiles = AccountProfiles::find()
                .filter(ProfileCol::StreamingAccountId.eq(account.id))
                .filter(ProfileCol::IsAvailable.eq(true))
                .order_by_asc(ProfileCol::CreatedAt)
                .limit(item.quantity as u64)
                .lock(LockType::Update)
                .all(&txn)
                .await?;

            if (profiles.len() as i32) < item.quantity {
                // Rolls the whole transaction back, including lines already
                // processed in this call.
                return Err(AppError::BadRequest(format!(
                    "No hay suficientes perfiles disponibles. Disponibles: {}",
                    profiles.len()
                )));
            }

            for profile in profiles {
                let order = OrderActive {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(buyer_id),
                    streaming_account_id: Set(account.id),
                    account_email: Set(account_email.clone()),
                    account_password: Set(account_password.clone()),
                    profile_name: Set(Some(profile.profile_name.clone())),
                    sale_type: Set(item.sale_type.clone()),
                    quantity: Set(1),
                    total_price: Set(item.price_at_time),
                    status: Set(ORDER_STATUS_PENDING.to_string()),
                    expires_at: Set(expires_at.into()),
                    created_at: NotSet,
                }
                .insert(&txn)
                .await?;

                let mut active: ProfileActive = profile.into();
                active.is_available = Set(false);
                active.sold_to_user_id = Set(Some(buyer_id));
                active.sold_at = Set(Some(now.into()));
                active.update(&txn).await?;

                orders.push(order_from_entity(order));
            }
        } else {
            // FULL sales never decrement inventory; the shared login is
            // resellable without limit.
            for _ in 0..item.quantity {
                let order = OrderActive {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(buyer_id),
                    streaming_account_id: Set(account.id),
                    account_email: Set(account_email.clone()),
                    account_password: Set(account_password.clone()),
                    profile_name: Set(None),
                    sale_type: Set(item.sale_type.clone()),
                    quantity: Set(1),
                    total_price: Set(item.price_at_time),
                    status: Set(ORDER_STATUS_PENDING.to_string()),
                    expires_at: Set(expires_at.into()),
                    created_at: NotSet,
                }
                .insert(&txn)
                .await?;

                orders.push(order_from_entity(order));
            }
        }
    }

    // Single debit at the end, against the row locked above.
    let total_amount = cart.total_amount;
    let mut buyer_active: UserActive = buyer.into();
    buyer_active.credits = Set(remaining_credits);
    buyer_active.updated_at = Set(now.into());
    buyer_active.update(&txn).await?;

    CartItems::delete_many()
        .filter(CartItemCol::CartId.eq(cart.id))
        .exec(&txn)
        .await?;

    let mut cart_active: CartActive = cart.into();
    cart_active.total_amount = Set(0);
    cart_active.updated_at = Set(now.into());
    cart_active.update(&txn).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(buyer_id),
        "checkout",
        Some("orders"),
        Some(serde_json::json!({
            "order_count": orders.len(),
            "total_amount": total_amount,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(CheckoutResponse {
        message: "Compra realizada exitosamente".to_string(),
        orders,
    })
}

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<OrderList> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(OrderList { orders })
}

fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        user_id: model.user_id,
        streaming_account_id: model.streaming_account_id,
        account_email: model.account_email,
        account_password: model.account_password,
        profile_name: model.profile_name,
        sale_type: model.sale_type,
        quantity: model.quantity,
        total_price: model.total_price,
        status: model.status,
        expires_at: model.expires_at.with_timezone(&Utc),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
