use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    db::DbPool,
    dto::{
        MessageResponse,
        cart::{AddToCartRequest, CartAccountView, CartItemView, CartView},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Cart, CartItem, SALE_TYPE_FULL, SALE_TYPE_PROFILES, StreamingAccount},
};

#[derive(FromRow)]
struct CartItemWithAccountRow {
    item_id: Uuid,
    quantity: i32,
    sale_type: String,
    price_at_time: i64,
    item_created_at: DateTime<Utc>,
    account_id: Uuid,
    account_name: String,
    type_id: Uuid,
    image: Option<String>,
    screens: i32,
}

pub async fn get_cart(pool: &DbPool, user: &AuthUser) -> AppResult<CartView> {
    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;

    let cart = match cart {
        Some(c) => c,
        None => return Ok(CartView::empty()),
    };

    let rows = sqlx::query_as::<_, CartItemWithAccountRow>(
        r#"
        SELECT ci.id AS item_id, ci.quantity, ci.sale_type, ci.price_at_time,
               ci.created_at AS item_created_at,
               sa.id AS account_id, sa.name AS account_name, sa.type_id, sa.image, sa.screens
        FROM cart_items ci
        JOIN streaming_accounts sa ON sa.id = ci.streaming_account_id
        WHERE ci.cart_id = $1
        ORDER BY ci.created_at ASC
        "#,
    )
    .bind(cart.id)
    .fetch_all(pool)
    .await?;

    let items = rows
        .into_iter()
        .map(|row| CartItemView {
            id: row.item_id,
            quantity: row.quantity,
            sale_type: row.sale_type,
            price_at_time: row.price_at_time,
            created_at: row.item_created_at,
            streaming_account: CartAccountView {
                id: row.account_id,
                name: row.account_name,
                type_id: row.type_id,
                image: row.image,
                screens: row.screens,
            },
        })
        .collect();

    Ok(CartView {
        items,
        total_amount: cart.total_amount,
    })
}

pub async fn add_to_cart(
    pool: &DbPool,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<MessageResponse> {
    if payload.quantity < 1 {
        return Err(AppError::BadRequest("Datos inválidos".to_string()));
    }
    validate_sale_type(&payload.sale_type)?;

    let account: Option<StreamingAccount> =
        sqlx::query_as("SELECT * FROM streaming_accounts WHERE id = $1")
            .bind(payload.streaming_account_id)
            .fetch_optional(pool)
            .await?;
    let account = match account {
        Some(a) => a,
        None => return Err(AppError::NotFound("Cuenta no encontrada".to_string())),
    };

    // Price lock: the line carries the catalog price as of now; checkout
    // never re-reads it.
    let price_at_time = if payload.sale_type == SALE_TYPE_PROFILES {
        account.price_per_profile.unwrap_or(account.price)
    } else {
        account.price
    };

    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;
    let cart = match cart {
        Some(c) => c,
        None => {
            sqlx::query_as(
                "INSERT INTO carts (id, user_id, total_amount) VALUES ($1, $2, 0) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(user.user_id)
            .fetch_one(pool)
            .await?
        }
    };

    let existing: Option<CartItem> = sqlx::query_as(
        "SELECT * FROM cart_items WHERE cart_id = $1 AND streaming_account_id = $2 AND sale_type = $3",
    )
    .bind(cart.id)
    .bind(account.id)
    .bind(payload.sale_type.as_str())
    .fetch_optional(pool)
    .await?;

    if let Some(item) = existing {
        // Same (account, saleType) line: quantities merge, the original
        // locked price stands.
        sqlx::query("UPDATE cart_items SET quantity = quantity + $2 WHERE id = $1")
            .bind(item.id)
            .bind(payload.quantity)
            .execute(pool)
            .await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, cart_id, streaming_account_id, quantity, sale_type, price_at_time)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(cart.id)
        .bind(account.id)
        .bind(payload.quantity)
        .bind(payload.sale_type.as_str())
        .bind(price_at_time)
        .execute(pool)
        .await?;
    }

    recompute_cart_total(pool, cart.id).await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_add",
        Some("cart_items"),
        Some(serde_json::json!({
            "streaming_account_id": account.id,
            "quantity": payload.quantity,
            "sale_type": payload.sale_type,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(MessageResponse::new("Producto agregado al carrito"))
}

pub async fn remove_from_cart(
    pool: &DbPool,
    user: &AuthUser,
    item_id: Uuid,
) -> AppResult<MessageResponse> {
    let cart: Option<Cart> = sqlx::query_as("SELECT * FROM carts WHERE user_id = $1")
        .bind(user.user_id)
        .fetch_optional(pool)
        .await?;
    let cart = match cart {
        Some(c) => c,
        None => return Err(AppError::NotFound("Carrito no encontrado".to_string())),
    };

    let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND cart_id = $2")
        .bind(item_id)
        .bind(cart.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Item no encontrado".to_string()));
    }

    recompute_cart_total(pool, cart.id).await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.user_id),
        "cart_remove",
        Some("cart_items"),
        Some(serde_json::json!({ "cart_item_id": item_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(MessageResponse::new("Item eliminado del carrito"))
}

/// The stored total is always rebuilt from the rows, never adjusted
/// incrementally.
async fn recompute_cart_total(pool: &DbPool, cart_id: Uuid) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE carts
        SET total_amount = COALESCE(
                (SELECT SUM(price_at_time * quantity) FROM cart_items WHERE cart_id = $1),
                0
            ),
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(cart_id)
    .execute(pool)
    .await?;

    Ok(())
}

fn validate_sale_type(sale_type: &str) -> Result<(), AppError> {
    const VALID: [&str; 2] = [SALE_TYPE_FULL, SALE_TYPE_PROFILES];
    if VALID.contains(&sale_type) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Datos inválidos".to_string()))
    }
}
