use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{ActiveModelTrait, EntityTrait, QuerySelect, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::admin::{AdminUserView, RechargeRequest, RechargeResponse, StatsResponse, UserList},
    entity::{
        credit_recharges::{ActiveModel as RechargeActive, Model as RechargeModel},
        users::{ActiveModel as UserActive, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::CreditRecharge,
    state::AppState,
};

pub async fn list_users(state: &AppState, user: &AuthUser) -> AppResult<UserList> {
    ensure_admin(user)?;

    let items = sqlx::query_as::<_, AdminUserView>(
        r#"
        SELECT u.id, u.email, u.name, u.role, u.credits, u.created_at,
               (SELECT COUNT(*) FROM orders o WHERE o.user_id = u.id) AS orders_count,
               (SELECT COUNT(*) FROM credit_recharges r WHERE r.user_id = u.id) AS recharges_count
        FROM users u
        ORDER BY u.created_at DESC
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(UserList { items })
}

/// Books an immutable COMPLETED recharge row and credits the wallet in the
/// same transaction. There is no idempotency key: replaying the request
/// credits again, which is the accepted behavior for this internal tool.
pub async fn recharge_credits(
    state: &AppState,
    user: &AuthUser,
    payload: RechargeRequest,
) -> AppResult<RechargeResponse> {
    ensure_admin(user)?;

    if payload.amount <= 0 {
        return Err(AppError::BadRequest("Datos inválidos".to_string()));
    }

    let txn = state.orm.begin().await?;

    let target = Users::find_by_id(payload.user_id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let target = match target {
        Some(u) => u,
        None => return Err(AppError::NotFound("Usuario no encontrado".to_string())),
    };

    let recharge = RechargeActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(target.id),
        amount: Set(payload.amount),
        method: Set(payload
            .method
            .unwrap_or_else(|| "Administración".to_string())),
        reference: Set(payload.reference),
        status: Set("COMPLETED".to_string()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let new_credits = target.credits + payload.amount;
    let mut active: UserActive = target.into();
    active.credits = Set(new_credits);
    active.updated_at = Set(Utc::now().into());
    active.update(&txn).await?;

    txn.commit().await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "credit_recharge",
        Some("credit_recharges"),
        Some(serde_json::json!({
            "recharge_id": recharge.id,
            "user_id": recharge.user_id,
            "amount": recharge.amount,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(RechargeResponse {
        message: "Créditos recargados exitosamente".to_string(),
        recharge: recharge_from_entity(recharge),
        credits: new_credits,
    })
}

pub async fn get_stats(state: &AppState, user: &AuthUser) -> AppResult<StatsResponse> {
    ensure_admin(user)?;

    let total_users: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&state.pool)
        .await?;
    let total_orders: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&state.pool)
        .await?;
    let total_revenue: (i64,) =
        sqlx::query_as("SELECT COALESCE(SUM(total_price), 0)::BIGINT FROM orders")
            .fetch_one(&state.pool)
            .await?;
    let active_accounts: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM streaming_accounts WHERE active = true")
            .fetch_one(&state.pool)
            .await?;

    Ok(StatsResponse {
        total_users: total_users.0,
        total_orders: total_orders.0,
        total_revenue: total_revenue.0,
        active_accounts: active_accounts.0,
    })
}

fn recharge_from_entity(model: RechargeModel) -> CreditRecharge {
    CreditRecharge {
        id: model.id,
        user_id: model.user_id,
        amount: model.amount,
        method: model.method,
        reference: model.reference,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
