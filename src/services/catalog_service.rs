use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        MessageResponse,
        catalog::{
            AccountList, CreateAccountRequest, PublicAccountList, StreamingAccountPublic,
            UpdateAccountRequest,
        },
    },
    entity::streaming_accounts::{
        ActiveModel, Column, Entity as StreamingAccounts, Model as AccountModel,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{SALE_TYPE_FULL, SALE_TYPE_PROFILES, StreamingAccount},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Storefront listing: active accounts only, newest first, credentials
/// stripped.
pub async fn list_public(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<PublicAccountList>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = StreamingAccounts::find()
        .filter(Column::Active.eq(true))
        .order_by_desc(Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(public_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Cuentas",
        PublicAccountList { items },
        Some(meta),
    ))
}

pub async fn list_all(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AccountList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let finder = StreamingAccounts::find().order_by_desc(Column::CreatedAt);
    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(account_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Cuentas",
        AccountList { items },
        Some(meta),
    ))
}

pub async fn create_account(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAccountRequest,
) -> AppResult<StreamingAccount> {
    ensure_admin(user)?;

    if payload.name.trim().is_empty() || payload.price < 0 || payload.screens < 1 {
        return Err(AppError::BadRequest("Datos inválidos".to_string()));
    }

    let sale_type = payload
        .sale_type
        .unwrap_or_else(|| SALE_TYPE_FULL.to_string());
    validate_sale_type(&sale_type)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        type_id: Set(payload.type_id),
        duration: Set(payload.duration),
        quality: Set(payload.quality),
        screens: Set(payload.screens),
        active: Set(payload.active.unwrap_or(true)),
        image: Set(payload.image),
        email: Set(payload.email),
        password: Set(payload.password),
        sale_type: Set(sale_type),
        price_per_profile: Set(payload.price_per_profile),
        created_at: NotSet,
    };
    let account = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "account_create",
        Some("streaming_accounts"),
        Some(serde_json::json!({ "account_id": account.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(account_from_entity(account))
}

pub async fn update_account(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAccountRequest,
) -> AppResult<StreamingAccount> {
    ensure_admin(user)?;

    let existing = StreamingAccounts::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound("Cuenta no encontrada".to_string())),
    };

    if let Some(sale_type) = payload.sale_type.as_deref() {
        validate_sale_type(sale_type)?;
    }

    // Merge omitted fields from the current row, then write all of them.
    let name = payload.name.unwrap_or_else(|| existing.name.clone());
    let description = payload.description.or_else(|| existing.description.clone());
    let price = payload.price.unwrap_or(existing.price);
    let type_id = payload.type_id.unwrap_or(existing.type_id);
    let duration = payload.duration.or_else(|| existing.duration.clone());
    let quality = payload.quality.or_else(|| existing.quality.clone());
    let screens = payload.screens.unwrap_or(existing.screens);
    let is_active = payload.active.unwrap_or(existing.active);
    let image = payload.image.or_else(|| existing.image.clone());
    let email = payload.email.or_else(|| existing.email.clone());
    let password = payload.password.or_else(|| existing.password.clone());
    let sale_type = payload
        .sale_type
        .unwrap_or_else(|| existing.sale_type.clone());
    let price_per_profile = payload.price_per_profile.or(existing.price_per_profile);

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.description = Set(description);
    active.price = Set(price);
    active.type_id = Set(type_id);
    active.duration = Set(duration);
    active.quality = Set(quality);
    active.screens = Set(screens);
    active.active = Set(is_active);
    active.image = Set(image);
    active.email = Set(email);
    active.password = Set(password);
    active.sale_type = Set(sale_type);
    active.price_per_profile = Set(price_per_profile);
    let account = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "account_update",
        Some("streaming_accounts"),
        Some(serde_json::json!({ "account_id": account.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(account_from_entity(account))
}

pub async fn delete_account(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let result = StreamingAccounts::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Cuenta no encontrada".to_string()));
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "account_delete",
        Some("streaming_accounts"),
        Some(serde_json::json!({ "account_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(MessageResponse::new("Cuenta eliminada exitosamente"))
}

fn validate_sale_type(sale_type: &str) -> Result<(), AppError> {
    const VALID: [&str; 2] = [SALE_TYPE_FULL, SALE_TYPE_PROFILES];
    if VALID.contains(&sale_type) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Datos inválidos".to_string()))
    }
}

fn account_from_entity(model: AccountModel) -> StreamingAccount {
    StreamingAccount {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        type_id: model.type_id,
        duration: model.duration,
        quality: model.quality,
        screens: model.screens,
        active: model.active,
        image: model.image,
        email: model.email,
        password: model.password,
        sale_type: model.sale_type,
        price_per_profile: model.price_per_profile,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn public_from_entity(model: AccountModel) -> StreamingAccountPublic {
    StreamingAccountPublic {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        type_id: model.type_id,
        duration: model.duration,
        quality: model.quality,
        screens: model.screens,
        image: model.image,
        sale_type: model.sale_type,
        price_per_profile: model.price_per_profile,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
