use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        MessageResponse,
        admin::{CreateTypeRequest, TypeList, TypeResponse, TypeWithCount, UpdateTypeRequest},
    },
    entity::{
        streaming_accounts::{Column as AccountCol, Entity as StreamingAccounts},
        streaming_types::{ActiveModel, Column, Entity as StreamingTypes, Model as TypeModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::StreamingType,
    state::AppState,
};

pub async fn list_types(state: &AppState, user: &AuthUser) -> AppResult<TypeList> {
    ensure_admin(user)?;

    let types = StreamingTypes::find()
        .order_by_asc(Column::Name)
        .all(&state.orm)
        .await?;

    let mut items = Vec::with_capacity(types.len());
    for model in types {
        let accounts_count = StreamingAccounts::find()
            .filter(AccountCol::TypeId.eq(model.id))
            .count(&state.orm)
            .await? as i64;
        items.push(TypeWithCount {
            streaming_type: type_from_entity(model),
            accounts_count,
        });
    }

    Ok(TypeList { items })
}

pub async fn create_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateTypeRequest,
) -> AppResult<TypeResponse> {
    ensure_admin(user)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("El nombre es requerido".to_string()));
    }

    let existing = StreamingTypes::find()
        .filter(Column::Name.eq(name.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Este tipo de streaming ya existe".to_string(),
        ));
    }

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        description: Set(normalize(payload.description)),
        icon: Set(normalize(payload.icon)),
        color: Set(normalize(payload.color)),
        active: Set(payload.active.unwrap_or(true)),
        created_at: NotSet,
    };
    let model = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "type_create",
        Some("streaming_types"),
        Some(serde_json::json!({ "type_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(TypeResponse {
        message: "Tipo de streaming creado exitosamente".to_string(),
        streaming_type: type_from_entity(model),
    })
}

pub async fn update_type(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateTypeRequest,
) -> AppResult<TypeResponse> {
    ensure_admin(user)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("El nombre es requerido".to_string()));
    }

    let existing = StreamingTypes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(t) => t,
        None => return Err(AppError::NotFound("Tipo no encontrado".to_string())),
    };

    // The new name must not collide with another type.
    let duplicate = StreamingTypes::find()
        .filter(Column::Name.eq(name.clone()))
        .filter(Column::Id.ne(id))
        .one(&state.orm)
        .await?;
    if duplicate.is_some() {
        return Err(AppError::BadRequest(
            "Este tipo de streaming ya existe".to_string(),
        ));
    }

    let mut active: ActiveModel = existing.into();
    active.name = Set(name);
    active.description = Set(normalize(payload.description));
    active.icon = Set(normalize(payload.icon));
    active.color = Set(normalize(payload.color));
    active.active = Set(payload.active.unwrap_or(true));
    let model = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "type_update",
        Some("streaming_types"),
        Some(serde_json::json!({ "type_id": model.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(TypeResponse {
        message: "Tipo de streaming actualizado exitosamente".to_string(),
        streaming_type: type_from_entity(model),
    })
}

pub async fn delete_type(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let existing = StreamingTypes::find_by_id(id).one(&state.orm).await?;
    if existing.is_none() {
        return Err(AppError::NotFound("Tipo no encontrado".to_string()));
    }

    // Referential guard in application code; type_id carries no FK.
    let accounts_count = StreamingAccounts::find()
        .filter(AccountCol::TypeId.eq(id))
        .count(&state.orm)
        .await?;
    if accounts_count > 0 {
        return Err(AppError::BadRequest(format!(
            "No se puede eliminar este tipo porque hay {} cuentas asociadas",
            accounts_count
        )));
    }

    StreamingTypes::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "type_delete",
        Some("streaming_types"),
        Some(serde_json::json!({ "type_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(MessageResponse::new(
        "Tipo de streaming eliminado exitosamente",
    ))
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn type_from_entity(model: TypeModel) -> StreamingType {
    StreamingType {
        id: model.id,
        name: model.name,
        description: model.description,
        icon: model.icon,
        color: model.color,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
