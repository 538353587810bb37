use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        MessageResponse,
        admin::{
            CreateProfileRequest, ProfileList, ProfileResponse, ProfileView,
            UpdateProfileRequest,
        },
    },
    entity::{
        account_profiles::{
            self, ActiveModel as ProfileActive, Column as ProfileCol, Entity as AccountProfiles,
            Model as ProfileModel,
        },
        streaming_accounts::{Column as AccountCol, Entity as StreamingAccounts},
        users::Column as UserCol,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::AccountProfile,
    state::AppState,
};

#[derive(Debug, FromQueryResult)]
struct ProfileRow {
    id: Uuid,
    streaming_account_id: Uuid,
    profile_name: String,
    profile_pin: Option<String>,
    is_available: bool,
    sold_to_user_id: Option<Uuid>,
    sold_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    account_name: String,
    sold_to_email: Option<String>,
}

pub async fn list_profiles(
    state: &AppState,
    user: &AuthUser,
    account_id: Option<Uuid>,
) -> AppResult<ProfileList> {
    ensure_admin(user)?;

    let mut finder = AccountProfiles::find()
        .column_as(AccountCol::Name, "account_name")
        .column_as(UserCol::Email, "sold_to_email")
        .join(
            JoinType::InnerJoin,
            account_profiles::Relation::Account.def(),
        )
        .join(JoinType::LeftJoin, account_profiles::Relation::Buyer.def())
        .order_by_desc(ProfileCol::CreatedAt);

    if let Some(account_id) = account_id {
        finder = finder.filter(ProfileCol::StreamingAccountId.eq(account_id));
    }

    let rows = finder.into_model::<ProfileRow>().all(&state.orm).await?;

    let items = rows
        .into_iter()
        .map(|row| ProfileView {
            id: row.id,
            streaming_account_id: row.streaming_account_id,
            profile_name: row.profile_name,
            profile_pin: row.profile_pin,
            is_available: row.is_available,
            sold_to_user_id: row.sold_to_user_id,
            sold_at: row.sold_at,
            created_at: row.created_at,
            account_name: row.account_name,
            sold_to_email: row.sold_to_email,
        })
        .collect();

    Ok(ProfileList { items })
}

pub async fn create_profile(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProfileRequest,
) -> AppResult<ProfileResponse> {
    ensure_admin(user)?;

    if payload.profile_name.trim().is_empty() {
        return Err(AppError::BadRequest("Datos inválidos".to_string()));
    }

    let account = StreamingAccounts::find_by_id(payload.streaming_account_id)
        .one(&state.orm)
        .await?;
    if account.is_none() {
        return Err(AppError::NotFound("Cuenta no encontrada".to_string()));
    }

    let existing = AccountProfiles::find()
        .filter(ProfileCol::StreamingAccountId.eq(payload.streaming_account_id))
        .filter(ProfileCol::ProfileName.eq(payload.profile_name.clone()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::BadRequest(
            "Este perfil ya existe para esta cuenta".to_string(),
        ));
    }

    let active = ProfileActive {
        id: Set(Uuid::new_v4()),
        streaming_account_id: Set(payload.streaming_account_id),
        profile_name: Set(payload.profile_name),
        profile_pin: Set(payload.profile_pin),
        is_available: Set(true),
        sold_to_user_id: Set(None),
        sold_at: Set(None),
        created_at: NotSet,
    };
    let profile = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_create",
        Some("account_profiles"),
        Some(serde_json::json!({ "profile_id": profile.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ProfileResponse {
        message: "Perfil creado exitosamente".to_string(),
        profile: profile_from_entity(profile),
    })
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProfileRequest,
) -> AppResult<ProfileResponse> {
    ensure_admin(user)?;

    let existing = AccountProfiles::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("Perfil no encontrado".to_string())),
    };

    // A sold profile is frozen. The rejection ignores the payload, so the
    // same request fails the same way every time.
    if !existing.is_available {
        return Err(AppError::BadRequest(
            "No se puede modificar un perfil ya vendido".to_string(),
        ));
    }

    if let Some(name) = payload.profile_name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::BadRequest("Datos inválidos".to_string()));
        }
    }

    let profile_name = payload
        .profile_name
        .unwrap_or_else(|| existing.profile_name.clone());
    let profile_pin = payload.profile_pin.or_else(|| existing.profile_pin.clone());
    let is_available = payload.is_available.unwrap_or(existing.is_available);

    let mut active: ProfileActive = existing.into();
    active.profile_name = Set(profile_name);
    active.profile_pin = Set(profile_pin);
    active.is_available = Set(is_available);
    let profile = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_update",
        Some("account_profiles"),
        Some(serde_json::json!({ "profile_id": profile.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ProfileResponse {
        message: "Perfil actualizado exitosamente".to_string(),
        profile: profile_from_entity(profile),
    })
}

pub async fn delete_profile(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<MessageResponse> {
    ensure_admin(user)?;

    let existing = AccountProfiles::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound("Perfil no encontrado".to_string())),
    };

    if !existing.is_available {
        return Err(AppError::BadRequest(
            "No se puede eliminar un perfil ya vendido".to_string(),
        ));
    }

    AccountProfiles::delete_by_id(id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "profile_delete",
        Some("account_profiles"),
        Some(serde_json::json!({ "profile_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(MessageResponse::new("Perfil eliminado exitosamente"))
}

fn profile_from_entity(model: ProfileModel) -> AccountProfile {
    AccountProfile {
        id: model.id,
        streaming_account_id: model.streaming_account_id,
        profile_name: model.profile_name,
        profile_pin: model.profile_pin,
        is_available: model.is_available,
        sold_to_user_id: model.sold_to_user_id,
        sold_at: model.sold_at.map(|dt| dt.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
