#![allow(dead_code)]

use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use streamhub_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{
        account_profiles::ActiveModel as ProfileActive,
        streaming_accounts::ActiveModel as AccountActive,
        streaming_types::ActiveModel as TypeActive, users::ActiveModel as UserActive,
    },
    middleware::auth::AuthUser,
    state::AppState,
};

/// Returns None (after printing a skip notice) when no database is
/// configured; every integration test bails out quietly in that case.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(None);
        }
    };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    Ok(Some(AppState { pool, orm }))
}

// Fixtures carry uuid-unique names so tests can run in parallel against a
// shared database without truncating each other's rows.

pub async fn create_user(state: &AppState, role: &str, credits: i64) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(format!("{}@test.streamhub.com", Uuid::new_v4())),
        name: Set(None),
        password_hash: Set(Some("dummy".into())),
        role: Set(role.into()),
        credits: Set(credits),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

pub fn auth_for(user_id: Uuid, role: &str) -> AuthUser {
    AuthUser {
        user_id,
        role: role.into(),
    }
}

pub async fn create_type(state: &AppState) -> anyhow::Result<Uuid> {
    let model = TypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Tipo {}", Uuid::new_v4())),
        description: Set(None),
        icon: Set(None),
        color: Set(None),
        active: Set(true),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(model.id)
}

pub async fn create_account(
    state: &AppState,
    type_id: Uuid,
    sale_type: &str,
    price: i64,
    price_per_profile: Option<i64>,
) -> anyhow::Result<Uuid> {
    let model = AccountActive {
        id: Set(Uuid::new_v4()),
        name: Set(format!("Cuenta {}", Uuid::new_v4())),
        description: Set(None),
        price: Set(price),
        type_id: Set(type_id),
        duration: Set(Some("mes".into())),
        quality: Set(Some("4K".into())),
        screens: Set(4),
        active: Set(true),
        image: Set(None),
        email: Set(Some("shared@streamhub.com".into())),
        password: Set(Some("secret".into())),
        sale_type: Set(sale_type.into()),
        price_per_profile: Set(price_per_profile),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(model.id)
}

pub async fn create_profile(
    state: &AppState,
    account_id: Uuid,
    name: &str,
) -> anyhow::Result<Uuid> {
    let model = ProfileActive {
        id: Set(Uuid::new_v4()),
        streaming_account_id: Set(account_id),
        profile_name: Set(name.into()),
        profile_pin: Set(None),
        is_available: Set(true),
        sold_to_user_id: Set(None),
        sold_at: Set(None),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(model.id)
}

pub async fn user_credits(state: &AppState, user_id: Uuid) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT credits FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?;
    Ok(row.0)
}

pub async fn order_count(state: &AppState, user_id: Uuid) -> anyhow::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&state.pool)
        .await?;
    Ok(row.0)
}
