use streamhub_api::{
    dto::{
        admin::{CreateTypeRequest, RechargeRequest, UpdateProfileRequest},
        cart::AddToCartRequest,
    },
    error::AppError,
    services::{admin_service, cart_service, order_service, profile_service, type_service},
};
use uuid::Uuid;

mod common;

#[tokio::test]
async fn non_admin_is_rejected_with_401_body() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let auth = common::auth_for(user_id, "USER");

    let err = admin_service::list_users(&state, &auth).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert_eq!(err.to_string(), "No autorizado");

    let err = admin_service::get_stats(&state, &auth).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let err = type_service::list_types(&state, &auth).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    Ok(())
}

// Once a seat is sold it is frozen: every update or delete attempt fails the
// same way, no matter the payload and no matter how often it is retried.
#[tokio::test]
async fn sold_profile_rejects_all_mutations() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let admin_id = common::create_user(&state, "ADMIN", 0).await?;
    let buyer_id = common::create_user(&state, "USER", 1000).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "PROFILES", 599, Some(199)).await?;
    let profile_id = common::create_profile(&state, account_id, "Perfil 1").await?;

    let buyer = common::auth_for(buyer_id, "USER");
    cart_service::add_to_cart(
        &state.pool,
        &buyer,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 1,
            sale_type: "PROFILES".into(),
        },
    )
    .await?;
    order_service::checkout(&state, &buyer).await?;

    let admin = common::auth_for(admin_id, "ADMIN");

    for _ in 0..2 {
        let err = profile_service::update_profile(
            &state,
            &admin,
            profile_id,
            UpdateProfileRequest {
                profile_name: Some("Renombrado".into()),
                profile_pin: None,
                is_available: Some(true),
            },
        )
        .await
        .unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "No se puede modificar un perfil ya vendido")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = profile_service::delete_profile(&state, &admin, profile_id)
            .await
            .unwrap_err();
        match err {
            AppError::BadRequest(msg) => {
                assert_eq!(msg, "No se puede eliminar un perfil ya vendido")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // The row is untouched.
    let row: (String, bool) = sqlx::query_as(
        "SELECT profile_name, is_available FROM account_profiles WHERE id = $1",
    )
    .bind(profile_id)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(row.0, "Perfil 1");
    assert!(!row.1);

    Ok(())
}

#[tokio::test]
async fn referenced_type_cannot_be_deleted() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let admin_id = common::create_user(&state, "ADMIN", 0).await?;
    let admin = common::auth_for(admin_id, "ADMIN");

    let referenced = common::create_type(&state).await?;
    common::create_account(&state, referenced, "FULL", 100, None).await?;

    let err = type_service::delete_type(&state, &admin, referenced)
        .await
        .unwrap_err();
    match err {
        AppError::BadRequest(msg) => {
            assert!(msg.contains("hay 1 cuentas asociadas"), "message was: {msg}")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let unreferenced = common::create_type(&state).await?;
    let resp = type_service::delete_type(&state, &admin, unreferenced).await?;
    assert_eq!(resp.message, "Tipo de streaming eliminado exitosamente");

    Ok(())
}

#[tokio::test]
async fn duplicate_type_name_is_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let admin_id = common::create_user(&state, "ADMIN", 0).await?;
    let admin = common::auth_for(admin_id, "ADMIN");
    let name = format!("Tipo {}", Uuid::new_v4());

    type_service::create_type(
        &state,
        &admin,
        CreateTypeRequest {
            name: name.clone(),
            description: None,
            icon: None,
            color: None,
            active: None,
        },
    )
    .await?;

    let err = type_service::create_type(
        &state,
        &admin,
        CreateTypeRequest {
            name,
            description: None,
            icon: None,
            color: None,
            active: None,
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Este tipo de streaming ya existe"),
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn recharge_credits_wallet_and_books_a_record() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let admin_id = common::create_user(&state, "ADMIN", 0).await?;
    let target_id = common::create_user(&state, "USER", 0).await?;
    let admin = common::auth_for(admin_id, "ADMIN");

    let resp = admin_service::recharge_credits(
        &state,
        &admin,
        RechargeRequest {
            user_id: target_id,
            amount: 2500,
            method: None,
            reference: Some("REF-001".into()),
        },
    )
    .await?;

    assert_eq!(resp.credits, 2500);
    assert_eq!(resp.recharge.status, "COMPLETED");
    assert_eq!(resp.recharge.method, "Administración");
    assert_eq!(common::user_credits(&state, target_id).await?, 2500);

    let err = admin_service::recharge_credits(
        &state,
        &admin,
        RechargeRequest {
            user_id: target_id,
            amount: 0,
            method: None,
            reference: None,
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Datos inválidos"),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = admin_service::recharge_credits(
        &state,
        &admin,
        RechargeRequest {
            user_id: Uuid::new_v4(),
            amount: 100,
            method: None,
            reference: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    Ok(())
}
