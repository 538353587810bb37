use chrono::{Duration, Utc};

use streamhub_api::{
    dto::cart::AddToCartRequest,
    error::AppError,
    services::{cart_service, order_service},
};

mod common;

// 10.00 credits against one FULL line locked at 9.99: balance ends at 0.01
// with a single PENDING order expiring 30 days out.
#[tokio::test]
async fn full_checkout_debits_wallet_and_creates_order() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 1000).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 999, None).await?;
    let auth = common::auth_for(user_id, "USER");

    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 1,
            sale_type: "FULL".into(),
        },
    )
    .await?;

    let resp = order_service::checkout(&state, &auth).await?;
    assert_eq!(resp.orders.len(), 1);

    let order = &resp.orders[0];
    assert_eq!(order.status, "PENDING");
    assert_eq!(order.total_price, 999);
    assert_eq!(order.account_email, "shared@streamhub.com");
    assert!(order.profile_name.is_none());
    assert!(order.expires_at > Utc::now() + Duration::days(29));
    assert!(order.expires_at < Utc::now() + Duration::days(31));

    assert_eq!(common::user_credits(&state, user_id).await?, 1);

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_amount, 0);

    Ok(())
}

// 5.00 credits against a 9.99 total: rejected, nothing written, balance
// untouched.
#[tokio::test]
async fn checkout_rejects_insufficient_credits() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 500).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 999, None).await?;
    let auth = common::auth_for(user_id, "USER");

    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 1,
            sale_type: "FULL".into(),
        },
    )
    .await?;

    let err = order_service::checkout(&state, &auth).await.unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Créditos insuficientes"),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(common::order_count(&state, user_id).await?, 0);
    assert_eq!(common::user_credits(&state, user_id).await?, 500);

    // The cart is left for the caller to correct and retry.
    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_amount, 999);

    Ok(())
}

#[tokio::test]
async fn checkout_rejects_empty_cart() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 1000).await?;
    let auth = common::auth_for(user_id, "USER");

    let err = order_service::checkout(&state, &auth).await.unwrap_err();
    match err {
        AppError::BadRequest(msg) => assert_eq!(msg, "Carrito vacío"),
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

// One order row per purchased unit: a FULL line of quantity 3 fans out into
// three receipts.
#[tokio::test]
async fn full_line_creates_one_order_per_unit() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 300).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 100, None).await?;
    let auth = common::auth_for(user_id, "USER");

    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 3,
            sale_type: "FULL".into(),
        },
    )
    .await?;

    let resp = order_service::checkout(&state, &auth).await?;
    assert_eq!(resp.orders.len(), 3);
    assert!(resp.orders.iter().all(|o| o.quantity == 1));
    assert!(resp.orders.iter().all(|o| o.total_price == 100));
    assert_eq!(common::user_credits(&state, user_id).await?, 0);

    Ok(())
}

#[tokio::test]
async fn profile_checkout_allocates_and_marks_seats_sold() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 1000).await?;
    let type_id = common::create_type(&state).await?;
    let account_id =
        common::create_account(&state, type_id, "PROFILES", 599, Some(199)).await?;
    common::create_profile(&state, account_id, "Perfil 1").await?;
    common::create_profile(&state, account_id, "Perfil 2").await?;
    let auth = common::auth_for(user_id, "USER");

    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 2,
            sale_type: "PROFILES".into(),
        },
    )
    .await?;

    let resp = order_service::checkout(&state, &auth).await?;
    assert_eq!(resp.orders.len(), 2);
    assert!(resp.orders.iter().all(|o| o.sale_type == "PROFILES"));
    assert!(resp.orders.iter().all(|o| o.total_price == 199));

    let mut names: Vec<String> = resp
        .orders
        .iter()
        .map(|o| o.profile_name.clone().expect("profile name on receipt"))
        .collect();
    names.sort();
    assert_eq!(names, vec!["Perfil 1".to_string(), "Perfil 2".to_string()]);

    // Both seats are now off the market and stamped with the buyer.
    let sold: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM account_profiles WHERE streaming_account_id = $1 AND is_available = false AND sold_to_user_id = $2 AND sold_at IS NOT NULL",
    )
    .bind(account_id)
    .bind(user_id)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(sold.0, 2);

    assert_eq!(common::user_credits(&state, user_id).await?, 1000 - 398);

    Ok(())
}

// 2 seats available, 3 requested: count-bearing rejection, and since the
// whole checkout is one transaction, nothing from any line sticks.
#[tokio::test]
async fn profile_shortfall_rolls_back_the_whole_checkout() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 10_000).await?;
    let type_id = common::create_type(&state).await?;
    let full_account = common::create_account(&state, type_id, "FULL", 100, None).await?;
    let profile_account =
        common::create_account(&state, type_id, "PROFILES", 599, Some(199)).await?;
    common::create_profile(&state, profile_account, "Perfil 1").await?;
    common::create_profile(&state, profile_account, "Perfil 2").await?;
    let auth = common::auth_for(user_id, "USER");

    // The FULL line lands first in cart order, so it is processed before the
    // failing PROFILES line.
    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: full_account,
            quantity: 1,
            sale_type: "FULL".into(),
        },
    )
    .await?;
    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: profile_account,
            quantity: 3,
            sale_type: "PROFILES".into(),
        },
    )
    .await?;

    let err = order_service::checkout(&state, &auth).await.unwrap_err();
    match err {
        AppError::BadRequest(msg) => {
            assert!(msg.contains("Disponibles: 2"), "message was: {msg}")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(common::order_count(&state, user_id).await?, 0);
    assert_eq!(common::user_credits(&state, user_id).await?, 10_000);

    let available: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM account_profiles WHERE streaming_account_id = $1 AND is_available = true",
    )
    .bind(profile_account)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(available.0, 2);

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.items.len(), 2);

    Ok(())
}

// The shared login is a sentinel when the account has no credential loaded.
#[tokio::test]
async fn full_checkout_issues_sentinel_credentials_when_unset() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 1000).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 100, None).await?;
    sqlx::query("UPDATE streaming_accounts SET email = NULL, password = NULL WHERE id = $1")
        .bind(account_id)
        .execute(&state.pool)
        .await?;
    let auth = common::auth_for(user_id, "USER");

    cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 1,
            sale_type: "FULL".into(),
        },
    )
    .await?;

    let resp = order_service::checkout(&state, &auth).await?;
    assert_eq!(resp.orders[0].account_email, "pending@admin.com");
    assert_eq!(resp.orders[0].account_password, "pending");

    Ok(())
}
