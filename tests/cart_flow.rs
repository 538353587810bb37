use streamhub_api::{
    dto::cart::AddToCartRequest,
    error::AppError,
    services::{cart_service, order_service},
};
use uuid::Uuid;

mod common;

#[tokio::test]
async fn missing_cart_reads_as_empty() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let auth = common::auth_for(user_id, "USER");

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert!(cart.items.is_empty());
    assert_eq!(cart.total_amount, 0);

    Ok(())
}

#[tokio::test]
async fn add_merges_same_line_and_recomputes_total() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 250, None).await?;
    let auth = common::auth_for(user_id, "USER");

    for quantity in [1, 2] {
        cart_service::add_to_cart(
            &state.pool,
            &auth,
            AddToCartRequest {
                streaming_account_id: account_id,
                quantity,
                sale_type: "FULL".into(),
            },
        )
        .await?;
    }

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);
    assert_eq!(cart.total_amount, 750);

    Ok(())
}

// The same account in both sale modes is two distinct lines, each carrying
// its own locked price.
#[tokio::test]
async fn sale_types_keep_separate_lines() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "PROFILES", 500, Some(200)).await?;
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

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_amount, 500 + 2 * 200);

    Ok(())
}

#[tokio::test]
async fn remove_recomputes_total() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let type_id = common::create_type(&state).await?;
    let first = common::create_account(&state, type_id, "FULL", 300, None).await?;
    let second = common::create_account(&state, type_id, "FULL", 450, None).await?;
    let auth = common::auth_for(user_id, "USER");

    for account_id in [first, second] {
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
    }

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.total_amount, 750);
    let first_item = cart
        .items
        .iter()
        .find(|i| i.streaming_account.id == first)
        .expect("first line");

    cart_service::remove_from_cart(&state.pool, &auth, first_item.id).await?;

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_amount, 450);

    // Unknown line on an existing cart.
    let err = cart_service::remove_from_cart(&state.pool, &auth, Uuid::new_v4())
        .await
        .unwrap_err();
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Item no encontrado"),
        other => panic!("unexpected error: {other:?}"),
    }

    // No cart at all.
    let cartless = common::create_user(&state, "USER", 0).await?;
    let err = cart_service::remove_from_cart(
        &state.pool,
        &common::auth_for(cartless, "USER"),
        Uuid::new_v4(),
    )
    .await
    .unwrap_err();
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Carrito no encontrado"),
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}

// Price lock: repricing the catalog after the line was added must not leak
// into the cart total or the checkout debit.
#[tokio::test]
async fn price_is_locked_at_add_time() -> anyhow::Result<()> {
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

    sqlx::query("UPDATE streaming_accounts SET price = 1499 WHERE id = $1")
        .bind(account_id)
        .execute(&state.pool)
        .await?;

    let cart = cart_service::get_cart(&state.pool, &auth).await?;
    assert_eq!(cart.total_amount, 999);

    let resp = order_service::checkout(&state, &auth).await?;
    assert_eq!(resp.orders[0].total_price, 999);
    assert_eq!(common::user_credits(&state, user_id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn add_rejects_bad_input() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user_id = common::create_user(&state, "USER", 0).await?;
    let type_id = common::create_type(&state).await?;
    let account_id = common::create_account(&state, type_id, "FULL", 100, None).await?;
    let auth = common::auth_for(user_id, "USER");

    let err = cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 0,
            sale_type: "FULL".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: account_id,
            quantity: 1,
            sale_type: "BUNDLE".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = cart_service::add_to_cart(
        &state.pool,
        &auth,
        AddToCartRequest {
            streaming_account_id: Uuid::new_v4(),
            quantity: 1,
            sale_type: "FULL".into(),
        },
    )
    .await
    .unwrap_err();
    match err {
        AppError::NotFound(msg) => assert_eq!(msg, "Cuenta no encontrada"),
        other => panic!("unexpected error: {other:?}"),
    }

    Ok(())
}
