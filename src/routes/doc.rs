use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        MessageResponse,
        admin::{
            AdminUserView, CreateProfileRequest, CreateTypeRequest, ProfileList,
            ProfileResponse, ProfileView, RechargeRequest, RechargeResponse, StatsResponse,
            TypeList, TypeResponse, TypeWithCount, UpdateProfileRequest, UpdateTypeRequest,
            UserList,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        cart::{AddToCartRequest, CartAccountView, CartItemView, CartView},
        catalog::{
            AccountList, CreateAccountRequest, PublicAccountList, StreamingAccountPublic,
            UpdateAccountRequest,
        },
        orders::{CheckoutResponse, OrderList},
    },
    models::{
        AccountProfile, Cart, CartItem, CreditRecharge, Order, StreamingAccount, StreamingType,
        User,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, cart, catalog, health, orders,
        params::Pagination,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        catalog::list_accounts,
        cart::get_cart,
        cart::add_to_cart,
        cart::checkout,
        cart::remove_from_cart,
        orders::list_orders,
        admin::get_stats,
        admin::accounts::list_accounts,
        admin::accounts::create_account,
        admin::accounts::update_account,
        admin::accounts::delete_account,
        admin::types::list_types,
        admin::types::create_type,
        admin::types::update_type,
        admin::types::delete_type,
        admin::profiles::list_profiles,
        admin::profiles::create_profile,
        admin::profiles::update_profile,
        admin::profiles::delete_profile,
        admin::users::list_users,
        admin::users::recharge_credits
    ),
    components(
        schemas(
            User,
            StreamingType,
            StreamingAccount,
            AccountProfile,
            Cart,
            CartItem,
            Order,
            CreditRecharge,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            AddToCartRequest,
            CartAccountView,
            CartItemView,
            CartView,
            StreamingAccountPublic,
            CreateAccountRequest,
            UpdateAccountRequest,
            PublicAccountList,
            AccountList,
            CheckoutResponse,
            OrderList,
            CreateTypeRequest,
            UpdateTypeRequest,
            TypeWithCount,
            TypeList,
            TypeResponse,
            CreateProfileRequest,
            UpdateProfileRequest,
            ProfileView,
            ProfileList,
            ProfileResponse,
            RechargeRequest,
            RechargeResponse,
            AdminUserView,
            UserList,
            StatsResponse,
            MessageResponse,
            Pagination,
            admin::profiles::ProfileQuery,
            Meta,
            ApiResponse<PublicAccountList>,
            ApiResponse<AccountList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Catalog", description = "Public catalog endpoints"),
        (name = "Cart", description = "Cart and checkout endpoints"),
        (name = "Orders", description = "Order endpoints"),
        (name = "Admin", description = "Back-office endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
