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
    catalog::{Category, Product},
    dto::{
        auth::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest},
        catalog::{CategoryList, ProductList, ProductSearchQuery},
        items::{AddItemsRequest, CompletedShopping, ItemList},
        lists::{ListCollection, ListDetail},
    },
    models::{ItemPatch, ListItem, ListPatch, ListWithItemCount, NewList, NewListItem, ShoppingList, User},
    response::{ApiResponse, Meta},
    routes::{auth, catalog, health, lists},
    summary::{CategorySummary, ListSummary, PricingView},
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
        auth::me,
        auth::update_profile,
        auth::change_password,
        catalog::list_categories,
        catalog::list_products,
        lists::list_lists,
        lists::create_list,
        lists::get_list,
        lists::update_list,
        lists::delete_list,
        lists::list_items,
        lists::add_items,
        lists::update_item,
        lists::delete_item,
        lists::list_summary,
        lists::complete_shopping
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            ChangePasswordRequest,
            Category,
            Product,
            CategoryList,
            ProductList,
            ProductSearchQuery,
            ShoppingList,
            ListWithItemCount,
            NewList,
            ListPatch,
            ListItem,
            NewListItem,
            ItemPatch,
            AddItemsRequest,
            ItemList,
            ListCollection,
            ListDetail,
            CompletedShopping,
            PricingView,
            CategorySummary,
            ListSummary,
            Meta,
            ApiResponse<ShoppingList>,
            ApiResponse<ListCollection>,
            ApiResponse<ListDetail>,
            ApiResponse<ListSummary>,
            ApiResponse<CompletedShopping>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Accounts and tokens"),
        (name = "Catalog", description = "Static categories and products"),
        (name = "Lists", description = "Shopping lists"),
        (name = "Items", description = "List items, summaries and trip completion"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
