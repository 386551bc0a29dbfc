//! Route definitions for the Inventory Management Platform

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes
        .nest("/auth", auth_routes())
        // Protected routes - catalog management
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/suppliers", supplier_routes())
        // Protected routes - stock movements
        .nest("/stock", stock_routes())
        // Protected routes - cart
        .nest("/cart", cart_routes())
}

/// Authentication routes. Registration, login and refresh are public; the
/// profile endpoint requires a valid token.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn(auth_middleware))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Product management routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/warnings", get(handlers::list_product_warnings))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/movements", get(handlers::get_product_movements))
        // Images
        .route(
            "/:product_id/images",
            get(handlers::list_images).post(handlers::add_image),
        )
        .route(
            "/:product_id/images/:image_id",
            delete(handlers::delete_image),
        )
        .route(
            "/:product_id/images/:image_id/main",
            put(handlers::set_main_image),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category management routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier management routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock movement routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movements",
            get(handlers::list_movements).post(handlers::record_movement),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Cart routes (protected)
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_cart).delete(handlers::clear_cart))
        .route(
            "/items/:product_id",
            post(handlers::add_to_cart).delete(handlers::remove_from_cart),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
