use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod doc;
pub mod documents;
pub mod health;
pub mod invoices;
pub mod params;
pub mod products;
pub mod sales;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/sales", sales::router())
        .nest("/invoices", invoices::router())
        .nest("/documents", documents::router())
}
