//! Public ordering API (customers scanning a table QR code)

mod handler;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/menu", get(handler::menu))
        .route("/tables", get(handler::tables))
        .route("/payment-types", get(handler::payment_types))
        .route("/payment-gateway", get(handler::payment_gateway))
        .route("/orders", post(handler::create_order))
        .route("/orders/summary", post(handler::summary))
        .route("/orders/{id}", get(handler::get_order))
}
