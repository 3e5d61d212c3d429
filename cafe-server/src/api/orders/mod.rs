//! Order API (dashboard)

mod handler;

use axum::Router;
use axum::routing::{get, post, put};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/summary", post(handler::summary))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/payment-token", post(handler::payment_token))
        .route("/{id}/payment-status", get(handler::payment_status))
}
