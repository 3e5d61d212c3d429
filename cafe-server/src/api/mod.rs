//! HTTP API
//!
//! One module per resource, each exposing `router()`. Dashboard routes sit
//! behind `require_auth`; public ordering routes and login do not.

pub mod auth;
pub mod bookings;
pub mod health;
pub mod items;
pub mod orders;
pub mod packages;
pub mod payment_types;
pub mod public;
pub mod tables;
pub mod users;

use axum::routing::get;
use axum::{Json, Router, middleware};
use shared::ApiResponse;

use crate::auth::require_auth;
use crate::error::ServiceError;
use crate::state::AppState;

/// Handler result: `ApiResponse` JSON or an error response
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ServiceError>;

/// Wrap data in a success response
pub(crate) fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// Build the API router (without transport layers)
pub fn create_router(state: AppState) -> Router {
    let dashboard = Router::new()
        .merge(items::router())
        .merge(packages::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(bookings::router())
        .merge(payment_types::router())
        .merge(users::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(auth::router())
        .merge(public::router())
        .merge(dashboard)
        .with_state(state)
}
