//! Payment type API (owner and manager only)

mod handler;

use axum::routing::get;
use axum::{Router, middleware};

use crate::auth::{ADMIN_ROLES, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/payment-types", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(ADMIN_ROLES)))
}
