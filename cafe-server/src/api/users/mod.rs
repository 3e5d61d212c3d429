//! User API (owner and manager only)

mod handler;

use axum::routing::{get, put};
use axum::{Router, middleware};

use crate::auth::{ADMIN_ROLES, require_role};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/users", routes())
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
        .route("/{id}/active", put(handler::set_active))
        .route("/{id}/password", put(handler::change_password))
        .layer(middleware::from_fn(require_role(ADMIN_ROLES)))
}
