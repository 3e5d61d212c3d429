//! Unified service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`) and the
//! API-layer error (`AppError`) so handlers can propagate both with `?`.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::BoxError;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (logged, mapped to an `AppError`)
/// - `App`: Business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self {
        ServiceError::App(e.into())
    }
}

/// SQLSTATE unique_violation
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE foreign_key_violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Map a constraint violation to a client error; `None` for anything else
fn constraint_error(err: &sqlx::Error) -> Option<AppError> {
    let db_err = err.as_database_error()?;
    let constraint = db_err.constraint().unwrap_or_default();
    match db_err.code().as_deref() {
        Some(UNIQUE_VIOLATION) => Some(match constraint {
            "dining_tables_number_key" => AppError::new(ErrorCode::TableNumberExists),
            "users_email_key" => AppError::new(ErrorCode::EmailExists),
            _ => AppError::new(ErrorCode::AlreadyExists),
        }),
        Some(FOREIGN_KEY_VIOLATION) => Some(
            AppError::with_message(ErrorCode::InvalidRequest, "Referenced record does not exist")
                .with_detail("constraint", constraint),
        ),
        _ => None,
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                if let Some(app_err) = db_err
                    .downcast_ref::<sqlx::Error>()
                    .and_then(constraint_error)
                {
                    tracing::debug!(error = %db_err, "Constraint violation");
                    return app_err;
                }
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;

    use sqlx::error::{DatabaseError, ErrorKind};

    /// Postgres-style error with a SQLSTATE and constraint name
    #[derive(Debug, thiserror::Error)]
    #[error("{code} on {constraint}")]
    struct PgViolation {
        code: &'static str,
        constraint: &'static str,
    }

    impl DatabaseError for PgViolation {
        fn message(&self) -> &str {
            "violation"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                FOREIGN_KEY_VIOLATION => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn mapped(code: &'static str, constraint: &'static str) -> AppError {
        let err = sqlx::Error::Database(Box::new(PgViolation { code, constraint }));
        ServiceError::from(err).into()
    }

    #[test]
    fn test_unique_violations() {
        assert_eq!(
            mapped(UNIQUE_VIOLATION, "dining_tables_number_key").code,
            ErrorCode::TableNumberExists
        );
        assert_eq!(mapped(UNIQUE_VIOLATION, "users_email_key").code, ErrorCode::EmailExists);
        assert_eq!(
            mapped(UNIQUE_VIOLATION, "payment_types_name_key").code,
            ErrorCode::AlreadyExists
        );
    }

    #[test]
    fn test_foreign_key_violation() {
        let err = mapped(FOREIGN_KEY_VIOLATION, "orders_table_id_fkey");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(
            err.details.unwrap().get("constraint").unwrap(),
            "orders_table_id_fkey"
        );
    }

    #[test]
    fn test_other_database_error_is_internal() {
        // check_violation
        assert_eq!(mapped("23514", "order_lines_quantity_check").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_app_error_passes_through() {
        let err: AppError = ServiceError::App(AppError::new(ErrorCode::OrderEmpty)).into();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_db_error_is_internal() {
        let err: AppError = ServiceError::from(sqlx::Error::RowNotFound).into();
        assert_eq!(err.code, ErrorCode::InternalError);

        let boxed: BoxError = "connection reset".into();
        let err: AppError = ServiceError::from(boxed).into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }
}
