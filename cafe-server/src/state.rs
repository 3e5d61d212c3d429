//! Application state

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::BoxError;
use crate::auth::{JwtConfig, JwtService, LoginGuard};
use crate::config::Config;
use crate::services::midtrans::MidtransClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Session token service
    pub jwt_service: Arc<JwtService>,
    /// Failed-login throttling policy
    pub login_guard: LoginGuard,
    /// Base URL encoded in table QR codes
    pub public_base_url: Arc<str>,
    /// Payment gateway, `None` when not configured
    pub midtrans: Option<MidtransClient>,
}

impl AppState {
    /// Connect to the database, run migrations and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self::with_pool(config, pool))
    }

    /// Build the state around an existing pool
    pub fn with_pool(config: &Config, pool: PgPool) -> Self {
        let jwt_service = JwtService::with_config(JwtConfig::new(
            config.jwt_secret.clone(),
            config.jwt_expiration_minutes,
        ));

        let midtrans = config.midtrans_server_key.clone().map(|server_key| {
            MidtransClient::new(
                server_key,
                config.midtrans_client_key.clone(),
                config.midtrans_production,
            )
        });
        if midtrans.is_none() {
            tracing::warn!("MIDTRANS_SERVER_KEY not set, payment gateway disabled");
        }

        Self {
            pool,
            jwt_service: Arc::new(jwt_service),
            login_guard: LoginGuard::new(config.login_attempts_to_block, config.hours_to_block),
            public_base_url: Arc::from(config.public_base_url.as_str()),
            midtrans,
        }
    }
}
