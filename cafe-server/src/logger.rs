//! Logging Infrastructure
//!
//! Console output always; with a log directory, application logs and
//! security events (target `security`) also go to separate daily rolling
//! files.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::BoxError;

/// Default filter when `RUST_LOG` is unset
fn default_filter(level: &str) -> String {
    format!("cafe_server={level},tower_http={level},security=info")
}

/// Initialize the logging system
///
/// The returned guards flush the file writers and must live as long as the
/// process.
pub fn init_logger(level: &str, log_dir: Option<&str>) -> Result<Vec<WorkerGuard>, BoxError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    let console_layer = fmt::layer().with_target(true);
    let mut guards = Vec::new();

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .try_init()?;
        return Ok(guards);
    };

    let log_dir = Path::new(dir);
    let app_dir = log_dir.join("app");
    let security_dir = log_dir.join("security");
    fs::create_dir_all(&app_dir)?;
    fs::create_dir_all(&security_dir)?;

    let (app_writer, app_guard) =
        tracing_appender::non_blocking(RollingFileAppender::new(Rotation::DAILY, app_dir, "app"));
    let (security_writer, security_guard) = tracing_appender::non_blocking(
        RollingFileAppender::new(Rotation::DAILY, security_dir, "security"),
    );
    guards.push(app_guard);
    guards.push(security_guard);

    let app_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(app_writer)
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() != "security"
        }));

    let security_layer = fmt::layer()
        .json()
        .with_target(true)
        .with_writer(security_writer)
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() == "security"
        }));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(app_layer)
        .with(security_layer)
        .try_init()?;

    Ok(guards)
}

/// Security event log (target `security`)
///
/// ```ignore
/// security_log!(WARN, "login_failed", email = %email, attempts = 2);
/// ```
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(target: "security", event = $event, $($arg)*)
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(target: "security", event = $event, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            default_filter("debug"),
            "cafe_server=debug,tower_http=debug,security=info"
        );
    }
}
