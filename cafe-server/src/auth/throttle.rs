//! Login throttling
//!
//! Each failed password bumps `login_attempts`; once the counter exceeds
//! the configured threshold the account is blocked for a fixed number of
//! hours. A successful login resets the counter.

use shared::error::{AppError, ErrorCode};
use shared::models::User;

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Decision after a failed password check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedLogin {
    /// Below the threshold
    Rejected,
    /// Threshold exceeded, block until the given time (Unix millis)
    Block { until: i64 },
}

#[derive(Debug, Clone, Copy)]
pub struct LoginGuard {
    attempts_to_block: i32,
    hours_to_block: i64,
}

impl LoginGuard {
    pub fn new(attempts_to_block: i32, hours_to_block: i64) -> Self {
        Self {
            attempts_to_block,
            hours_to_block,
        }
    }

    pub fn hours_to_block(&self) -> i64 {
        self.hours_to_block
    }

    /// Account checks done before the password is verified
    pub fn precheck(&self, user: &User, now: i64) -> Result<(), AppError> {
        if user.block_expires.is_some_and(|until| until > now) {
            return Err(AppError::new(ErrorCode::AccountLocked));
        }
        if !user.is_active {
            return Err(AppError::new(ErrorCode::AccountDisabled));
        }
        if user.deleted_at.is_some() {
            return Err(AppError::new(ErrorCode::AccountDeleted));
        }
        Ok(())
    }

    /// Decide what a failed attempt leads to, given the incremented counter
    pub fn on_failure(&self, attempts: i32, now: i64) -> FailedLogin {
        if attempts > self.attempts_to_block {
            FailedLogin::Block {
                until: now + self.hours_to_block * MILLIS_PER_HOUR,
            }
        } else {
            FailedLogin::Rejected
        }
    }

    pub fn blocked_error(&self) -> AppError {
        AppError::with_message(
            ErrorCode::AccountLocked,
            format!(
                "Too many failed login attempts. Your account has been blocked for {} hours.",
                self.hours_to_block
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Role;

    fn user() -> User {
        User {
            id: 1,
            name: "Rina".into(),
            email: "rina@cafe.id".into(),
            role: Role::Cashier,
            is_active: true,
            password_hash: String::new(),
            login_attempts: 0,
            block_expires: None,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
        }
    }

    #[test]
    fn test_precheck_order() {
        let guard = LoginGuard::new(3, 1);
        let now = 1_000_000;
        assert!(guard.precheck(&user(), now).is_ok());

        let mut u = user();
        u.block_expires = Some(now + 1);
        u.is_active = false;
        assert_eq!(guard.precheck(&u, now).unwrap_err().code, ErrorCode::AccountLocked);

        u.block_expires = Some(now - 1);
        assert_eq!(guard.precheck(&u, now).unwrap_err().code, ErrorCode::AccountDisabled);

        u.is_active = true;
        u.deleted_at = Some(5);
        assert_eq!(guard.precheck(&u, now).unwrap_err().code, ErrorCode::AccountDeleted);
    }

    #[test]
    fn test_block_after_threshold_exceeded() {
        let guard = LoginGuard::new(3, 2);
        let now = 10;
        assert_eq!(guard.on_failure(1, now), FailedLogin::Rejected);
        assert_eq!(guard.on_failure(3, now), FailedLogin::Rejected);
        assert_eq!(
            guard.on_failure(4, now),
            FailedLogin::Block {
                until: now + 2 * MILLIS_PER_HOUR
            }
        );
        assert!(guard.blocked_error().message.contains("2 hours"));
    }
}
