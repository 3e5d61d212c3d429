//! Order status machine
//!
//! Status is derived from the `paid` and `finished` flags:
//!
//! ```text
//!  Unpaid --Pay--> Processing --Finish--> Finished
//!     ^               |
//!     +-----Unpay-----+
//! ```
//!
//! Bookings use the same machine.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Unpaid,
    Processing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusAction {
    Pay,
    Unpay,
    Finish,
}

/// Status change request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub action: StatusAction,
}

impl OrderStatus {
    /// A finished order is always treated as finished, even if `paid` is unset
    pub fn from_flags(paid: bool, finished: bool) -> Self {
        match (paid, finished) {
            (_, true) => Self::Finished,
            (true, false) => Self::Processing,
            (false, false) => Self::Unpaid,
        }
    }

    /// `(paid, finished)` flags for this status
    pub fn flags(self) -> (bool, bool) {
        match self {
            Self::Unpaid => (false, false),
            Self::Processing => (true, false),
            Self::Finished => (true, true),
        }
    }

    pub fn apply(self, action: StatusAction) -> Result<Self, AppError> {
        match (self, action) {
            (Self::Unpaid, StatusAction::Pay) => Ok(Self::Processing),
            (_, StatusAction::Pay) => Err(AppError::new(ErrorCode::OrderAlreadyPaid)),

            (Self::Processing, StatusAction::Unpay) => Ok(Self::Unpaid),
            (Self::Processing, StatusAction::Finish) => Ok(Self::Finished),

            (Self::Unpaid, StatusAction::Unpay | StatusAction::Finish) => {
                Err(AppError::new(ErrorCode::OrderNotPaid))
            }
            (Self::Finished, StatusAction::Unpay | StatusAction::Finish) => {
                Err(AppError::new(ErrorCode::OrderAlreadyCompleted))
            }
        }
    }

    pub fn is_finished(self) -> bool {
        self == Self::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(OrderStatus::from_flags(false, false), OrderStatus::Unpaid);
        assert_eq!(OrderStatus::from_flags(true, false), OrderStatus::Processing);
        assert_eq!(OrderStatus::from_flags(true, true), OrderStatus::Finished);
        assert_eq!(OrderStatus::from_flags(false, true), OrderStatus::Finished);
    }

    #[test]
    fn test_happy_path() {
        let s = OrderStatus::Unpaid.apply(StatusAction::Pay).unwrap();
        assert_eq!(s, OrderStatus::Processing);
        let s = s.apply(StatusAction::Finish).unwrap();
        assert_eq!(s, OrderStatus::Finished);
        assert_eq!(s.flags(), (true, true));
    }

    #[test]
    fn test_unpay_reverts_processing() {
        assert_eq!(
            OrderStatus::Processing.apply(StatusAction::Unpay).unwrap(),
            OrderStatus::Unpaid
        );
    }

    #[test]
    fn test_rejected_transitions() {
        let code = |s: OrderStatus, a| s.apply(a).unwrap_err().code;
        assert_eq!(code(OrderStatus::Processing, StatusAction::Pay), ErrorCode::OrderAlreadyPaid);
        assert_eq!(code(OrderStatus::Finished, StatusAction::Pay), ErrorCode::OrderAlreadyPaid);
        assert_eq!(code(OrderStatus::Unpaid, StatusAction::Unpay), ErrorCode::OrderNotPaid);
        assert_eq!(code(OrderStatus::Unpaid, StatusAction::Finish), ErrorCode::OrderNotPaid);
        assert_eq!(
            code(OrderStatus::Finished, StatusAction::Unpay),
            ErrorCode::OrderAlreadyCompleted
        );
        assert_eq!(
            code(OrderStatus::Finished, StatusAction::Finish),
            ErrorCode::OrderAlreadyCompleted
        );
    }

    #[test]
    fn test_action_serde() {
        let update: StatusUpdate = serde_json::from_str(r#"{"action":"finish"}"#).unwrap();
        assert_eq!(update.action, StatusAction::Finish);
        assert_eq!(serde_json::to_string(&OrderStatus::Processing).unwrap(), "\"processing\"");
    }
}
