//! Midtrans Snap integration via REST API (no SDK dependency)

use serde::{Deserialize, Serialize};

use crate::BoxError;

const SNAP_SANDBOX: &str = "https://app.sandbox.midtrans.com/snap/v1";
const SNAP_PRODUCTION: &str = "https://app.midtrans.com/snap/v1";
const API_SANDBOX: &str = "https://api.sandbox.midtrans.com/v2";
const API_PRODUCTION: &str = "https://api.midtrans.com/v2";

/// Customer details forwarded to Snap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
struct TransactionDetails<'a> {
    order_id: &'a str,
    gross_amount: i64,
}

#[derive(Debug, Serialize)]
struct SnapRequest<'a> {
    transaction_details: TransactionDetails<'a>,
    customer_details: &'a CustomerDetails,
}

/// Snap transaction token
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapToken {
    pub token: String,
    pub redirect_url: String,
}

/// Subset of the transaction status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub order_id: String,
    pub transaction_status: String,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub gross_amount: Option<String>,
    #[serde(default)]
    pub payment_type: Option<String>,
}

impl TransactionStatus {
    /// Midtrans settled the payment
    pub fn is_settled(&self) -> bool {
        matches!(self.transaction_status.as_str(), "settlement" | "capture")
    }
}

/// Gateway order id for a café order
pub fn gateway_order_id(order_id: i64) -> String {
    format!("ORDER-{order_id}")
}

#[derive(Clone)]
pub struct MidtransClient {
    http: reqwest::Client,
    server_key: String,
    client_key: Option<String>,
    snap_base: String,
    api_base: String,
}

impl std::fmt::Debug for MidtransClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidtransClient")
            .field("snap_base", &self.snap_base)
            .finish_non_exhaustive()
    }
}

impl MidtransClient {
    pub fn new(server_key: String, client_key: Option<String>, production: bool) -> Self {
        let (snap, api) = if production {
            (SNAP_PRODUCTION, API_PRODUCTION)
        } else {
            (SNAP_SANDBOX, API_SANDBOX)
        };
        Self::with_base_urls(server_key, client_key, snap, api)
    }

    pub fn with_base_urls(
        server_key: String,
        client_key: Option<String>,
        snap_base: &str,
        api_base: &str,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_key,
            client_key,
            snap_base: snap_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Public key for the Snap.js popup
    pub fn client_key(&self) -> Option<&str> {
        self.client_key.as_deref()
    }

    /// Create a Snap transaction token for an order
    pub async fn create_transaction_token(
        &self,
        order_id: &str,
        gross_amount: i64,
        customer: &CustomerDetails,
    ) -> Result<SnapToken, BoxError> {
        let body = SnapRequest {
            transaction_details: TransactionDetails {
                order_id,
                gross_amount,
            },
            customer_details: customer,
        };

        let resp = self
            .http
            .post(format!("{}/transactions", self.snap_base))
            .basic_auth(&self.server_key, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let value: serde_json::Value = resp.json().await?;
        if !status.is_success() {
            return Err(format!("Midtrans create transaction failed ({status}): {value}").into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Look up a transaction's status
    pub async fn transaction_status(&self, order_id: &str) -> Result<TransactionStatus, BoxError> {
        let resp: serde_json::Value = self
            .http
            .get(format!("{}/{}/status", self.api_base, order_id))
            .basic_auth(&self.server_key, Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .json()
            .await?;

        serde_json::from_value(resp.clone())
            .map_err(|_| format!("Midtrans status lookup failed: {resp}").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let customer = CustomerDetails {
            first_name: Some("Meja 4".into()),
            ..Default::default()
        };
        let body = SnapRequest {
            transaction_details: TransactionDetails {
                order_id: "ORDER-1",
                gross_amount: 52_500,
            },
            customer_details: &customer,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["transaction_details"]["gross_amount"], 52_500);
        assert_eq!(json["customer_details"]["first_name"], "Meja 4");
        assert!(json["customer_details"].get("email").is_none());
    }

    #[test]
    fn test_status_settled() {
        let status: TransactionStatus = serde_json::from_str(
            r#"{"order_id":"ORDER-1","transaction_status":"settlement","status_code":"200"}"#,
        )
        .unwrap();
        assert!(status.is_settled());
        assert_eq!(gateway_order_id(1), "ORDER-1");
    }

    #[test]
    fn test_base_urls() {
        let client = MidtransClient::new("key".into(), None, false);
        assert_eq!(client.snap_base, SNAP_SANDBOX);
        let client = MidtransClient::with_base_urls("key".into(), None, "http://mock/", "http://mock/v2/");
        assert_eq!(client.api_base, "http://mock/v2");
    }
}
