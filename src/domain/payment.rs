use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedirectMode {
    Post,
    Redirect,
}

impl RedirectMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "POST" => Some(Self::Post),
            "REDIRECT" => Some(Self::Redirect),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentInstrument {
    PayPage,
}

/// Payment-initiation payload as the gateway expects it, field order included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_id: String,
    pub merchant_transaction_id: String,
    pub merchant_user_id: String,
    /// Paise.
    pub amount: i64,
    pub redirect_url: String,
    pub redirect_mode: RedirectMode,
    pub callback_url: String,
    pub mobile_number: String,
    pub payment_instrument: PaymentInstrument,
}

/// Serializes directly into the pay endpoint body: `{"request": .., "xVerify": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    #[serde(rename = "request")]
    pub base64_payload: String,
    #[serde(rename = "xVerify")]
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub booking_id: String,
    pub user_id: String,
    /// Rupees.
    pub amount: f64,
    pub mobile_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Initiated,
    Success,
    Pending,
    Failure,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitiatePaymentResponse {
    pub merchant_transaction_id: String,
    pub status: PaymentStatus,
    pub amount_minor: i64,
    pub gateway_used: String,
    pub redirect_url: Option<String>,
}

/// Body the gateway posts to the callback URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub response: String,
}

/// Verified result of a callback or a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub merchant_transaction_id: String,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub amount_minor: Option<i64>,
    pub gateway_code: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_page_instrument_serializes_as_tagged_object() {
        let v = serde_json::to_value(PaymentInstrument::PayPage).unwrap();
        assert_eq!(v, serde_json::json!({"type": "PAY_PAGE"}));
    }

    #[test]
    fn envelope_uses_gateway_field_names() {
        let env = SignedEnvelope {
            base64_payload: "e30=".to_string(),
            signature: "abc###1".to_string(),
        };
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v, serde_json::json!({"request": "e30=", "xVerify": "abc###1"}));
    }

    #[test]
    fn redirect_mode_parse_is_case_insensitive() {
        assert_eq!(RedirectMode::parse("post"), Some(RedirectMode::Post));
        assert_eq!(RedirectMode::parse(" Redirect "), Some(RedirectMode::Redirect));
        assert_eq!(RedirectMode::parse("GET"), None);
    }
}
