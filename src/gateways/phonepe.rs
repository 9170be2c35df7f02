use crate::checkout::signing::{status_path, PAY_API_PATH};
use crate::domain::payment::{PaymentStatus, SignedEnvelope};
use crate::error::AppError;
use crate::gateways::{GatewayResult, NormalizedGatewayResponse, PaymentGateway};
use serde::{Deserialize, Serialize};

pub struct PhonePeGateway {
    pub base_url: String,
    pub merchant_id: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

/// Response shape shared by the pay, status and callback payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonePeResponse {
    pub success: bool,
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<PhonePeData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhonePeData {
    pub merchant_id: Option<String>,
    pub merchant_transaction_id: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<i64>,
    pub state: Option<String>,
    pub response_code: Option<String>,
    pub instrument_response: Option<InstrumentResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstrumentResponse {
    #[serde(rename = "type")]
    pub instrument_type: Option<String>,
    pub redirect_info: Option<RedirectInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectInfo {
    pub url: String,
    #[serde(default)]
    pub method: Option<String>,
}

pub fn status_from_code(code: &str) -> PaymentStatus {
    match code {
        "PAYMENT_SUCCESS" => PaymentStatus::Success,
        "PAYMENT_PENDING" => PaymentStatus::Pending,
        _ => PaymentStatus::Failure,
    }
}

impl PhonePeResponse {
    pub fn normalize(self, status: PaymentStatus) -> NormalizedGatewayResponse {
        let data = self.data.unwrap_or_default();
        NormalizedGatewayResponse {
            status,
            merchant_transaction_id: data.merchant_transaction_id,
            transaction_id: data.transaction_id,
            amount_minor: data.amount,
            redirect_url: data
                .instrument_response
                .and_then(|ir| ir.redirect_info)
                .map(|ri| ri.url),
            gateway_code: self.code,
        }
    }
}

impl PhonePeGateway {
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<PhonePeResponse, AppError> {
        let resp = request
            .header("X-MERCHANT-ID", &self.merchant_id)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await;

        let resp = match resp {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                tracing::warn!(timeout_ms = self.timeout_ms, "phonepe call timed out");
                return Err(AppError::GatewayUnavailable {
                    message: "gateway timeout".to_string(),
                    timed_out: true,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "phonepe call failed");
                return Err(AppError::GatewayUnavailable {
                    message: e.to_string(),
                    timed_out: false,
                });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "phonepe returned non-2xx");
            return Err(AppError::GatewayUnavailable {
                message: format!("HTTP_{}: {}", status.as_u16(), body.chars().take(200).collect::<String>()),
                timed_out: false,
            });
        }

        resp.json().await.map_err(|e| AppError::GatewayUnavailable {
            message: format!("unreadable gateway response: {e}"),
            timed_out: false,
        })
    }
}

#[async_trait::async_trait]
impl PaymentGateway for PhonePeGateway {
    fn name(&self) -> &'static str {
        "phonepe"
    }

    async fn initiate_payment(&self, envelope: &SignedEnvelope) -> Result<GatewayResult, AppError> {
        let url = format!("{}{}", self.base_url, PAY_API_PATH);
        let request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-VERIFY", &envelope.signature)
            .json(envelope);

        let body = self.send(request).await?;
        if !body.success {
            return Err(AppError::GatewayRejected {
                code: body.code,
                message: body.message,
            });
        }
        Ok(GatewayResult {
            gateway_used: self.name().to_string(),
            response: body.normalize(PaymentStatus::Initiated),
        })
    }

    async fn check_status(
        &self,
        merchant_transaction_id: &str,
        signature: &str,
    ) -> Result<GatewayResult, AppError> {
        let url = format!(
            "{}{}",
            self.base_url,
            status_path(&self.merchant_id, merchant_transaction_id)
        );
        let request = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .header("X-VERIFY", signature);

        // Pending and failed payments come back as `success: false`; the code decides.
        let body = self.send(request).await?;
        let status = status_from_code(&body.code);
        Ok(GatewayResult {
            gateway_used: self.name().to_string(),
            response: body.normalize(status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_response_yields_redirect_url() {
        let raw = serde_json::json!({
            "success": true,
            "code": "PAYMENT_INITIATED",
            "message": "Payment initiated",
            "data": {
                "merchantId": "M1",
                "merchantTransactionId": "MT_B1_1",
                "instrumentResponse": {
                    "type": "PAY_PAGE",
                    "redirectInfo": {"url": "https://pay.example/p/1", "method": "GET"}
                }
            }
        });
        let resp: PhonePeResponse = serde_json::from_value(raw).unwrap();
        let out = resp.normalize(PaymentStatus::Initiated);
        assert_eq!(out.redirect_url.as_deref(), Some("https://pay.example/p/1"));
        assert_eq!(out.merchant_transaction_id.as_deref(), Some("MT_B1_1"));
    }

    #[test]
    fn unknown_codes_count_as_failure() {
        assert_eq!(status_from_code("PAYMENT_SUCCESS"), PaymentStatus::Success);
        assert_eq!(status_from_code("PAYMENT_PENDING"), PaymentStatus::Pending);
        assert_eq!(status_from_code("PAYMENT_ERROR"), PaymentStatus::Failure);
        assert_eq!(status_from_code("TIMED_OUT"), PaymentStatus::Failure);
    }
}
