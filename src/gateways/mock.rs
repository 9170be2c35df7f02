use crate::domain::payment::{PaymentStatus, SignedEnvelope};
use crate::error::AppError;
use crate::gateways::{GatewayResult, NormalizedGatewayResponse, PaymentGateway};
use std::sync::Mutex;

/// In-process gateway. `behavior` is one of `ALWAYS_SUCCESS` (default),
/// `ALWAYS_PENDING`, `ALWAYS_REJECT`, `ALWAYS_UNAVAILABLE`, `ALWAYS_TIMEOUT`.
pub struct MockGateway {
    pub gateway_name: String,
    pub behavior: String,
    last_envelope: Mutex<Option<SignedEnvelope>>,
    last_status_signature: Mutex<Option<String>>,
}

impl MockGateway {
    pub fn new(gateway_name: &str, behavior: &str) -> Self {
        Self {
            gateway_name: gateway_name.to_string(),
            behavior: behavior.to_string(),
            last_envelope: Mutex::new(None),
            last_status_signature: Mutex::new(None),
        }
    }

    pub fn last_envelope(&self) -> Option<SignedEnvelope> {
        self.last_envelope.lock().ok().and_then(|g| g.clone())
    }

    pub fn last_status_signature(&self) -> Option<String> {
        self.last_status_signature.lock().ok().and_then(|g| g.clone())
    }

    fn failure(&self) -> Option<AppError> {
        match self.behavior.as_str() {
            "ALWAYS_REJECT" => Some(AppError::GatewayRejected {
                code: "BAD_REQUEST".to_string(),
                message: "mock decline".to_string(),
            }),
            "ALWAYS_UNAVAILABLE" => Some(AppError::GatewayUnavailable {
                message: "HTTP_503: mock outage".to_string(),
                timed_out: false,
            }),
            "ALWAYS_TIMEOUT" => Some(AppError::GatewayUnavailable {
                message: "gateway timeout".to_string(),
                timed_out: true,
            }),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
impl PaymentGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn initiate_payment(&self, envelope: &SignedEnvelope) -> Result<GatewayResult, AppError> {
        if let Ok(mut slot) = self.last_envelope.lock() {
            *slot = Some(envelope.clone());
        }
        if let Some(e) = self.failure() {
            return Err(e);
        }

        Ok(GatewayResult {
            gateway_used: self.gateway_name.clone(),
            response: NormalizedGatewayResponse {
                status: PaymentStatus::Initiated,
                merchant_transaction_id: None,
                transaction_id: None,
                amount_minor: None,
                redirect_url: Some(format!("https://mock.gateway/pay/{}", uuid::Uuid::new_v4())),
                gateway_code: "PAYMENT_INITIATED".to_string(),
            },
        })
    }

    async fn check_status(
        &self,
        merchant_transaction_id: &str,
        signature: &str,
    ) -> Result<GatewayResult, AppError> {
        if let Ok(mut slot) = self.last_status_signature.lock() {
            *slot = Some(signature.to_string());
        }
        if let Some(e) = self.failure() {
            return Err(e);
        }

        let (status, code) = match self.behavior.as_str() {
            "ALWAYS_PENDING" => (PaymentStatus::Pending, "PAYMENT_PENDING"),
            _ => (PaymentStatus::Success, "PAYMENT_SUCCESS"),
        };

        Ok(GatewayResult {
            gateway_used: self.gateway_name.clone(),
            response: NormalizedGatewayResponse {
                status,
                merchant_transaction_id: Some(merchant_transaction_id.to_string()),
                transaction_id: Some(format!("mock_txn_{}", uuid::Uuid::new_v4())),
                amount_minor: None,
                redirect_url: None,
                gateway_code: code.to_string(),
            },
        })
    }
}
