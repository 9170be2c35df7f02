use crate::domain::payment::{PaymentStatus, SignedEnvelope};
use crate::error::AppError;
use serde::{Deserialize, Serialize};

pub mod mock;
pub mod phonepe;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedGatewayResponse {
    pub status: PaymentStatus,
    pub merchant_transaction_id: Option<String>,
    pub transaction_id: Option<String>,
    pub amount_minor: Option<i64>,
    pub redirect_url: Option<String>,
    pub gateway_code: String,
}

#[derive(Debug, Clone)]
pub struct GatewayResult {
    pub gateway_used: String,
    pub response: NormalizedGatewayResponse,
}

/// One round trip per call; implementations never retry.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    async fn initiate_payment(&self, envelope: &SignedEnvelope) -> Result<GatewayResult, AppError>;

    async fn check_status(
        &self,
        merchant_transaction_id: &str,
        signature: &str,
    ) -> Result<GatewayResult, AppError>;
}
