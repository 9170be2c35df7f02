use crate::checkout::builder::PaymentRequestBuilder;
use crate::checkout::signing::{seal, status_signature, verify_with, MerchantCredentials, PAY_API_PATH};
use crate::domain::payment::{
    CallbackRequest, InitiatePaymentRequest, InitiatePaymentResponse, PaymentOutcome,
};
use crate::error::AppError;
use crate::gateways::phonepe::{status_from_code, PhonePeResponse};
use crate::gateways::PaymentGateway;
use crate::service::webhook_dispatcher::WebhookDispatcher;
use base64::Engine;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct PaymentService {
    pub builder: Arc<PaymentRequestBuilder>,
    pub credentials: MerchantCredentials,
    pub gateway: Arc<dyn PaymentGateway>,
    pub webhook_dispatcher: Option<WebhookDispatcher>,
}

impl PaymentService {
    pub async fn initiate(&self, req: InitiatePaymentRequest) -> Result<InitiatePaymentResponse, AppError> {
        let request = self
            .builder
            .build(&req.booking_id, &req.user_id, req.amount, &req.mobile_number)?;
        let envelope = seal(&request, &self.credentials, PAY_API_PATH)?;

        let started = Instant::now();
        let result = self.gateway.initiate_payment(&envelope).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(r) => tracing::info!(
                merchant_transaction_id = %request.merchant_transaction_id,
                gateway = %r.gateway_used,
                latency_ms,
                "payment initiated"
            ),
            Err(e) => tracing::warn!(
                merchant_transaction_id = %request.merchant_transaction_id,
                error = %e,
                latency_ms,
                "payment initiation failed"
            ),
        }
        let result = result?;

        Ok(InitiatePaymentResponse {
            merchant_transaction_id: request.merchant_transaction_id,
            status: result.response.status,
            amount_minor: request.amount,
            gateway_used: result.gateway_used,
            redirect_url: result.response.redirect_url,
        })
    }

    pub async fn handle_callback(
        &self,
        x_verify: Option<&str>,
        body: CallbackRequest,
    ) -> Result<PaymentOutcome, AppError> {
        let signature = x_verify.ok_or(AppError::SignatureMismatch)?;
        if !verify_with(&self.credentials, signature, &body.response) {
            tracing::warn!("rejected callback with bad signature");
            return Err(AppError::SignatureMismatch);
        }

        let outcome = decode_callback(&body.response, self.credentials.merchant_id())?;
        tracing::info!(
            merchant_transaction_id = %outcome.merchant_transaction_id,
            status = ?outcome.status,
            "payment callback verified"
        );

        if let Some(dispatcher) = self.webhook_dispatcher.clone() {
            let payload = serde_json::json!(outcome);
            tokio::spawn(async move {
                if let Err(e) = dispatcher.emit("payment.callback", payload).await {
                    tracing::warn!(error = %e, "booking webhook notification failed");
                }
            });
        }

        Ok(outcome)
    }

    pub async fn check_status(&self, merchant_transaction_id: &str) -> Result<PaymentOutcome, AppError> {
        if merchant_transaction_id.trim().is_empty() {
            return Err(AppError::validation("merchant transaction id is required"));
        }

        let signature = status_signature(&self.credentials, merchant_transaction_id);
        let result = self
            .gateway
            .check_status(merchant_transaction_id, &signature)
            .await?;

        Ok(PaymentOutcome {
            merchant_transaction_id: result
                .response
                .merchant_transaction_id
                .unwrap_or_else(|| merchant_transaction_id.to_string()),
            transaction_id: result.response.transaction_id,
            status: result.response.status,
            amount_minor: result.response.amount_minor,
            gateway_code: result.response.gateway_code,
        })
    }
}

/// Decodes an already verified callback payload addressed to `merchant_id`.
pub fn decode_callback(base64_payload: &str, merchant_id: &str) -> Result<PaymentOutcome, AppError> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(base64_payload.trim())
        .map_err(|e| AppError::MalformedCallback(format!("not base64: {e}")))?;
    let parsed: PhonePeResponse = serde_json::from_slice(&raw)
        .map_err(|e| AppError::MalformedCallback(format!("not a gateway payload: {e}")))?;

    let status = status_from_code(&parsed.code);
    let data = parsed
        .data
        .ok_or_else(|| AppError::MalformedCallback("missing data".to_string()))?;
    if data.merchant_id.as_deref() != Some(merchant_id) {
        return Err(AppError::MalformedCallback(
            "callback addressed to another merchant".to_string(),
        ));
    }
    let merchant_transaction_id = data
        .merchant_transaction_id
        .ok_or_else(|| AppError::MalformedCallback("missing merchantTransactionId".to_string()))?;

    Ok(PaymentOutcome {
        merchant_transaction_id,
        transaction_id: data.transaction_id,
        status,
        amount_minor: data.amount,
        gateway_code: parsed.code,
    })
}
