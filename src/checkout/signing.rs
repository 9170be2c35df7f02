use crate::domain::payment::{PaymentRequest, SignedEnvelope};
use crate::error::AppError;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const CHECKSUM_SEPARATOR: &str = "###";
pub const PAY_API_PATH: &str = "/pg/v1/pay";

/// Merchant id and salt material shared with the gateway.
#[derive(Clone)]
pub struct MerchantCredentials {
    merchant_id: String,
    salt_key: String,
    salt_index: String,
}

impl MerchantCredentials {
    pub fn new(merchant_id: &str, salt_key: &str, salt_index: &str) -> Result<Self, AppError> {
        let merchant_id = merchant_id.trim();
        let salt_key = salt_key.trim();
        let salt_index = salt_index.trim();
        if merchant_id.is_empty() {
            return Err(AppError::MissingCredentials("merchant_id"));
        }
        if salt_key.is_empty() {
            return Err(AppError::MissingCredentials("salt_key"));
        }
        if salt_index.is_empty() {
            return Err(AppError::MissingCredentials("salt_index"));
        }

        Ok(Self {
            merchant_id: merchant_id.to_string(),
            salt_key: salt_key.to_string(),
            salt_index: salt_index.to_string(),
        })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn salt_index(&self) -> &str {
        &self.salt_index
    }

    pub(crate) fn salt_key(&self) -> &str {
        &self.salt_key
    }
}

impl std::fmt::Debug for MerchantCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantCredentials")
            .field("merchant_id", &self.merchant_id)
            .field("salt_key", &"<redacted>")
            .field("salt_index", &self.salt_index)
            .finish()
    }
}

/// `hex(sha256(payload ++ api_path ++ salt_key)) ++ "###" ++ salt_index`
pub fn sign_payload(base64_payload: &str, api_path: &str, salt_key: &str, salt_index: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base64_payload.as_bytes());
    hasher.update(api_path.as_bytes());
    hasher.update(salt_key.as_bytes());
    let digest = hasher.finalize();

    format!("{}{}{}", hex::encode(digest), CHECKSUM_SEPARATOR, salt_index)
}

/// Callback signatures cover the payload and salt only; no api path.
pub fn verify_callback_signature(
    received_signature: &str,
    payload: &str,
    salt_key: &str,
    salt_index: &str,
) -> bool {
    let expected = sign_payload(payload, "", salt_key, salt_index);
    received_signature
        .trim()
        .as_bytes()
        .ct_eq(expected.as_bytes())
        .into()
}

pub fn encode_payload(request: &PaymentRequest) -> Result<String, AppError> {
    let json = serde_json::to_vec(request)
        .map_err(|e| AppError::validation(format!("payment request not encodable: {e}")))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(json))
}

pub fn seal(
    request: &PaymentRequest,
    credentials: &MerchantCredentials,
    api_path: &str,
) -> Result<SignedEnvelope, AppError> {
    if request.merchant_id != credentials.merchant_id {
        return Err(AppError::validation(
            "payment request merchant does not match signing credentials",
        ));
    }

    let base64_payload = encode_payload(request)?;
    let signature = sign_payload(
        &base64_payload,
        api_path,
        credentials.salt_key(),
        credentials.salt_index(),
    );

    Ok(SignedEnvelope {
        base64_payload,
        signature,
    })
}

pub fn status_path(merchant_id: &str, merchant_transaction_id: &str) -> String {
    format!("/pg/v1/status/{merchant_id}/{merchant_transaction_id}")
}

/// Status checks sign an empty payload over the status path.
pub fn status_signature(credentials: &MerchantCredentials, merchant_transaction_id: &str) -> String {
    sign_payload(
        "",
        &status_path(credentials.merchant_id(), merchant_transaction_id),
        credentials.salt_key(),
        credentials.salt_index(),
    )
}

pub fn verify_with(credentials: &MerchantCredentials, received_signature: &str, payload: &str) -> bool {
    verify_callback_signature(
        received_signature,
        payload,
        credentials.salt_key(),
        credentials.salt_index(),
    )
}
