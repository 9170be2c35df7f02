use crate::checkout::builder::CheckoutSettings;
use crate::checkout::signing::MerchantCredentials;
use crate::domain::payment::RedirectMode;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub internal_api_key: String,
    pub public_base_url: String,
    pub phonepe_base_url: String,
    pub phonepe_merchant_id: String,
    pub phonepe_salt_key: String,
    pub phonepe_salt_index: String,
    pub phonepe_redirect_mode: String,
    pub redirect_url: String,
    pub callback_url: String,
    pub gateway_timeout_ms: u64,
    pub slot_status_ttl_secs: u64,
    pub slot_sweep_interval_secs: u64,
    pub booking_webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            internal_api_key: std::env::var("INTERNAL_API_KEY")
                .unwrap_or_else(|_| "dev-internal-key".to_string()),
            phonepe_base_url: std::env::var("PHONEPE_BASE_URL")
                .unwrap_or_else(|_| "https://api-preprod.phonepe.com/apis/pg-sandbox".to_string())
                .trim_end_matches('/')
                .to_string(),
            phonepe_merchant_id: std::env::var("PHONEPE_MERCHANT_ID").unwrap_or_default(),
            phonepe_salt_key: std::env::var("PHONEPE_SALT_KEY").unwrap_or_default(),
            phonepe_salt_index: std::env::var("PHONEPE_SALT_INDEX").unwrap_or_else(|_| "1".to_string()),
            phonepe_redirect_mode: std::env::var("PHONEPE_REDIRECT_MODE")
                .unwrap_or_else(|_| "POST".to_string()),
            redirect_url: std::env::var("PHONEPE_REDIRECT_URL")
                .unwrap_or_else(|_| format!("{public_base_url}/booking/payment-status")),
            callback_url: std::env::var("PHONEPE_CALLBACK_URL")
                .unwrap_or_else(|_| format!("{public_base_url}/payments/callback")),
            gateway_timeout_ms: env_u64("GATEWAY_TIMEOUT_MS", 20_000),
            slot_status_ttl_secs: env_u64("SLOT_STATUS_TTL_SECS", 900),
            slot_sweep_interval_secs: env_u64("SLOT_SWEEP_INTERVAL_SECS", 60),
            booking_webhook_url: std::env::var("BOOKING_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            public_base_url,
        }
    }

    pub fn credentials(&self) -> Result<MerchantCredentials, AppError> {
        MerchantCredentials::new(
            &self.phonepe_merchant_id,
            &self.phonepe_salt_key,
            &self.phonepe_salt_index,
        )
    }

    pub fn checkout_settings(&self) -> Result<CheckoutSettings, AppError> {
        let redirect_mode = RedirectMode::parse(&self.phonepe_redirect_mode).ok_or_else(|| {
            AppError::validation(format!(
                "PHONEPE_REDIRECT_MODE must be POST or REDIRECT, got {}",
                self.phonepe_redirect_mode
            ))
        })?;

        Ok(CheckoutSettings {
            merchant_id: self.phonepe_merchant_id.trim().to_string(),
            redirect_url: self.redirect_url.clone(),
            callback_url: self.callback_url.clone(),
            redirect_mode,
        })
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
