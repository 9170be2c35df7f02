use crate::domain::payment::{PaymentInstrument, PaymentRequest, RedirectMode};
use crate::error::AppError;
use std::sync::atomic::{AtomicI64, Ordering};

pub const TRANSACTION_PREFIX: &str = "MT";
pub const MAX_TRANSACTION_ID_LEN: usize = 38;
pub const MAX_MERCHANT_USER_ID_LEN: usize = 36;

#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub merchant_id: String,
    pub redirect_url: String,
    pub callback_url: String,
    pub redirect_mode: RedirectMode,
}

/// Hands out strictly increasing millisecond stamps, so two attempts in the
/// same millisecond still get distinct transaction ids.
#[derive(Debug, Default)]
pub struct TransactionClock {
    last_millis: AtomicI64,
}

impl TransactionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_millis(&self) -> i64 {
        self.advance(chrono::Utc::now().timestamp_millis())
    }

    pub fn advance(&self, now_millis: i64) -> i64 {
        let mut last = self.last_millis.load(Ordering::Acquire);
        loop {
            let next = if now_millis > last { now_millis } else { last + 1 };
            match self
                .last_millis
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}

#[derive(Debug)]
pub struct PaymentRequestBuilder {
    pub settings: CheckoutSettings,
    clock: TransactionClock,
}

impl PaymentRequestBuilder {
    pub fn new(settings: CheckoutSettings) -> Result<Self, AppError> {
        if settings.merchant_id.trim().is_empty() {
            return Err(AppError::MissingCredentials("merchant_id"));
        }
        Ok(Self {
            settings,
            clock: TransactionClock::new(),
        })
    }

    pub fn build(
        &self,
        booking_id: &str,
        user_id: &str,
        amount_in_rupees: f64,
        mobile_number: &str,
    ) -> Result<PaymentRequest, AppError> {
        build_payment_request_at(
            &self.settings,
            booking_id,
            user_id,
            amount_in_rupees,
            mobile_number,
            self.clock.next_millis(),
        )
    }
}

/// Same as [`PaymentRequestBuilder::build`] with the transaction stamp supplied.
pub fn build_payment_request_at(
    settings: &CheckoutSettings,
    booking_id: &str,
    user_id: &str,
    amount_in_rupees: f64,
    mobile_number: &str,
    stamp_millis: i64,
) -> Result<PaymentRequest, AppError> {
    let amount = to_minor_units(amount_in_rupees)?;
    let mobile_number = normalize_mobile(mobile_number)?;
    let merchant_user_id = merchant_user_id(user_id)?;
    let merchant_transaction_id = merchant_transaction_id(booking_id, stamp_millis)?;

    Ok(PaymentRequest {
        merchant_id: settings.merchant_id.clone(),
        merchant_transaction_id,
        merchant_user_id,
        amount,
        redirect_url: settings.redirect_url.clone(),
        redirect_mode: settings.redirect_mode,
        callback_url: settings.callback_url.clone(),
        mobile_number,
        payment_instrument: PaymentInstrument::PayPage,
    })
}

pub fn to_minor_units(amount_in_rupees: f64) -> Result<i64, AppError> {
    if !amount_in_rupees.is_finite() || amount_in_rupees <= 0.0 {
        return Err(AppError::validation(format!(
            "amount must be a positive number, got {amount_in_rupees}"
        )));
    }

    let minor = (amount_in_rupees * 100.0).round();
    if minor < 1.0 {
        return Err(AppError::validation("amount rounds to zero paise"));
    }
    if minor >= i64::MAX as f64 {
        return Err(AppError::validation("amount is too large"));
    }
    Ok(minor as i64)
}

pub fn normalize_mobile(raw: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let local = match digits.len() {
        12 if digits.starts_with("91") => &digits[2..],
        11 if digits.starts_with('0') => &digits[1..],
        _ => digits.as_str(),
    };

    if local.len() != 10 {
        return Err(AppError::validation(format!(
            "mobile number must have 10 digits, got {}",
            local.len()
        )));
    }
    Ok(local.to_string())
}

pub fn merchant_transaction_id(booking_id: &str, stamp_millis: i64) -> Result<String, AppError> {
    let booking = sanitize_identifier(booking_id);
    if booking.is_empty() {
        return Err(AppError::validation("booking id is required"));
    }

    let stamp = stamp_millis.to_string();
    let room = MAX_TRANSACTION_ID_LEN.saturating_sub(TRANSACTION_PREFIX.len() + stamp.len() + 2);
    let booking: String = booking.chars().take(room).collect();

    Ok(format!("{TRANSACTION_PREFIX}_{booking}_{stamp}"))
}

fn merchant_user_id(user_id: &str) -> Result<String, AppError> {
    let id = sanitize_identifier(user_id);
    if id.is_empty() {
        return Err(AppError::validation("user id is required"));
    }
    if id.len() > MAX_MERCHANT_USER_ID_LEN {
        return Err(AppError::validation(format!(
            "user id longer than {MAX_MERCHANT_USER_ID_LEN} characters"
        )));
    }
    Ok(id)
}

fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
