use booking_payments::checkout::builder::{
    build_payment_request_at, normalize_mobile, to_minor_units, CheckoutSettings, PaymentRequestBuilder,
};
use booking_payments::domain::payment::RedirectMode;
use booking_payments::error::AppError;
use std::collections::HashSet;

fn settings() -> CheckoutSettings {
    CheckoutSettings {
        merchant_id: "M1".to_string(),
        redirect_url: "https://example.test/return".to_string(),
        callback_url: "https://example.test/payments/callback".to_string(),
        redirect_mode: RedirectMode::Redirect,
    }
}

#[test]
fn amount_is_rupees_times_hundred_rounded() {
    let amounts = [0.01, 0.5, 1.0, 19.99, 99.995, 100.0, 249.5, 1234.56, 4999.999, 100000.0];
    for amount in amounts {
        let req = build_payment_request_at(&settings(), "B1", "U1", amount, "9876543210", 1).unwrap();
        assert_eq!(req.amount, (amount * 100.0_f64).round() as i64, "amount {amount}");
    }
}

#[test]
fn non_positive_and_non_finite_amounts_fail() {
    for amount in [0.0, -1.0, f64::NAN, f64::INFINITY, 0.004] {
        let err = to_minor_units(amount).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "amount {amount}");
    }
}

#[test]
fn mobile_number_is_reduced_to_digits() {
    assert_eq!(normalize_mobile("987-654-3210").unwrap(), "9876543210");
    assert_eq!(normalize_mobile("(987) 654 3210").unwrap(), "9876543210");
    assert_eq!(normalize_mobile("+91 98765 43210").unwrap(), "9876543210");
    assert_eq!(normalize_mobile("09876543210").unwrap(), "9876543210");
}

#[test]
fn short_mobile_number_fails() {
    assert!(normalize_mobile("12345").is_err());
    assert!(normalize_mobile("").is_err());
}

#[test]
fn no_partial_request_on_bad_input() {
    let err = build_payment_request_at(&settings(), "B1", "U1", -5.0, "9876543210", 1).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = build_payment_request_at(&settings(), "", "U1", 5.0, "9876543210", 1).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = build_payment_request_at(&settings(), "B1", "!!", 5.0, "9876543210", 1).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn request_carries_settings() {
    let req = build_payment_request_at(&settings(), "TEST_1", "user-7", 10.0, "987-654-3210", 99).unwrap();
    assert_eq!(req.merchant_id, "M1");
    assert_eq!(req.merchant_transaction_id, "MT_TEST_1_99");
    assert_eq!(req.merchant_user_id, "user-7");
    assert_eq!(req.redirect_mode, RedirectMode::Redirect);
    assert_eq!(req.callback_url, "https://example.test/payments/callback");
    assert_eq!(req.mobile_number, "9876543210");
}

#[test]
fn rapid_attempts_get_unique_transaction_ids() {
    let builder = PaymentRequestBuilder::new(settings()).unwrap();
    let mut seen = HashSet::new();
    for _ in 0..500 {
        let req = builder.build("B1", "U1", 10.0, "9876543210").unwrap();
        assert!(seen.insert(req.merchant_transaction_id));
    }
}

#[test]
fn builder_requires_merchant_id() {
    let mut s = settings();
    s.merchant_id = " ".to_string();
    let err = PaymentRequestBuilder::new(s).unwrap_err();
    assert!(matches!(err, AppError::MissingCredentials("merchant_id")));
}
