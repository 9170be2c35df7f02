use booking_payments::checkout::builder::{build_payment_request_at, CheckoutSettings};
use booking_payments::checkout::signing::{
    encode_payload, seal, sign_payload, status_signature, verify_callback_signature, MerchantCredentials,
    PAY_API_PATH,
};
use booking_payments::domain::payment::RedirectMode;

const GOLDEN_PAYLOAD: &str = "eyJtZXJjaGFudElkIjoiUEdURVNUUEFZVUFUIiwibWVyY2hhbnRUcmFuc2FjdGlvbklkIjoiTVRfVEVTVF8xXzE3MDAwMDAwMDAwMDAiLCJtZXJjaGFudFVzZXJJZCI6IlUxIiwiYW1vdW50IjoxMDAwMCwicmVkaXJlY3RVcmwiOiJodHRwczovL2V4YW1wbGUudGVzdC9ib29raW5nL3BheW1lbnQtc3RhdHVzIiwicmVkaXJlY3RNb2RlIjoiUE9TVCIsImNhbGxiYWNrVXJsIjoiaHR0cHM6Ly9leGFtcGxlLnRlc3QvcGF5bWVudHMvY2FsbGJhY2siLCJtb2JpbGVOdW1iZXIiOiI5ODc2NTQzMjEwIiwicGF5bWVudEluc3RydW1lbnQiOnsidHlwZSI6IlBBWV9QQUdFIn19";
const GOLDEN_SIGNATURE: &str = "3001987ed7651a4ab1668ebbc1f003d321b3a384d59c3a03364b9db19e99a3f4###2";

fn settings() -> CheckoutSettings {
    CheckoutSettings {
        merchant_id: "PGTESTPAYUAT".to_string(),
        redirect_url: "https://example.test/booking/payment-status".to_string(),
        callback_url: "https://example.test/payments/callback".to_string(),
        redirect_mode: RedirectMode::Post,
    }
}

#[test]
fn golden_envelope_for_fixed_booking() {
    let req = build_payment_request_at(&settings(), "TEST_1", "U1", 100.00, "9876543210", 1_700_000_000_000)
        .unwrap();
    let creds = MerchantCredentials::new("PGTESTPAYUAT", "abc", "2").unwrap();

    let env = seal(&req, &creds, PAY_API_PATH).unwrap();
    assert_eq!(env.base64_payload, GOLDEN_PAYLOAD);
    assert_eq!(env.signature, GOLDEN_SIGNATURE);
}

#[test]
fn sign_payload_known_vector() {
    let sig = sign_payload("eyJ0ZXN0IjoxfQ==", "/pg/v1/pay", "abc", "1");
    assert_eq!(
        sig,
        "ed3fae92904a94bd29a8d848b425a14ecb6a7f30948482ccc1b335b41a2d8aa4###1"
    );
}

#[test]
fn sign_payload_is_deterministic() {
    let a = sign_payload(GOLDEN_PAYLOAD, PAY_API_PATH, "abc", "2");
    let b = sign_payload(GOLDEN_PAYLOAD, PAY_API_PATH, "abc", "2");
    assert_eq!(a, b);
    assert_eq!(a, GOLDEN_SIGNATURE);
}

#[test]
fn callback_signature_round_trips() {
    let sig = sign_payload(GOLDEN_PAYLOAD, "", "abc", "2");
    assert!(verify_callback_signature(&sig, GOLDEN_PAYLOAD, "abc", "2"));
    assert!(!verify_callback_signature(&sig, GOLDEN_PAYLOAD, "abd", "2"));
    assert!(!verify_callback_signature(&sig, GOLDEN_PAYLOAD, "abc", "3"));
}

#[test]
fn pay_signature_is_not_a_valid_callback_signature() {
    assert!(!verify_callback_signature(GOLDEN_SIGNATURE, GOLDEN_PAYLOAD, "abc", "2"));
}

#[test]
fn any_single_byte_mutation_fails_verification() {
    let sig = sign_payload(GOLDEN_PAYLOAD, "", "abc", "2");
    let bytes = GOLDEN_PAYLOAD.as_bytes();
    for i in 0..bytes.len() {
        let mut mutated = bytes.to_vec();
        mutated[i] = if mutated[i] == b'A' { b'B' } else { b'A' };
        let mutated = String::from_utf8(mutated).unwrap();
        assert!(
            !verify_callback_signature(&sig, &mutated, "abc", "2"),
            "mutation at byte {i} still verified"
        );
    }
}

#[test]
fn truncated_or_empty_signature_is_rejected() {
    let sig = sign_payload(GOLDEN_PAYLOAD, "", "abc", "2");
    assert!(!verify_callback_signature("", GOLDEN_PAYLOAD, "abc", "2"));
    assert!(!verify_callback_signature(&sig[..sig.len() - 1], GOLDEN_PAYLOAD, "abc", "2"));
}

#[test]
fn status_signature_covers_status_path() {
    let creds = MerchantCredentials::new("M1", "abc", "1").unwrap();
    let sig = status_signature(&creds, "MT_B1_1");
    assert_eq!(sig, sign_payload("", "/pg/v1/status/M1/MT_B1_1", "abc", "1"));
    assert!(sig.ends_with("###1"));
}

#[test]
fn seal_refuses_foreign_merchant() {
    let req = build_payment_request_at(&settings(), "TEST_1", "U1", 1.0, "9876543210", 1).unwrap();
    let creds = MerchantCredentials::new("OTHER", "abc", "2").unwrap();
    assert!(seal(&req, &creds, PAY_API_PATH).is_err());
}

#[test]
fn encoded_payload_decodes_to_camel_case_json() {
    use base64::Engine;

    let req = build_payment_request_at(&settings(), "B9", "U1", 12.5, "9876543210", 42).unwrap();
    let raw = base64::engine::general_purpose::STANDARD
        .decode(encode_payload(&req).unwrap())
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(v["merchantTransactionId"], "MT_B9_42");
    assert_eq!(v["amount"], 1250);
    assert_eq!(v["paymentInstrument"]["type"], "PAY_PAGE");
}
