#[test]
fn internal_api_key_env_name_is_stable() {
    let cfg = booking_payments::config::AppConfig::from_env();
    assert!(!cfg.internal_api_key.is_empty());
    assert!(cfg.gateway_timeout_ms > 0);
    assert!(cfg.callback_url.ends_with("/payments/callback"));
}

#[test]
fn missing_salt_key_fails_fast() {
    let mut cfg = booking_payments::config::AppConfig::from_env();
    cfg.phonepe_merchant_id = "M1".to_string();
    cfg.phonepe_salt_key = String::new();
    assert!(cfg.credentials().is_err());
}

#[test]
fn unknown_redirect_mode_is_rejected() {
    let mut cfg = booking_payments::config::AppConfig::from_env();
    cfg.phonepe_redirect_mode = "GET".to_string();
    assert!(cfg.checkout_settings().is_err());
}

#[test]
fn documented_endpoints_exist_in_readme() {
    let readme = std::fs::read_to_string("README.md").unwrap_or_default();
    assert!(readme.contains("/payments/initiate"));
    assert!(readme.contains("/payments/callback"));
    assert!(readme.contains("/ops/readiness"));
    assert!(readme.contains("/events/:event_id/games/:game_id/slot-status"));
}
