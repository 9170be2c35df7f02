use booking_payments::checkout::builder::PaymentRequestBuilder;
use booking_payments::config::AppConfig;
use booking_payments::domain::slot::SlotStatusRecord;
use booking_payments::gateways::phonepe::PhonePeGateway;
use booking_payments::http::routes::build_router;
use booking_payments::service::payment_service::PaymentService;
use booking_payments::service::slot_status::SlotStatusService;
use booking_payments::service::webhook_dispatcher::WebhookDispatcher;
use booking_payments::store::memory::InMemoryTtlStore;
use booking_payments::store::{spawn_sweeper, KeyValueStore};
use booking_payments::AppState;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let credentials = cfg.credentials()?;
    let builder = PaymentRequestBuilder::new(cfg.checkout_settings()?)?;

    let client = reqwest::Client::new();
    let gateway = Arc::new(PhonePeGateway {
        base_url: cfg.phonepe_base_url.clone(),
        merchant_id: credentials.merchant_id().to_string(),
        timeout_ms: cfg.gateway_timeout_ms,
        client: client.clone(),
    });

    let webhook_dispatcher = cfg.booking_webhook_url.clone().map(|target_url| WebhookDispatcher {
        target_url,
        timeout_ms: cfg.gateway_timeout_ms,
        client: client.clone(),
    });

    let payment_service = PaymentService {
        builder: Arc::new(builder),
        credentials,
        gateway,
        webhook_dispatcher,
    };

    let slot_store: Arc<dyn KeyValueStore<SlotStatusRecord>> = Arc::new(InMemoryTtlStore::new());
    spawn_sweeper(
        slot_store.clone(),
        Duration::from_secs(cfg.slot_sweep_interval_secs),
    );

    let state = AppState {
        payment_service,
        slot_status: SlotStatusService {
            store: slot_store,
            default_ttl: Duration::from_secs(cfg.slot_status_ttl_secs),
        },
    };

    let app = build_router(state, cfg.internal_api_key.clone());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(
        "listening on {} (gateway {})",
        cfg.bind_addr,
        cfg.phonepe_base_url
    );
    axum::serve(listener, app).await?;
    Ok(())
}
