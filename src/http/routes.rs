use crate::http::handlers::{ops, payments, slot_status};
use crate::http::middleware::admin_auth::require_internal_api_key;
use crate::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState, internal_api_key: String) -> Router {
    let slot_admin_routes = Router::new()
        .route(
            "/events/:event_id/games/:game_id/slot-status",
            post(slot_status::set_slot_status).delete(slot_status::clear_slot_status),
        )
        .layer(from_fn_with_state(internal_api_key, require_internal_api_key));

    Router::new()
        .route("/health", get(payments::health))
        .route("/payments/initiate", post(payments::initiate_payment))
        .route("/payments/callback", post(payments::payment_callback))
        .route(
            "/payments/:merchant_transaction_id/status",
            get(payments::payment_status),
        )
        .route(
            "/events/:event_id/games/:game_id/slot-status",
            get(slot_status::get_slot_status),
        )
        .route("/ops/readiness", get(ops::readiness))
        .route("/ops/liveness", get(ops::liveness))
        .merge(slot_admin_routes)
        .with_state(state)
}
