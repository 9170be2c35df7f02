pub mod checkout {
    pub mod builder;
    pub mod signing;
}
pub mod config;
pub mod domain {
    pub mod payment;
    pub mod slot;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod ops;
        pub mod payments;
        pub mod slot_status;
    }
    pub mod middleware {
        pub mod admin_auth;
    }
    pub mod routes;
}
pub mod service {
    pub mod payment_service;
    pub mod slot_status;
    pub mod webhook_dispatcher;
}
pub mod store;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub slot_status: service::slot_status::SlotStatusService,
}
