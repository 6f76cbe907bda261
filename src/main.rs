use library_fees::{
    adapters::{memory::InMemoryLibraryStore, mock::PaymentGateway as MockPaymentGateway},
    api::{handlers::AppState, router::create_router},
    application::ServiceDependencies,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `LIBRARY_SEED_SAMPLE_DATA` is on unless set to `false` or `0`
fn seed_sample_data_enabled() -> bool {
    std::env::var("LIBRARY_SEED_SAMPLE_DATA")
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0"))
        .unwrap_or(true)
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_fees=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize adapters
    let store = Arc::new(InMemoryLibraryStore::new());
    if seed_sample_data_enabled() {
        match store.seed_sample_data(chrono::Utc::now()) {
            Ok(count) => tracing::info!("Seeded {} sample books", count),
            Err(e) => tracing::warn!("Failed to seed sample data: {}", e),
        }
    }
    let payment_gateway = Arc::new(MockPaymentGateway::new());

    // Create service dependencies
    let service_deps = ServiceDependencies {
        books: store.clone(),
        borrow_records: store,
        payment_gateway,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
