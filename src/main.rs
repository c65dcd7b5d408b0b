use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use service_booking::{
    create_app, request_timeout_for, AppConfig, AppState, BookingEndpointClient,
    BookingTransport, SimulatedTransport,
};

#[tokio::main]
async fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Startup aborted: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Booking rules: {} days ahead, excluded weekdays {:?}, {} morning and {} afternoon slots",
        config.rules.days_ahead,
        config.rules.excluded_weekdays,
        config.rules.morning_slots.len(),
        config.rules.afternoon_slots.len()
    );

    // Pick the transport for submitted bookings
    let transport: Arc<dyn BookingTransport> = match (&config.endpoint_url, config.skip_submission) {
        (Some(endpoint), false) => match BookingEndpointClient::new(endpoint, config.submission_timeout) {
            Ok(client) => {
                info!("Forwarding bookings to {}", client.endpoint());
                Arc::new(client)
            }
            Err(e) => {
                error!("Startup aborted: {}", e);
                process::exit(1);
            }
        },
        _ => {
            info!("Running in simulation mode: bookings are logged, not forwarded");
            Arc::new(SimulatedTransport)
        }
    };

    // Create shared application state
    let app_state = Arc::new(AppState::new(
        config.rules.clone(),
        transport,
        config.widget.clone(),
    ));

    let app = create_app(app_state, request_timeout_for(config.submission_timeout));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            process::exit(1);
        }
    };

    // Set up signal handler for graceful shutdown
    let shutdown = async {
        let ctrl_c = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("Received interrupt signal, starting graceful shutdown");
            },
            _ = terminate => {
                info!("Received terminate signal, starting graceful shutdown");
            },
        }
    };

    info!("Server is ready to accept connections");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!("Server error: {}", e);
        process::exit(1);
    }

    info!("Server has been gracefully shut down");
}
