use axum::{
    error_handling::HandleErrorLayer,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::{BoxError, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::error::BookingError;
use crate::handlers::api::{
    get_rules, get_widget_config, list_dates, list_time_slots, submit_booking, AppState,
};
use crate::handlers::test::health_check;

/// Headroom the request timeout leaves over the booking endpoint timeout
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let health_route = Router::new().route("/health", get(health_check));

    let api_routes = Router::new()
        .route("/api/dates", get(list_dates))
        .route("/api/slots", get(list_time_slots))
        .route("/api/rules", get(get_rules))
        .route("/api/widget-config", get(get_widget_config))
        .route("/api/bookings", post(submit_booking));

    Router::new()
        .merge(health_route)
        .merge(api_routes)
        .with_state(app_state)
}

/// Request timeout for the whole stack. Outlasts the endpoint call so its
/// failure reaches the handler first.
pub fn request_timeout_for(submission_timeout: Duration) -> Duration {
    submission_timeout + REQUEST_TIMEOUT_MARGIN
}

// Error handler
async fn handle_error(error: BoxError) -> Response {
    if error.is::<tower::timeout::error::Elapsed>() {
        error!("Request timed out before the booking endpoint answered");
        BookingError::Submission("request timed out".to_string()).into_response()
    } else {
        BookingError::Config(format!("unhandled internal error: {}", error)).into_response()
    }
}

/// Router wrapped in the service layers used in production
pub fn create_app(app_state: Arc<AppState>, request_timeout: Duration) -> Router {
    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .load_shed()
            .concurrency_limit(64)
            .timeout(request_timeout)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)),
    )
}
