use axum::{
    extract::{rejection::JsonRejection, Json as ExtractJson, Query, State},
    response::Json,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::BookingTransport;
use crate::error::{BookingError, BookingResult};
use crate::identity::SessionContext;
use crate::models::booking::{BookingResponse, BookingSubmission};
use crate::models::common::{SlotsQuery, WidgetInfo};
use crate::models::rules::{DatesResponse, RuleConfig, SlotsResponse};
use crate::services::assembler::assemble;
use crate::services::availability::{list_candidate_dates, list_slots};

// AppState struct containing shared resources
pub struct AppState {
    pub rules: RuleConfig,
    pub transport: Arc<dyn BookingTransport>,
    pub widget: WidgetInfo,
    /// Local wall-clock date used as day zero of the date list
    pub today: fn() -> NaiveDate,
    /// Instant stamped on assembled bookings
    pub now: fn() -> DateTime<Utc>,
}

impl AppState {
    pub fn new(rules: RuleConfig, transport: Arc<dyn BookingTransport>, widget: WidgetInfo) -> Self {
        Self {
            rules,
            transport,
            widget,
            today: local_today,
            now: Utc::now,
        }
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// List candidate dates endpoint
pub async fn list_dates(State(state): State<Arc<AppState>>) -> BookingResult<Json<DatesResponse>> {
    let today = (state.today)();
    let dates = list_candidate_dates(&state.rules, today)?;

    info!("Offering {} dates starting {}", dates.len(), today);
    Ok(Json(DatesResponse { dates }))
}

// List time slots for a selected date endpoint
pub async fn list_time_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SlotsQuery>,
) -> BookingResult<Json<SlotsResponse>> {
    let date = match params.date.filter(|d| !d.is_empty()) {
        Some(date) => date,
        None => {
            warn!("Slot listing requested without a date");
            return Err(BookingError::Parse("no date selected".to_string()));
        }
    };

    let slots = list_slots(&state.rules, &date).map_err(|e| {
        warn!("Rejected slot listing: {}", e);
        e
    })?;

    info!("Offering {} slots on {}", slots.len(), date);
    Ok(Json(SlotsResponse {
        date,
        slots: slots.into_owned(),
    }))
}

// Active rule table endpoint
pub async fn get_rules(State(state): State<Arc<AppState>>) -> Json<RuleConfig> {
    Json(state.rules.clone())
}

// Widget details endpoint
pub async fn get_widget_config(State(state): State<Arc<AppState>>) -> Json<WidgetInfo> {
    Json(state.widget.clone())
}

// Booking submission handler
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    body: Result<ExtractJson<BookingSubmission>, JsonRejection>,
) -> BookingResult<Json<BookingResponse>> {
    let ExtractJson(submission) = body.map_err(|rejection| {
        warn!("Rejected booking body: {}", rejection.body_text());
        BookingError::InvalidRequest(rejection.body_text())
    })?;

    let session = SessionContext::from_profile(submission.profile);
    info!(
        "Received booking submission for {} on {} at {} (authenticated: {})",
        submission.fields.plate,
        submission.fields.date,
        submission.fields.time,
        session.is_authenticated()
    );

    let missing = submission.fields.missing_required_fields();
    if !missing.is_empty() {
        warn!("Booking submission is missing fields: {:?}", missing);
        return Err(BookingError::Validation(missing));
    }

    let record = assemble(submission.fields, session.identity(), (state.now)());

    state.transport.submit(&record).await?;

    info!(
        "Booking accepted for {} on {} at {}",
        record.plate, record.date, record.time
    );

    Ok(Json(BookingResponse {
        success: true,
        message: "Booking received, we will arrange the service as soon as possible".to_string(),
        booking: record,
    }))
}
