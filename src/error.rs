use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors raised by the booking service.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Invalid rule table or service configuration. Fatal at startup.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A date handed to slot listing is not a calendar date.
    #[error("Invalid date selection: {0}")]
    Parse(String),

    /// Required booking fields were left blank.
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// The request body could not be read as a booking form.
    #[error("Unreadable request body: {0}")]
    InvalidRequest(String),

    /// The booking endpoint rejected the record or could not be reached.
    #[error("Booking submission failed: {0}")]
    Submission(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        BookingError::Submission(err.to_string())
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Config(format!("rules file is not valid JSON: {}", err))
    }
}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::Config(format!("rules file could not be read: {}", err))
    }
}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Parse(_)
            | BookingError::Validation(_)
            | BookingError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BookingError::Submission(_) => StatusCode::BAD_GATEWAY,
            BookingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Parse(_) => "Invalid selection, please choose the date again".to_string(),
            BookingError::Validation(fields) => {
                format!("Please fill in the required fields: {}", fields.join(", "))
            }
            BookingError::InvalidRequest(_) => {
                "The booking form could not be read, please check the entered values".to_string()
            }
            BookingError::Submission(_) => {
                "Booking failed, please try again later or contact the shop".to_string()
            }
            BookingError::Config(_) => {
                "The booking system is unavailable, please contact the shop".to_string()
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }

        let body = Json(json!({
            "success": false,
            "message": self.user_message(),
        }));

        (status, body).into_response()
    }
}
