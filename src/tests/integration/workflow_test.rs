use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::client::BookingEndpointClient;
use crate::error::BookingError;
use crate::routes::request_timeout_for;
use crate::tests::common::fixtures::{
    booking_payload, setup_layered_test_server, setup_test_server, spawn_booking_endpoint,
    spawn_delayed_booking_endpoint, SlowTransport,
};

/// End-to-end widget flow against a stand-in booking endpoint
#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_booking_workflow() {
        let (url, received) = spawn_booking_endpoint(StatusCode::OK).await;
        let client = BookingEndpointClient::new(&url, Duration::from_secs(5)).unwrap();
        let server = setup_test_server(Arc::new(client));

        // Step 1: the form loads the date list
        let dates: Value = server.get("/api/dates").await.json();
        let saturday = dates["dates"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["label"].as_str().unwrap().ends_with("(六)"))
            .cloned()
            .unwrap();
        let date_key = saturday["isoKey"].as_str().unwrap().to_string();
        assert_eq!(date_key, "2024-01-06");

        // Step 2: picking the Saturday offers only morning slots
        let slots: Value = server
            .get("/api/slots")
            .add_query_param("date", &date_key)
            .await
            .json();
        assert_eq!(slots["slots"], json!(["8:00", "9:00"]));
        let time = slots["slots"][1].as_str().unwrap().to_string();

        // Step 3: submit the booking
        let mut payload = booking_payload(true);
        payload["date"] = Value::String(date_key.clone());
        payload["time"] = Value::String(time.clone());
        payload["note"] = Value::String("bring spare key".to_string());

        let response = server.post("/api/bookings").json(&payload).await;
        assert_eq!(response.status_code(), StatusCode::OK);

        // Step 4: the endpoint received exactly one normalized record
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let record = &received[0].body;
        assert_eq!(record["date"], "2024-01-06");
        assert_eq!(record["time"], "9:00");
        assert_eq!(record["note"], "bring spare key");
        assert_eq!(record["requesterId"], "U123");
        assert_eq!(record["requesterDisplayName"], "小林");
        assert_eq!(record["createdAt"], "2024-01-05T01:02:03.000Z");
    }

    #[tokio::test]
    async fn test_rejected_booking_surfaces_generic_failure() {
        let (url, received) = spawn_booking_endpoint(StatusCode::SERVICE_UNAVAILABLE).await;
        let client = BookingEndpointClient::new(&url, Duration::from_secs(5)).unwrap();
        let server = setup_test_server(Arc::new(client));

        let response = server.post("/api/bookings").json(&booking_payload(false)).await;
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(received.lock().unwrap().len(), 1);

        // The form can be used again right away
        let dates = server.get("/api/dates").await;
        assert_eq!(dates.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_hanging_endpoint_fails_with_json_body() {
        let submission_timeout = Duration::from_millis(200);
        let (url, received) =
            spawn_delayed_booking_endpoint(StatusCode::OK, Duration::from_secs(3)).await;
        let client = BookingEndpointClient::new(&url, submission_timeout).unwrap();
        let server =
            setup_layered_test_server(Arc::new(client), request_timeout_for(submission_timeout));

        let response = server.post("/api/bookings").json(&booking_payload(true)).await;

        // The endpoint call gives up first, so the form gets the booking failure body
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            BookingError::Submission(String::new()).user_message()
        );
        assert_eq!(received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_slow_failure_inside_request_timeout() {
        let delay = Duration::from_millis(300);
        let server = setup_layered_test_server(
            Arc::new(SlowTransport { delay }),
            request_timeout_for(delay),
        );

        let response = server.post("/api/bookings").json(&booking_payload(false)).await;
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_request_timeout_answers_with_json_body() {
        let server = setup_layered_test_server(
            Arc::new(SlowTransport {
                delay: Duration::from_secs(5),
            }),
            Duration::from_millis(100),
        );

        let response = server.post("/api/bookings").json(&booking_payload(false)).await;
        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["message"],
            BookingError::Submission(String::new()).user_message()
        );

        // Other routes still pass through the same layers
        let health = server.get("/health").await;
        assert_eq!(health.status_code(), StatusCode::OK);
    }
}
