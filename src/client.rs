use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::{BookingError, BookingResult};
use crate::models::booking::BookingRecord;

/// Where assembled bookings are handed off.
///
/// One call per submission, no retry. Any failure is terminal for that attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingTransport: Send + Sync {
    async fn submit(&self, record: &BookingRecord) -> BookingResult<()>;
}

/// Client for the remote booking endpoint
pub struct BookingEndpointClient {
    client: Client,
    endpoint: String,
}

impl BookingEndpointClient {
    /// Create a client posting to `endpoint`, giving up after `timeout`
    pub fn new(endpoint: &str, timeout: Duration) -> BookingResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookingError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingTransport for BookingEndpointClient {
    /// POST the record as JSON. Only a 2xx status counts as accepted.
    async fn submit(&self, record: &BookingRecord) -> BookingResult<()> {
        info!(
            "Submitting booking for {} on {} at {}",
            record.plate, record.date, record.time
        );
        debug!("Booking endpoint: {}", self.endpoint);

        let res = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(record)
            .send()
            .await
            .map_err(|e| {
                error!("Booking endpoint unreachable: {}", e);
                BookingError::from(e)
            })?;

        let status = res.status();
        info!("Response received with status: {}", status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Booking endpoint rejected the booking: {} {}", status, body);
            return Err(BookingError::Submission(format!(
                "endpoint responded with {}",
                status
            )));
        }

        Ok(())
    }
}

/// Transport used in simulation mode: logs the record and reports success
#[derive(Debug, Default)]
pub struct SimulatedTransport;

#[async_trait]
impl BookingTransport for SimulatedTransport {
    async fn submit(&self, record: &BookingRecord) -> BookingResult<()> {
        info!(
            "Simulation mode, booking not forwarded: {} ({}) on {} at {}",
            record.name, record.plate, record.date, record.time
        );
        debug!("Simulated booking record: {:?}", record);
        Ok(())
    }
}
