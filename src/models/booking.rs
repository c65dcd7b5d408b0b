use serde::{Deserialize, Serialize};

/// Raw form values as typed by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Licence plate of the vehicle.
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BookingFields {
    /// Names of the required fields that are blank, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("plate", &self.plate),
            ("date", &self.date),
            ("time", &self.time),
            ("serviceType", &self.service_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Profile handed over by the messaging-platform identity plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterIdentity {
    #[serde(alias = "userId")]
    pub id: String,
    pub display_name: String,
}

/// Body of `POST /api/bookings`: the form plus the plugin profile, if logged in.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingSubmission {
    #[serde(flatten)]
    pub fields: BookingFields,
    #[serde(default)]
    pub profile: Option<RequesterIdentity>,
}

/// Normalized payload forwarded to the booking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub name: String,
    pub phone: String,
    pub plate: String,
    pub date: String,
    pub time: String,
    pub service_type: String,
    pub note: String,
    pub requester_id: String,
    pub requester_display_name: String,
    pub created_at: String,
}

// Response structure for the booking endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: BookingRecord,
}
