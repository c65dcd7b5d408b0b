use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::models::booking::{BookingFields, BookingRecord, RequesterIdentity};

/// Build the record forwarded to the booking endpoint.
///
/// Field values are copied as typed. A missing note becomes an empty string,
/// and so do the requester fields when nobody is logged in. Never fails:
/// checking that the required fields are filled in is left to the caller.
pub fn assemble(
    fields: BookingFields,
    identity: Option<&RequesterIdentity>,
    now: DateTime<Utc>,
) -> BookingRecord {
    let (requester_id, requester_display_name) = match identity {
        Some(identity) => (identity.id.clone(), identity.display_name.clone()),
        None => {
            debug!("No requester identity, assembling an anonymous booking");
            (String::new(), String::new())
        }
    };

    BookingRecord {
        name: fields.name,
        phone: fields.phone,
        plate: fields.plate,
        date: fields.date,
        time: fields.time,
        service_type: fields.service_type,
        note: fields.note.unwrap_or_default(),
        requester_id,
        requester_display_name,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
