use chrono::{Datelike, Days, NaiveDate};
use std::borrow::Cow;
use tracing::debug;

use crate::error::{BookingError, BookingResult};
use crate::models::rules::{CandidateDate, RuleConfig, SATURDAY};

/// Weekday characters shown in date labels, indexed 0 = Sunday .. 6 = Saturday.
pub const WEEKDAY_CHARS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

impl RuleConfig {
    /// Check the rule table before it is used to list anything.
    pub fn validate(&self) -> BookingResult<()> {
        if self.days_ahead <= 0 {
            return Err(BookingError::Config(format!(
                "daysAhead must be positive, got {}",
                self.days_ahead
            )));
        }

        if self.morning_slots.is_empty() && self.afternoon_slots.is_empty() {
            return Err(BookingError::Config(
                "at least one morning or afternoon slot is required".to_string(),
            ));
        }

        if let Some(day) = self.excluded_weekdays.iter().find(|day| **day > SATURDAY) {
            return Err(BookingError::Config(format!(
                "excluded weekday {} is outside 0..=6",
                day
            )));
        }

        Ok(())
    }
}

// Weekday number with Sunday as 0
fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// Format a date as "M/D (weekday)"
pub fn format_date_label(date: NaiveDate) -> String {
    format!(
        "{}/{} ({})",
        date.month(),
        date.day(),
        WEEKDAY_CHARS[weekday_number(date) as usize]
    )
}

// Parse a "YYYY-MM-DD" key back into a calendar date
pub fn parse_date_key(iso_date_key: &str) -> BookingResult<NaiveDate> {
    NaiveDate::parse_from_str(iso_date_key, "%Y-%m-%d").map_err(|e| {
        BookingError::Parse(format!("'{}' is not a calendar date: {}", iso_date_key, e))
    })
}

/// List the bookable dates starting at `today`.
///
/// Walks `days_ahead` consecutive days (today included) and drops every day
/// whose weekday is excluded. The result is ordered by date and is rebuilt on
/// every call, so callers pass the current local date each time.
pub fn list_candidate_dates(
    config: &RuleConfig,
    today: NaiveDate,
) -> BookingResult<Vec<CandidateDate>> {
    config.validate()?;

    let mut dates = Vec::new();
    for offset in 0..config.days_ahead as u64 {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            // Past chrono's last representable date; nothing further to offer
            break;
        };

        if config.excluded_weekdays.contains(&weekday_number(date)) {
            continue;
        }

        dates.push(CandidateDate {
            iso_key: date.format("%Y-%m-%d").to_string(),
            label: format_date_label(date),
        });
    }

    debug!(
        "Listed {} candidate dates from {} over {} days",
        dates.len(),
        today,
        config.days_ahead
    );

    Ok(dates)
}

/// List the time labels offered on `iso_date_key`.
///
/// Depends only on the weekday of the date: Saturday gets the morning labels
/// alone when `saturday_morning_only` is set, every other day gets the morning
/// labels followed by the afternoon ones. Excluded weekdays are not checked
/// here; exclusion only applies when listing dates.
pub fn list_slots<'a>(
    config: &'a RuleConfig,
    iso_date_key: &str,
) -> BookingResult<Cow<'a, [String]>> {
    let date = parse_date_key(iso_date_key)?;

    if weekday_number(date) == SATURDAY && config.saturday_morning_only {
        debug!("{} is a Saturday, offering morning slots only", iso_date_key);
        return Ok(Cow::Borrowed(config.morning_slots.as_slice()));
    }

    let slots: Vec<String> = config
        .morning_slots
        .iter()
        .chain(config.afternoon_slots.iter())
        .cloned()
        .collect();

    Ok(Cow::Owned(slots))
}
