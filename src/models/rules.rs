use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weekday number of Saturday (0 = Sunday .. 6 = Saturday).
pub const SATURDAY: u8 = 6;

/// Static booking rules: horizon, blocked weekdays and the offered time labels.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Horizon length in calendar days, today included.
    pub days_ahead: i64,
    /// Weekdays (0 = Sunday .. 6 = Saturday) that can never be booked.
    #[serde(default, alias = "excludeDays")]
    pub excluded_weekdays: BTreeSet<u8>,
    /// Morning labels, offered first.
    #[serde(default)]
    pub morning_slots: Vec<String>,
    /// Afternoon labels, offered after the morning ones.
    #[serde(default)]
    pub afternoon_slots: Vec<String>,
    /// Saturday offers only the morning labels.
    #[serde(default, alias = "saturdayOnlyMorning")]
    pub saturday_morning_only: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let labels =
            |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };

        Self {
            days_ahead: 7,
            excluded_weekdays: BTreeSet::from([0]),
            morning_slots: labels(&["8:00", "8:30", "9:00", "9:30", "10:00", "10:30", "11:00"]),
            afternoon_slots: labels(&["1:30", "2:00", "2:30", "3:00", "3:30", "4:00", "4:30"]),
            saturday_morning_only: true,
        }
    }
}

/// One bookable calendar date as offered to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDate {
    /// `YYYY-MM-DD`, used as the option value.
    pub iso_key: String,
    /// `M/D (weekday)`, used as the option text.
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct DatesResponse {
    pub dates: Vec<CandidateDate>,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<String>,
}
