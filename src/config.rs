//! Service configuration.
//!
//! Values come from the environment (a `.env` file is loaded first if present):
//!
//! - `BOOKING_ENDPOINT_URL`: where bookings are POSTed (required unless `SKIP_SUBMISSION=true`)
//! - `BOOKING_RULES_PATH`: JSON rule table; the built-in table is used when unset
//! - `SKIP_SUBMISSION`: simulation mode, bookings are logged instead of forwarded
//! - `SUBMISSION_TIMEOUT_SECS`: timeout of the endpoint call (default 10)
//! - `SERVER_PORT`: listen port (default 3000)
//! - `LIFF_ID`, `SHOP_PHONE`, `SHOP_ADDRESS`: details handed to the widget page

use dotenv::dotenv;
use reqwest::Url;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::{BookingError, BookingResult};
use crate::models::common::WidgetInfo;
use crate::models::rules::RuleConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SUBMISSION_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SHOP_ADDRESS: &str = "360苗栗縣苗栗市國華路91號";
const MAPS_URL: &str = "https://maps.google.com/maps";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint_url: Option<String>,
    pub rules: RuleConfig,
    pub skip_submission: bool,
    pub submission_timeout: Duration,
    pub port: u16,
    pub widget: WidgetInfo,
}

impl AppConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> BookingResult<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> BookingResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let skip_submission = lookup("SKIP_SUBMISSION")
            .map(|val| val.to_lowercase() == "true")
            .unwrap_or(false);

        let endpoint_url = lookup("BOOKING_ENDPOINT_URL").filter(|url| !url.trim().is_empty());
        match &endpoint_url {
            Some(url) => {
                Url::parse(url).map_err(|e| {
                    BookingError::Config(format!("BOOKING_ENDPOINT_URL '{}' is invalid: {}", url, e))
                })?;
            }
            None if !skip_submission => {
                return Err(BookingError::Config(
                    "BOOKING_ENDPOINT_URL must be set unless SKIP_SUBMISSION=true".to_string(),
                ));
            }
            None => {}
        }

        let rules = match lookup("BOOKING_RULES_PATH") {
            Some(path) => load_rules(&path)?,
            None => {
                info!("BOOKING_RULES_PATH not set, using the built-in rule table");
                let rules = RuleConfig::default();
                rules.validate()?;
                rules
            }
        };

        let timeout_secs = parse_number(
            &lookup,
            "SUBMISSION_TIMEOUT_SECS",
            DEFAULT_SUBMISSION_TIMEOUT_SECS,
        )?;
        let port = parse_number(&lookup, "SERVER_PORT", DEFAULT_PORT)?;

        let shop_phone = lookup("SHOP_PHONE").unwrap_or_default();
        let shop_address =
            lookup("SHOP_ADDRESS").unwrap_or_else(|| DEFAULT_SHOP_ADDRESS.to_string());

        let widget = WidgetInfo {
            liff_id: lookup("LIFF_ID").unwrap_or_default(),
            tel_link: format!("tel:{}", shop_phone),
            map_url: map_url(&shop_address)?,
            shop_phone,
            shop_address,
        };

        Ok(Self {
            endpoint_url,
            rules,
            skip_submission,
            submission_timeout: Duration::from_secs(timeout_secs),
            port,
            widget,
        })
    }
}

fn parse_number<F, T>(lookup: &F, key: &str, default: T) -> BookingResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| BookingError::Config(format!("{} '{}' is invalid: {}", key, raw, e))),
        None => Ok(default),
    }
}

/// Read and validate a JSON rule table
pub fn load_rules(path: impl AsRef<Path>) -> BookingResult<RuleConfig> {
    let path = path.as_ref();
    info!("Loading booking rules from {}", path.display());

    let raw = fs::read_to_string(path)?;
    let rules: RuleConfig = serde_json::from_str(&raw)?;
    rules.validate()?;

    Ok(rules)
}

// Maps search link for the shop address
fn map_url(address: &str) -> BookingResult<String> {
    Url::parse_with_params(MAPS_URL, &[("q", address)])
        .map(String::from)
        .map_err(|e| BookingError::Config(format!("cannot build map link: {}", e)))
}
