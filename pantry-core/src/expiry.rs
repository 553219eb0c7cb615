//! Expiry classification.
//!
//! Classification is date-granular: both the expiry and the reference point
//! are reduced to calendar dates before the day offset is taken. It is never
//! cached; callers recompute it against "today" whenever they display or sort.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ExpiryError;

/// Items expiring within this many days (inclusive) need attention.
pub const URGENT_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Expired,
    UrgentToday,
    UrgentSoon,
    Fresh,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Expired => "expired",
            Bucket::UrgentToday => "urgent_today",
            Bucket::UrgentSoon => "urgent_soon",
            Bucket::Fresh => "fresh",
        }
    }

    fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Bucket::Expired,
            0 => Bucket::UrgentToday,
            d if d <= URGENT_WINDOW_DAYS => Bucket::UrgentSoon,
            _ => Bucket::Fresh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryClassification {
    /// Whole days from the reference date to the expiry; `None` without a date.
    pub days_until: Option<i64>,
    pub bucket: Bucket,
}

impl ExpiryClassification {
    /// Expired or expiring within the urgent window.
    pub fn needs_attention(&self) -> bool {
        self.bucket != Bucket::Fresh
    }

    /// Short human label, empty when the item has no expiry date.
    pub fn label(&self) -> String {
        match self.days_until {
            None => String::new(),
            Some(d) if d < 0 => "Expired".to_string(),
            Some(0) => "Today".to_string(),
            Some(1) => "1 day left".to_string(),
            Some(d) => format!("{} days left", d),
        }
    }
}

/// Classify an optional expiry date against `today`.
///
/// Items without a date are always `Fresh`.
pub fn classify(expires: Option<NaiveDate>, today: NaiveDate) -> ExpiryClassification {
    match expires {
        None => ExpiryClassification {
            days_until: None,
            bucket: Bucket::Fresh,
        },
        Some(date) => {
            let days = date.signed_duration_since(today).num_days();
            ExpiryClassification {
                days_until: Some(days),
                bucket: Bucket::from_days(days),
            }
        }
    }
}

/// Classify against a moment in time; the time of day is discarded.
pub fn classify_at(expires: Option<NaiveDate>, now: NaiveDateTime) -> ExpiryClassification {
    classify(expires, now.date())
}

/// Classify an expiry given as text.
///
/// Missing or blank text is treated as no date. Text that is not a date is an
/// error rather than a guess.
pub fn classify_iso(
    expires: Option<&str>,
    today: NaiveDate,
) -> Result<ExpiryClassification, ExpiryError> {
    let date = match expires.map(str::trim) {
        None | Some("") => None,
        Some(text) => Some(parse_expiry(text)?),
    };
    Ok(classify(date, today))
}

/// Parse an expiry date.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM[:SS]` timestamp, or an RFC
/// 3339 timestamp. Timestamps keep the calendar date as written.
pub fn parse_expiry(text: &str) -> Result<NaiveDate, ExpiryError> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }

    DateTime::parse_from_rfc3339(text)
        .map(|datetime| datetime.date_naive())
        .map_err(|_| ExpiryError::InvalidDate(text.to_string()))
}

/// The local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
