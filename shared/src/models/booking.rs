//! Booking Model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Table reservation
///
/// Ownership is the `customer_name == username` match; `owner_id` records the
/// creating user for the stricter ownership mode and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub number_of_guests: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub owner_id: Option<i64>,
}

/// Create / full-replace booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreate {
    #[serde(default)]
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "time_of_day")]
    pub time: NaiveTime,
    pub number_of_guests: i64,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_time_of_day")]
    pub time: Option<NaiveTime>,
    pub number_of_guests: Option<i64>,
}

/// Parse `HH:MM:SS` or `HH:MM`
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn time_of_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_time_of_day(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("time has wrong format `{raw}`, use hh:mm[:ss]"))
    })
}

fn optional_time_of_day<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_time_of_day(&raw).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("time has wrong format `{raw}`, use hh:mm[:ss]"))
        }),
    }
}
