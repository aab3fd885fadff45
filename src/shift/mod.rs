use std::sync::Arc;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::selection::Selection;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Shift name and bus are required.")]
    MissingDetails,
    #[error("Add at least one trip to the shift.")]
    NoTrips,
}

/// Body sent to the shift endpoint on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPayload {
    pub name: String,
    pub bus_id: String,
    pub trip_ids: Vec<Arc<str>>,
}

impl ShiftPayload {
    pub fn new(name: &str, bus_id: &str, selection: &Selection) -> Result<Self, self::Error> {
        let name = name.trim();
        let bus_id = bus_id.trim();
        if name.is_empty() || bus_id.is_empty() {
            return Err(self::Error::MissingDetails);
        }
        if selection.is_empty() {
            return Err(self::Error::NoTrips);
        }
        Ok(Self {
            name: name.to_string(),
            bus_id: bus_id.to_string(),
            trip_ids: selection.trip_ids(),
        })
    }
}

/// The service day after `day`, used to look up trips of shifts running past
/// midnight. Day names are matched case-insensitively.
pub fn next_service_day(day: &str) -> Option<&'static str> {
    let day: Weekday = day.trim().parse().ok()?;
    Some(day_value(day.succ()))
}

pub fn day_value(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
