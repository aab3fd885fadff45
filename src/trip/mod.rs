use std::{sync::Arc, time::Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    record::{self, FieldPath},
    shared::{first_available, time::normalize_time},
};

/// One stop visit of a trip's stop-time series.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopVisit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<Arc<str>>,
}

impl StopVisit {
    pub fn from_record(entry: &Value) -> Self {
        Self {
            stop_name: record::first_text(entry, record::ENTRY_STOP_NAME).map(Into::into),
            arrival_time: normalized(record::first_text(entry, record::ENTRY_ARRIVAL)),
            departure_time: normalized(record::first_text(entry, record::ENTRY_DEPARTURE)),
        }
    }

    /// The time the vehicle leaves the stop, or reaches it when no departure
    /// is recorded.
    pub fn time(&self) -> Option<&str> {
        self.departure_time
            .as_deref()
            .or(self.arrival_time.as_deref())
    }
}

/// Canonical trip. Serializes with the same field names the normalizer reads,
/// so a serialized trip normalizes back to itself.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// GTFS trip identifier, never empty.
    #[serde(rename = "trip_id")]
    pub id: Arc<str>,
    /// Database id of the record, the trip identifier when none was sent.
    #[serde(rename = "id")]
    pub record_id: Arc<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pk: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_id: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_label: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_stop_name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_stop_name: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop_times: Vec<StopVisit>,
}

impl Trip {
    /// Arrival, falling back to departure.
    pub fn end_time(&self) -> Option<&str> {
        self.arrival_time
            .as_deref()
            .or(self.departure_time.as_deref())
    }

    /// Replaces the stop-time series with one fetched separately.
    /// Start/end names and times are left as resolved.
    pub fn attach_stop_times(&mut self, entries: &[Value]) {
        self.stop_times = entries.iter().map(StopVisit::from_record).collect();
    }

    /// Serializes back into a raw record.
    pub fn to_record(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Normalizes a raw trip record. `None` when no trip identifier can be found.
pub fn normalize(raw: &Value) -> Option<Trip> {
    normalize_with_label(raw, None)
}

/// Same as [`normalize`], using `fallback_label` when nothing in the record
/// names the route.
pub fn normalize_with_label(raw: &Value, fallback_label: Option<&str>) -> Option<Trip> {
    let id: Arc<str> = record::first_text(raw, record::TRIP_ID)?.into();
    let record_id = record::first_text(raw, record::RECORD_ID)
        .map(Into::into)
        .unwrap_or_else(|| id.clone());

    let stop_times = record::first_series(raw, record::STOP_TIMES);
    let stops = record::first_series(raw, record::STOPS);
    let start_stop = record::first_present(raw, record::START_STOP);
    let end_stop = record::first_present(raw, record::END_STOP);

    let start_stop_name = first_available([
        record::first_text(raw, record::START_STOP_NAME),
        start_stop.and_then(|stop| record::first_text(stop, record::STOP_OBJECT_NAME)),
        series_stop_name(stop_times.first()),
        series_stop_name(stops.first()),
    ]);
    let end_stop_name = first_available([
        record::first_text(raw, record::END_STOP_NAME),
        end_stop.and_then(|stop| record::first_text(stop, record::STOP_OBJECT_NAME)),
        series_stop_name(stop_times.last()),
        series_stop_name(stops.last()),
    ]);

    let departure_time = normalized(first_available([
        record::first_text(raw, record::DEPARTURE_TIME),
        series_text(stop_times.first(), record::ENTRY_DEPARTURE),
    ]));
    let arrival_time = normalized(first_available([
        record::first_text(raw, record::ARRIVAL_TIME),
        series_text(stop_times.last(), record::ENTRY_ARRIVAL),
    ]))
    .or_else(|| departure_time.clone());

    Some(Trip {
        id,
        record_id,
        pk: record::first_text(raw, record::TRIP_PK).map(Into::into),
        route_id: record::first_text(raw, record::ROUTE_ID).map(Into::into),
        route_label: resolve_route_label(raw, fallback_label).map(Into::into),
        start_stop_name: start_stop_name.map(Into::into),
        end_stop_name: end_stop_name.map(Into::into),
        departure_time,
        arrival_time,
        stop_times: stop_times.iter().map(StopVisit::from_record).collect(),
    })
}

/// Human readable route label, `fallback_label` when the record has none.
pub fn resolve_route_label(raw: &Value, fallback_label: Option<&str>) -> Option<String> {
    record::first_text(raw, record::ROUTE_LABEL).or_else(|| first_available([fallback_label]))
}

/// Normalizes a batch, keeping input order and silently dropping records
/// without an identifier.
pub fn normalize_all(raw: &[Value]) -> Vec<Trip> {
    debug!("Normalizing {} trips...", raw.len());
    let now = Instant::now();
    let trips: Vec<Trip> = raw
        .par_iter()
        .filter_map(|record| {
            let trip = normalize(record);
            if trip.is_none() {
                debug!("Dropping trip record without an identifier");
            }
            trip
        })
        .collect();
    debug!(
        "Normalizing kept {} of {} trips and took {:?}",
        trips.len(),
        raw.len(),
        now.elapsed()
    );
    trips
}

/// Reads the ordered trips of a persisted shift.
///
/// Each structure entry is merged with its nested `trip` object, the nested
/// fields taking precedence, before it is normalized.
pub fn from_structure(shift: &Value) -> Vec<Trip> {
    let Some(structure) = shift.get("structure").and_then(Value::as_array) else {
        return Vec::new();
    };
    structure
        .iter()
        .filter_map(|entry| normalize(&merge_structure_entry(entry)))
        .collect()
}

fn merge_structure_entry(entry: &Value) -> Value {
    let mut combined: Map<String, Value> = entry.as_object().cloned().unwrap_or_default();
    let trip = record::lookup(entry, &["trip"]).cloned().unwrap_or(Value::Object(Map::new()));
    if let Some(fields) = trip.as_object() {
        combined.extend(fields.iter().map(|(key, value)| (key.clone(), value.clone())));
    }
    combined.insert("trip".to_string(), trip);
    Value::Object(combined)
}

fn series_stop_name(entry: Option<&Value>) -> Option<String> {
    record::first_text(entry?, record::ENTRY_STOP_NAME)
}

fn series_text(entry: Option<&Value>, paths: &[FieldPath]) -> Option<String> {
    record::first_text(entry?, paths)
}

fn normalized(value: Option<String>) -> Option<Arc<str>> {
    let value = normalize_time(&value?);
    if value.is_empty() {
        None
    } else {
        Some(value.into())
    }
}
