//! Ordered accessor chains for the trip shapes returned by the different API
//! endpoints. Earlier paths win.

/// A chain of object keys into a raw record.
pub type FieldPath = &'static [&'static str];

pub const TRIP_ID: &[FieldPath] = &[&["trip_id"], &["tripId"], &["id"]];

pub const RECORD_ID: &[FieldPath] = &[&["id"], &["trip", "id"]];

pub const TRIP_PK: &[FieldPath] = &[
    &["pk"],
    &["trip_pk"],
    &["tripPk"],
    &["trip", "pk"],
    &["trip", "trip_pk"],
];

pub const ROUTE_ID: &[FieldPath] = &[
    &["route_id"],
    &["routeId"],
    &["route", "id"],
    &["route", "route_id"],
    &["trip", "route_id"],
    &["trip", "routeId"],
    &["trip", "route", "id"],
    &["trip", "route", "route_id"],
];

pub const ROUTE_LABEL: &[FieldPath] = &[
    &["route_label"],
    &["routeLabel"],
    &["route_short_name"],
    &["routeShortName"],
    &["route_long_name"],
    &["routeLongName"],
    &["route", "label"],
    &["route", "name"],
    &["route", "route_short_name"],
    &["route", "route_long_name"],
    &["route", "short_name"],
    &["route", "long_name"],
    &["trip_headsign"],
];

pub const START_STOP_NAME: &[FieldPath] = &[&["start_stop_name"], &["startStopName"]];

pub const END_STOP_NAME: &[FieldPath] = &[&["end_stop_name"], &["endStopName"]];

pub const START_STOP: &[FieldPath] = &[
    &["start_stop"],
    &["startStop"],
    &["origin_stop"],
    &["originStop"],
    &["origin"],
    &["trip", "start_stop"],
    &["trip", "startStop"],
];

pub const END_STOP: &[FieldPath] = &[
    &["end_stop"],
    &["endStop"],
    &["destination_stop"],
    &["destinationStop"],
    &["destination"],
    &["trip", "end_stop"],
    &["trip", "endStop"],
];

/// Name fields of a nested stop object.
pub const STOP_OBJECT_NAME: &[FieldPath] =
    &[&["name"], &["label"], &["stop_name"], &["stop", "name"]];

pub const STOP_TIMES: &[FieldPath] = &[&["stop_times"], &["trip", "stop_times"]];

pub const STOPS: &[FieldPath] = &[&["stops"], &["trip", "stops"]];

/// Stop name of a single stop-time entry.
pub const ENTRY_STOP_NAME: &[FieldPath] = &[
    &["stop_name"],
    &["stopName"],
    &["name"],
    &["stop", "name"],
    &["stop", "stop_name"],
    &["stop", "label"],
];

pub const ENTRY_DEPARTURE: &[FieldPath] = &[&["departure_time"], &["departureTime"]];

pub const ENTRY_ARRIVAL: &[FieldPath] = &[&["arrival_time"], &["arrivalTime"]];

pub const DEPARTURE_TIME: &[FieldPath] = &[
    &["departure_time"],
    &["departureTime"],
    &["start_time"],
    &["startTime"],
    &["time"],
    &["trip", "departure_time"],
    &["trip", "departureTime"],
    &["trip", "start_time"],
    &["trip", "startTime"],
];

pub const ARRIVAL_TIME: &[FieldPath] = &[
    &["arrival_time"],
    &["arrivalTime"],
    &["end_time"],
    &["endTime"],
    &["trip", "arrival_time"],
    &["trip", "arrivalTime"],
    &["trip", "end_time"],
    &["trip", "endTime"],
];
