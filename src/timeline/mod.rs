use std::{collections::HashMap, sync::Arc, time::Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    shared::time::{Duration, MINUTES_PER_DAY, Time, normalize_time},
    trip::Trip,
};

pub mod scale;
pub use scale::{Config, Layout, Margin, Tick};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Add trips to visualize the shift timeline.")]
    NoTrips,
    #[error("Insufficient stop information to render timeline.")]
    InsufficientStops,
}

/// The duty window a timeline is drawn for. Labels are the depots the shift
/// starts and ends at.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Window {
    pub start_time: Option<Arc<str>>,
    pub end_time: Option<Arc<str>>,
    pub start_label: Option<Arc<str>>,
    pub end_label: Option<Arc<str>>,
}

impl Window {
    pub fn new(start_time: &str, end_time: &str) -> Self {
        Self {
            start_time: non_empty(normalize_time(start_time)),
            end_time: non_empty(normalize_time(end_time)),
            ..Default::default()
        }
    }

    pub fn with_labels(mut self, start_label: &str, end_label: &str) -> Self {
        self.start_label = non_empty(start_label.trim().to_string());
        self.end_label = non_empty(end_label.trim().to_string());
        self
    }

    /// Fills missing window times from the earliest departure and latest
    /// arrival of `trips`.
    pub fn or_bounds(mut self, trips: &[Trip]) -> Self {
        let bounds = time_bounds(trips);
        if self.start_time.is_none() {
            self.start_time = bounds.earliest.map(|time| time.to_hm_string().into());
        }
        if self.end_time.is_none() {
            self.end_time = bounds.latest.map(|time| time.to_hm_string().into());
        }
        self
    }

    /// Time axis domain. An end before the start is read as the next day and
    /// an empty span is widened to `config.min_span_minutes`.
    pub fn domain(&self, config: &Config) -> Domain {
        let start = parse_minutes(self.start_time.as_deref()).unwrap_or(Time::MIDNIGHT);
        let mut end = parse_minutes(self.end_time.as_deref()).unwrap_or(Time::END_OF_DAY);
        if end < start {
            end += Duration::from_minutes(MINUTES_PER_DAY);
        }
        if end <= start {
            end = start + Duration::from_minutes(config.min_span_minutes);
        }
        Domain {
            start: start.as_minutes(),
            end: end.as_minutes(),
        }
    }
}

/// Minutes since midnight covered by the time axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub start: u32,
    pub end: u32,
}

impl Domain {
    pub fn span(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Start,
    Stop,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub minutes: u32,
    pub stop: Arc<str>,
    /// Position of `stop` on the stop axis.
    pub stop_idx: u32,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub trip_id: Arc<str>,
    pub points: Vec<Point>,
}

/// A Marey chart model: stops on one axis, time on the other and one
/// polyline per trip, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub stops: Vec<Arc<str>>,
    pub domain: Domain,
    pub series: Vec<Series>,
}

impl Timeline {
    pub fn layout(&self, container_width: f64, config: &Config) -> Layout {
        Layout::new(self, container_width, config)
    }
}

pub fn build(trips: &[Trip], window: &Window) -> Result<Timeline, self::Error> {
    build_with_config(trips, window, &Config::default())
}

pub fn build_with_config(
    trips: &[Trip],
    window: &Window,
    config: &Config,
) -> Result<Timeline, self::Error> {
    if trips.is_empty() {
        return Err(self::Error::NoTrips);
    }
    debug!("Building timeline for {} trips...", trips.len());
    let now = Instant::now();

    let axis = StopAxis::collect(trips, window);
    if axis.stops.is_empty() {
        return Err(self::Error::InsufficientStops);
    }

    let domain = window.domain(config);
    let series = trips
        .iter()
        .map(|trip| Series {
            trip_id: trip.id.clone(),
            points: polyline(trip, &axis, config),
        })
        .collect();

    debug!("Building timeline took {:?}", now.elapsed());
    Ok(Timeline {
        stops: axis.stops,
        domain,
        series,
    })
}

/// Earliest departure and latest arrival across `trips`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub earliest: Option<Time>,
    pub latest: Option<Time>,
}

pub fn time_bounds(trips: &[Trip]) -> TimeBounds {
    TimeBounds {
        earliest: trips
            .iter()
            .filter_map(|trip| parse_minutes(trip.departure_time.as_deref()))
            .min(),
        latest: trips
            .iter()
            .filter_map(|trip| parse_minutes(trip.arrival_time.as_deref()))
            .max(),
    }
}

// Stops in order of first appearance. This is not a route topology, trips
// running in opposite directions simply interleave.
#[derive(Default)]
struct StopAxis {
    stops: Vec<Arc<str>>,
    lookup: HashMap<Arc<str>, u32>,
}

impl StopAxis {
    fn collect(trips: &[Trip], window: &Window) -> Self {
        let mut axis = Self::default();
        axis.add(window.start_label.as_ref());
        for trip in trips {
            if trip.stop_times.is_empty() {
                axis.add(trip.start_stop_name.as_ref());
                axis.add(trip.end_stop_name.as_ref());
            } else {
                trip.stop_times
                    .iter()
                    .for_each(|visit| axis.add(visit.stop_name.as_ref()));
            }
        }
        axis.add(window.end_label.as_ref());
        axis
    }

    fn add(&mut self, label: Option<&Arc<str>>) {
        let Some(label) = label else {
            return;
        };
        if label.trim().is_empty() || self.lookup.contains_key(label) {
            return;
        }
        self.lookup.insert(label.clone(), self.stops.len() as u32);
        self.stops.push(label.clone());
    }

    fn index(&self, label: &str) -> Option<u32> {
        self.lookup.get(label).copied()
    }
}

fn polyline(trip: &Trip, axis: &StopAxis, config: &Config) -> Vec<Point> {
    let visits: Vec<(u32, Option<&Arc<str>>)> = if trip.stop_times.is_empty() {
        let departure = parse_minutes(trip.departure_time.as_deref()).unwrap_or(Time::MIDNIGHT);
        let arrival = parse_minutes(trip.arrival_time.as_deref()).unwrap_or_else(|| {
            (departure + Duration::from_minutes(config.fallback_trip_minutes)).min(Time::END_OF_DAY)
        });
        vec![
            (departure.as_minutes(), trip.start_stop_name.as_ref()),
            (arrival.as_minutes(), trip.end_stop_name.as_ref()),
        ]
    } else {
        trip.stop_times
            .iter()
            .map(|visit| {
                let time = parse_minutes(visit.time()).unwrap_or(Time::MIDNIGHT);
                (time.as_minutes(), visit.stop_name.as_ref())
            })
            .collect()
    };

    let mut points: Vec<Point> = visits
        .into_iter()
        .filter_map(|(minutes, stop)| {
            let Some(stop_idx) = stop.and_then(|stop| axis.index(stop)) else {
                trace!("Trip {} has a position without a stop name", trip.id);
                return None;
            };
            Some(Point {
                minutes,
                stop: axis.stops[stop_idx as usize].clone(),
                stop_idx,
                marker: Marker::Stop,
            })
        })
        .collect();

    let last = points.len().saturating_sub(1);
    points.iter_mut().enumerate().for_each(|(i, point)| {
        point.marker = if i == 0 {
            Marker::Start
        } else if i == last {
            Marker::End
        } else {
            Marker::Stop
        };
    });
    points
}

fn parse_minutes(time: Option<&str>) -> Option<Time> {
    Time::parse(time?)
}

fn non_empty(value: String) -> Option<Arc<str>> {
    if value.is_empty() {
        None
    } else {
        Some(value.into())
    }
}
