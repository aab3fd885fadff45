use std::{collections::HashSet, sync::Arc};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::trip::{self, Trip};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Trip {0} is already part of the shift.")]
    Duplicate(Arc<str>),
    #[error(
        "Trip starts at {departure} but the latest trip ends at {latest_arrival}. Trips cannot overlap."
    )]
    Overlap {
        departure: Arc<str>,
        latest_arrival: Arc<str>,
    },
    #[error("Trip has no identifier.")]
    Unresolved,
}

/// The ordered trips of a shift being edited.
///
/// `trips` and `ids` always hold the same identifiers; every mutation goes
/// through methods that update both.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    trips: Vec<Trip>,
    ids: HashSet<Arc<str>>,
}

impl Selection {
    pub fn new() -> Self {
        Default::default()
    }

    /// Selection of a persisted shift. Entries come from the server and are
    /// not checked for overlap, repeated trips are kept once.
    pub fn from_structure(shift: &Value) -> Self {
        let mut selection = Self::new();
        for trip in trip::from_structure(shift) {
            if selection.ids.contains(&trip.id) {
                warn!("Ignoring repeated trip {} in shift structure", trip.id);
                continue;
            }
            selection.push(trip);
        }
        selection
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Latest `arrival ?? departure` of the selected trips, compared as
    /// `HH:MM` strings.
    ///
    /// String order only holds within one day: a trip arriving at `00:10`
    /// sorts before one arriving at `23:50`.
    pub fn latest_arrival(&self) -> Option<&str> {
        self.trips.iter().filter_map(Trip::end_time).max()
    }

    /// Earliest departure and latest arrival, the default start and end of
    /// the shift.
    pub fn suggested_times(&self) -> (Option<&str>, Option<&str>) {
        let earliest = self
            .trips
            .iter()
            .filter_map(|trip| trip.departure_time.as_deref())
            .min();
        (earliest, self.latest_arrival())
    }

    /// Appends `trip` unless it is already selected or departs before the
    /// latest selected trip arrives.
    pub fn try_add(&mut self, trip: Trip) -> Result<(), self::Error> {
        if trip.id.trim().is_empty() {
            return Err(self::Error::Unresolved);
        }
        if self.ids.contains(&trip.id) {
            return Err(self::Error::Duplicate(trip.id));
        }
        if let Some(departure) = trip.departure_time.as_deref()
            && let Some(latest_arrival) = self.latest_arrival()
            && departure < latest_arrival
        {
            return Err(self::Error::Overlap {
                departure: departure.into(),
                latest_arrival: latest_arrival.into(),
            });
        }
        debug!("Adding trip {} to shift", trip.id);
        self.push(trip);
        Ok(())
    }

    /// Normalizes a raw record and adds it.
    pub fn try_add_record(&mut self, raw: &Value) -> Result<(), self::Error> {
        let trip = trip::normalize(raw).ok_or(self::Error::Unresolved)?;
        self.try_add(trip)
    }

    pub fn remove(&mut self, id: &str) -> Option<Trip> {
        if !self.ids.remove(id) {
            return None;
        }
        let index = self.trips.iter().position(|trip| &*trip.id == id)?;
        Some(self.trips.remove(index))
    }

    /// Trip identifiers in duty order, as submitted on save.
    pub fn trip_ids(&self) -> Vec<Arc<str>> {
        self.trips.iter().map(|trip| trip.id.clone()).collect()
    }

    /// Updates selected trips from freshly fetched versions of the same id.
    /// Fields the fresh trip lacks, stop times included, keep their old value.
    pub fn refresh(&mut self, current: &[Trip]) {
        for selected in self.trips.iter_mut() {
            let Some(fresh) = current.iter().find(|trip| trip.id == selected.id) else {
                continue;
            };
            let previous = std::mem::take(selected);
            *selected = merge(fresh.clone(), previous);
        }
    }

    pub fn clear(&mut self) {
        self.trips.clear();
        self.ids.clear();
    }

    fn push(&mut self, trip: Trip) {
        self.ids.insert(trip.id.clone());
        self.trips.push(trip);
    }
}

fn merge(fresh: Trip, previous: Trip) -> Trip {
    Trip {
        id: fresh.id,
        record_id: fresh.record_id,
        pk: fresh.pk.or(previous.pk),
        route_id: fresh.route_id.or(previous.route_id),
        route_label: fresh.route_label.or(previous.route_label),
        start_stop_name: fresh.start_stop_name.or(previous.start_stop_name),
        end_stop_name: fresh.end_stop_name.or(previous.end_stop_name),
        departure_time: fresh.departure_time.or(previous.departure_time),
        arrival_time: fresh.arrival_time.or(previous.arrival_time),
        stop_times: if fresh.stop_times.is_empty() {
            previous.stop_times
        } else {
            fresh.stop_times
        },
    }
}
