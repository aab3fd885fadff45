use serde::{Deserialize, Serialize};

use crate::{
    shared::time::Time,
    timeline::{Domain, Point, Timeline},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 32.0,
            right: 32.0,
            bottom: 48.0,
            left: 168.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_width: f64,
    pub row_height: f64,
    pub margin: Margin,
    pub point_radius: f64,
    pub tick_count: usize,
    /// Length given to a trip whose arrival is unknown.
    pub fallback_trip_minutes: u32,
    pub min_span_minutes: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_width: 720.0,
            row_height: 56.0,
            margin: Margin::default(),
            point_radius: 4.0,
            tick_count: 5,
            fallback_trip_minutes: 10,
            min_span_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub minutes: f64,
    pub x: f64,
    pub label: String,
}

/// Pixel geometry of a [`Timeline`]: a linear time scale on x and a point
/// scale over the stop axis on y.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub inner_width: f64,
    pub inner_height: f64,
    pub margin: Margin,
    pub point_radius: f64,
    domain: Domain,
    tick_count: usize,
    stop_positions: Box<[f64]>,
}

impl Layout {
    pub fn new(timeline: &Timeline, container_width: f64, config: &Config) -> Self {
        let stop_count = timeline.stops.len();
        let width = container_width.max(config.min_width);
        let inner_width = width - config.margin.left - config.margin.right;
        let inner_height =
            (stop_count.saturating_sub(1) as f64 * config.row_height).max(config.row_height);
        let height = inner_height + config.margin.top + config.margin.bottom;

        // Point scale with an outer padding of half a step, centered.
        let step = inner_height / (stop_count.max(1) as f64);
        let offset = (inner_height - step * stop_count.saturating_sub(1) as f64) / 2.0;
        let stop_positions = (0..stop_count)
            .map(|i| offset + step * i as f64)
            .collect();

        Self {
            width,
            height,
            inner_width,
            inner_height,
            margin: config.margin,
            point_radius: config.point_radius,
            domain: timeline.domain,
            tick_count: config.tick_count,
            stop_positions,
        }
    }

    pub fn x(&self, minutes: f64) -> f64 {
        let start = self.domain.start as f64;
        let span = self.domain.span().max(1) as f64;
        (minutes - start) / span * self.inner_width
    }

    pub fn y(&self, stop_idx: u32) -> Option<f64> {
        self.stop_positions.get(stop_idx as usize).copied()
    }

    pub fn project(&self, point: &Point) -> Option<(f64, f64)> {
        Some((self.x(point.minutes as f64), self.y(point.stop_idx)?))
    }

    pub fn ticks(&self) -> Vec<Tick> {
        ticks(
            self.domain.start as f64,
            self.domain.end as f64,
            self.tick_count,
        )
        .into_iter()
        .map(|minutes| Tick {
            minutes,
            x: self.x(minutes),
            label: Time::from_minutes(minutes.max(0.0).round() as u32).to_hm_string(),
        })
        .collect()
    }
}

/// Evenly spaced, human friendly values covering `[start, stop]`, roughly
/// `count` of them. Steps are 1, 2 or 5 times a power of ten.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !(start.is_finite() && stop.is_finite()) || stop < start {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let increment = 10f64.powf(power) * factor;
    let mut first = (start / increment).round();
    let mut last = (stop / increment).round();
    if first * increment < start {
        first += 1.0;
    }
    if last * increment > stop {
        last -= 1.0;
    }
    if last < first {
        return Vec::new();
    }

    let count = (last - first) as usize + 1;
    (0..count)
        .map(|i| {
            let value = first + i as f64;
            // Dividing by the inverse keeps sub-unit steps exact
            if power < 0.0 {
                value / (1.0 / increment).round()
            } else {
                value * increment
            }
        })
        .collect()
}
