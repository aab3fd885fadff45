use std::ops::{Add, AddAssign, Sub};

use chrono::{DateTime, Local, NaiveDateTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes since midnight. Values past 1440 are allowed for windows that
/// cross midnight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl Add<Duration> for Time {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<Duration> for Time {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 = self.0.saturating_add(rhs.0)
    }
}

impl Time {
    pub const MIDNIGHT: Time = Time(0);
    pub const END_OF_DAY: Time = Time(MINUTES_PER_DAY);

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }

    /// Formats as `HH:MM`, clamping hours to a single day.
    pub fn to_hm_string(&self) -> String {
        let h = (self.0 / 60).min(23);
        let m = self.0 % 60;
        format!("{:02}:{:02}", h, m)
    }

    /// Parses a leading `H:MM` or `HH:MM`, ignoring anything after the minutes.
    pub fn parse(time: &str) -> Option<Self> {
        let (hours, minutes) = leading_hm(time)?;
        Some(Self::from_hm(hours, minutes))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(u32);

impl Duration {
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn as_minutes(&self) -> u32 {
        self.0
    }
}

/// Normalizes a clock value coming from an API into `HH:MM`.
///
/// ISO-8601 date-times are read as local wall-clock time, `H:MM[:SS]` prefixes
/// are zero padded with the seconds dropped, and anything else is returned
/// trimmed but otherwise untouched.
pub fn normalize_time(value: &str) -> String {
    let raw = value.trim();
    if raw.is_empty() {
        return String::new();
    }

    if raw.contains('T')
        && let Some(time) = parse_iso(raw)
    {
        return Time::from_hm(time.0, time.1).to_hm_string();
    }

    match leading_hm(raw) {
        Some((hours, minutes)) => format!("{:02}:{:02}", hours, minutes),
        None => raw.to_string(),
    }
}

fn parse_iso(raw: &str) -> Option<(u32, u32)> {
    // RFC 3339 wants seconds, ISO-8601 does not
    let zulu = raw.strip_suffix(['Z', 'z']).map(|base| format!("{base}+00:00"));
    let zoned = zulu.as_deref().unwrap_or(raw);
    let offset = DateTime::parse_from_rfc3339(zoned).ok().or_else(|| {
        ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"]
            .iter()
            .find_map(|format| DateTime::parse_from_str(zoned, format).ok())
    });
    if let Some(datetime) = offset {
        let local = datetime.with_timezone(&Local);
        return Some((local.hour(), local.minute()));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| (datetime.hour(), datetime.minute()))
}

// Matches `^\s*(\d{1,2}):(\d{2})`
fn leading_hm(value: &str) -> Option<(u32, u32)> {
    let value = value.trim_start();
    let colon = value.find(':')?;
    let (hours, rest) = value.split_at(colon);
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minutes = rest.get(1..3)?;
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((hours.parse().ok()?, minutes.parse().ok()?))
}

#[test]
fn parse_unparse_1() {
    let time = "00:00";
    let stime = Time::parse(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_unparse_2() {
    let time = "12:30";
    let stime = Time::parse(time).unwrap();
    assert_eq!(time, stime.to_hm_string())
}

#[test]
fn parse_single_digit_hour() {
    assert_eq!(Time::parse("7:05").unwrap().as_minutes(), 425);
}

#[test]
fn parse_rejects_three_digit_hour() {
    assert!(Time::parse("123:45").is_none())
}

#[test]
fn add_saturates() {
    let time = Time::from_minutes(u32::MAX - 5) + Duration::from_minutes(60);
    assert_eq!(time.as_minutes(), u32::MAX);
}

#[test]
fn format_clamps_past_midnight() {
    assert_eq!(Time::from_minutes(1500).to_hm_string(), "23:00");
}
