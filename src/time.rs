//! Time keeping and formatting for the watch face

use core::fmt;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use enumset::{EnumSet, EnumSetType};

use crate::Error;

/// Capacity of the clock text, fits "12:34 PM"
pub const CLOCK_LEN: usize = 8;
/// Capacity of the date text, fits "Mon 05, Jun"
pub const DATE_LEN: usize = 11;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Fixed capacity text buffer.
///
/// Writes that do not fit fail with [`Error::Truncated`] and leave the
/// previous content untouched.
#[derive(Clone)]
pub struct TextBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuffer<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], len: 0 }
    }

    /// Replace the content with formatted text
    pub fn format(&mut self, args: fmt::Arguments<'_>) -> Result<&str, Error> {
        let mut scratch = [0u8; N];
        let len = format_no_std::show(&mut scratch, args)
            .map_err(|_| Error::Truncated { capacity: N })?
            .len();
        self.buf = scratch;
        self.len = len;
        Ok(self.as_str())
    }

    /// Replace the content with a literal
    pub fn set(&mut self, text: &str) -> Result<(), Error> {
        self.format(format_args!("{}", text)).map(|_| ())
    }

    pub fn as_str(&self) -> &str {
        // Only ever filled from `str` data
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for TextBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for TextBuffer<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for TextBuffer<N> {}

impl<const N: usize> fmt::Debug for TextBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Write the 12 hour clock, e.g. "01:05 PM"
pub fn format_clock<'a, const N: usize>(
    buf: &'a mut TextBuffer<N>,
    now: &NaiveDateTime,
) -> Result<&'a str, Error> {
    let (pm, hour) = now.hour12();
    buf.format(format_args!(
        "{:02}:{:02} {}",
        hour,
        now.minute(),
        if pm { "PM" } else { "AM" }
    ))
}

/// Write the short date, e.g. "Mon 05, Jun"
pub fn format_date<'a, const N: usize>(
    buf: &'a mut TextBuffer<N>,
    now: &NaiveDateTime,
) -> Result<&'a str, Error> {
    buf.format(format_args!(
        "{} {:02}, {}",
        WEEKDAYS[now.weekday().num_days_from_monday() as usize],
        now.day(),
        MONTHS[now.month0() as usize]
    ))
}

/// Clock and date text derived from one timestamp
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClockReading {
    pub time: TextBuffer<CLOCK_LEN>,
    pub date: TextBuffer<DATE_LEN>,
}

impl ClockReading {
    /// Reformat the clock text. Returns whether it changed.
    pub fn update_time(&mut self, now: &NaiveDateTime) -> Result<bool, Error> {
        let previous = self.time.clone();
        Ok(format_clock(&mut self.time, now)? != previous.as_str())
    }

    /// Reformat the date text. Returns whether it changed.
    pub fn update_date(&mut self, now: &NaiveDateTime) -> Result<bool, Error> {
        let previous = self.date.clone();
        Ok(format_date(&mut self.date, now)? != previous.as_str())
    }
}

/// Calendar units a tick subscription can observe
#[derive(Debug, EnumSetType)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// Turns wall clock samples into tick events.
///
/// A change of a unit implies all smaller units changed as well, so a new
/// day reports `Day | Hour | Minute | Second` before filtering.
pub struct TickTimer {
    subscribed: EnumSet<TimeUnit>,
    last: Option<NaiveDateTime>,
}

impl TickTimer {
    pub fn new(subscribed: EnumSet<TimeUnit>) -> Self {
        Self {
            subscribed,
            last: None,
        }
    }

    /// Feed the current time. Returns the subscribed units that changed
    /// since the previous sample. The first sample only primes the timer.
    pub fn poll(&mut self, now: NaiveDateTime) -> Option<EnumSet<TimeUnit>> {
        let last = self.last.replace(now)?;

        let largest = if last.year() != now.year() {
            TimeUnit::Year
        } else if last.month() != now.month() {
            TimeUnit::Month
        } else if last.day() != now.day() {
            TimeUnit::Day
        } else if last.hour() != now.hour() {
            TimeUnit::Hour
        } else if last.minute() != now.minute() {
            TimeUnit::Minute
        } else if last.second() != now.second() {
            TimeUnit::Second
        } else {
            return None;
        };

        let changed: EnumSet<TimeUnit> = EnumSet::<TimeUnit>::all()
            .iter()
            .take_while(|unit| *unit as u8 <= largest as u8)
            .collect();
        let units = changed & self.subscribed;
        if units.is_empty() {
            None
        } else {
            trace!("Tick: {=u8:b}", units.as_u8());
            Some(units)
        }
    }
}

/// Anchors wall clock time to the uptime counter
#[derive(Clone, Copy, Debug)]
pub struct TimeReference {
    /// UTC seconds since the Unix epoch at the reference point
    utc_secs: i64,
    /// Uptime at the reference point
    uptime_secs: u64,
    /// Local time offset from UTC
    utc_offset_secs: i32,
}

impl TimeReference {
    pub fn new(utc_secs: i64, uptime_secs: u64, utc_offset_secs: i32) -> Self {
        Self {
            utc_secs,
            uptime_secs,
            utc_offset_secs,
        }
    }

    /// Local time for the given uptime
    pub fn local_time(&self, uptime_secs: u64) -> Result<NaiveDateTime, Error> {
        let elapsed = i64::try_from(uptime_secs.saturating_sub(self.uptime_secs))
            .map_err(|_| Error::ClockUnavailable)?;
        let local = self
            .utc_secs
            .checked_add(elapsed)
            .and_then(|secs| secs.checked_add(self.utc_offset_secs as i64))
            .ok_or(Error::ClockUnavailable)?;

        DateTime::from_timestamp(local, 0)
            .map(|time| time.naive_utc())
            .ok_or(Error::ClockUnavailable)
    }
}

impl Default for TimeReference {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}
