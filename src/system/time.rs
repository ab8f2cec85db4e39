//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;
use surfreport::{time::TimeReference, Error};

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement on boot from a known UTC timestamp
    pub fn init(utc_secs: i64, utc_offset_secs: i32) -> Self {
        Self {
            reference: TimeReference::new(utc_secs, Instant::now().as_secs(), utc_offset_secs),
        }
    }

    /// Get current local time
    pub fn get_time(&self) -> Result<NaiveDateTime, Error> {
        self.reference.local_time(Instant::now().as_secs())
    }
}
