//! Battery model
//!
//! Conversion of raw SAADC samples into a charge percentage and tracking of
//! the last reported charge state. Voltage formula and interpolation points
//! follow https://wiki.pine64.org/wiki/PineTime.

use crate::Error;

/// Battery charge in percent, always within 0..=100
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(100);

    /// Create a level, clamping values above 100 percent
    pub fn new(percent: u8) -> Self {
        if percent > 100 {
            warn!("Battery level {} out of range, clamping", percent);
            Self::FULL
        } else {
            Self(percent)
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

/// Battery state as delivered by the battery service
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryChargeState {
    pub level: BatteryLevel,
    pub charging: bool,
}

impl BatteryChargeState {
    pub fn new(percent: u8, charging: bool) -> Self {
        Self {
            level: BatteryLevel::new(percent),
            charging,
        }
    }

    /// Derive the state from a raw SAADC sample and the charge indication
    pub fn from_adc(raw_measurement: i16, charging: bool) -> Result<Self, Error> {
        let voltage = millivolts_from_adc(raw_measurement)?;
        Ok(Self::new(percent_from_millivolts(voltage), charging))
    }
}

/// Convert a 12 bit ADC measurement into the battery voltage in millivolts.
pub fn millivolts_from_adc(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // Keep as 32 bit for the multiplication. Multiply by 2 * 1000 for
            // mV (voltage divider) and divide by 2^12 / 3.3V reference.
            let adc_val = raw_measurement as u32;
            Ok((adc_val * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate the battery capacity from its voltage.
///
/// Uses fixed data points with linear interpolation in between.
pub fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

/// Remembers the last reported state so that listeners are only notified
/// about actual changes.
#[derive(Default)]
pub struct BatteryMonitor {
    last: Option<BatteryChargeState>,
}

impl BatteryMonitor {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record a fresh reading. Return whether it differs from the last one.
    pub fn update(&mut self, state: BatteryChargeState) -> bool {
        if self.last == Some(state) {
            return false;
        }
        debug!(
            "Battery: {}% ({})",
            state.level.percent(),
            if state.charging { "charging" } else { "discharging" }
        );
        self.last = Some(state);
        true
    }
}
