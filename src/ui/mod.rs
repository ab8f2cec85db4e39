//! UI definitions module
//!
//! Event bindings between the host platform and the watch face.

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::PixelColor};
use enumset::{EnumSet, EnumSetType};

use crate::{battery::BatteryChargeState, time::TimeUnit, Error};

pub mod gauge;
pub mod label;
pub mod resources;
mod surf_watchface;

#[cfg(test)]
pub(crate) mod testing;

pub use surf_watchface::SurfWatchface;

/// Hardware buttons delivered by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Select,
    Up,
    Down,
}

impl Button {
    pub fn name(self) -> &'static str {
        match self {
            Button::Select => "Select",
            Button::Up => "Up",
            Button::Down => "Down",
        }
    }
}

/// Independently redrawn parts of the face
#[derive(Debug, EnumSetType)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Region {
    Report,
    Battery,
    Clock,
    Date,
}

/// Callbacks a watch face implements.
///
/// Event handlers only update state and mark regions dirty; the host calls
/// [`WatchFace::draw`] on its next redraw pass.
pub trait WatchFace {
    type Color: PixelColor;

    /// Time tick for the units that changed
    fn on_tick(&mut self, now: &NaiveDateTime, units: EnumSet<TimeUnit>) -> Result<(), Error>;

    /// Battery charge state changed
    fn on_battery_change(&mut self, state: BatteryChargeState);

    /// Button pressed
    fn on_button(&mut self, button: Button) -> Result<(), Error>;

    /// Regions waiting for a redraw
    fn dirty(&self) -> EnumSet<Region>;

    /// Redraw all dirty regions and return the ones that were drawn
    fn draw<D>(&mut self, target: &mut D) -> Result<EnumSet<Region>, D::Error>
    where
        D: DrawTarget<Color = Self::Color>;
}
