//! Compile-time configuration of the watch face

use embedded_graphics::{
    geometry::{Point, Size},
    mono_font::{ascii::FONT_10X20, MonoFont},
    pixelcolor::PixelColor,
    primitives::Rectangle,
};
use enumset::EnumSet;
use profont::PROFONT_24_POINT;

use crate::time::TimeUnit;

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

/// Width of the battery bar at 100 percent
pub const GAUGE_MAX_WIDTH: u32 = 114;

/// Local time offset from UTC
pub const TIMEZONE: i32 = 1 * 3_600;

/// Colours used by the face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<C: PixelColor> {
    pub background: C,
    pub foreground: C,
}

impl<C: PixelColor> Palette<C> {
    pub const fn new(background: C, foreground: C) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// Screen positions of every element
#[derive(Clone, Copy)]
pub struct Layout {
    pub location: Rectangle,
    pub temperature: Rectangle,
    pub cloud_icon: Point,
    pub wave_height: Rectangle,
    pub wave_icon: Point,
    pub gauge: Rectangle,
    pub clock: Rectangle,
    pub date: Rectangle,
    pub clock_font: &'static MonoFont<'static>,
    pub text_font: &'static MonoFont<'static>,
}

impl Default for Layout {
    fn default() -> Self {
        let gauge_x = ((LCD_W - GAUGE_MAX_WIDTH) / 2) as i32;

        Self {
            location: Rectangle::new(Point::new(0, 12), Size::new(LCD_W, 24)),
            cloud_icon: Point::new(44, 50),
            temperature: Rectangle::new(Point::new(84, 46), Size::new(120, 24)),
            wave_icon: Point::new(40, 86),
            wave_height: Rectangle::new(Point::new(84, 80), Size::new(120, 24)),
            gauge: Rectangle::new(Point::new(gauge_x, 126), Size::new(GAUGE_MAX_WIDTH, 4)),
            clock: Rectangle::new(Point::new(0, 134), Size::new(LCD_W, 36)),
            date: Rectangle::new(Point::new(0, 176), Size::new(LCD_W, 24)),
            clock_font: &PROFONT_24_POINT,
            text_font: &FONT_10X20,
        }
    }
}

/// Hard-coded surf conditions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfReport {
    pub location: &'static str,
    pub wave_height: &'static str,
    pub temperature: &'static str,
}

impl Default for SurfReport {
    fn default() -> Self {
        Self {
            location: "Ocean Beach",
            wave_height: "3-4 ft",
            temperature: "17 C",
        }
    }
}

/// Watch face configuration
#[derive(Clone, Copy)]
pub struct Config {
    pub utc_offset_secs: i32,
    /// Units that trigger a tick event
    pub tick_units: EnumSet<TimeUnit>,
    pub layout: Layout,
    pub report: SurfReport,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_secs: TIMEZONE,
            tick_units: TimeUnit::Minute | TimeUnit::Day,
            layout: Layout::default(),
            report: SurfReport::default(),
        }
    }
}
