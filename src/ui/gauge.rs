//! Battery gauge
//!
//! A horizontal bar: the full track in the background colour, overdrawn from
//! the left by the charged part in the foreground colour.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Size,
    pixelcolor::PixelColor,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    Drawable,
};

use crate::{battery::BatteryLevel, config::Palette};

/// Width of the charged part of a track `track_width` wide, truncated
/// toward zero.
pub fn fill_width(level: BatteryLevel, track_width: u32) -> u32 {
    level.percent() as u32 * track_width / 100
}

pub struct BatteryGauge<C: PixelColor> {
    track: Rectangle,
    palette: Palette<C>,
}

impl<C: PixelColor> BatteryGauge<C> {
    pub fn new(track: Rectangle, palette: Palette<C>) -> Self {
        Self { track, palette }
    }

    /// Left aligned charged part of the track
    pub fn bar(&self, level: BatteryLevel) -> Rectangle {
        Rectangle::new(
            self.track.top_left,
            Size::new(
                fill_width(level, self.track.size.width),
                self.track.size.height,
            ),
        )
    }

    pub fn draw<D>(&self, level: BatteryLevel, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        self.track
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(target)?;
        self.bar(level)
            .into_styled(PrimitiveStyle::with_fill(self.palette.foreground))
            .draw(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{count, count_in, screen};
    use embedded_graphics::{geometry::Point, pixelcolor::BinaryColor};
    use proptest::prelude::*;

    fn level(percent: u8) -> BatteryLevel {
        BatteryLevel::new(percent)
    }

    #[test]
    fn test_fill_width_reference_points() {
        assert_eq!(fill_width(level(0), 114), 0);
        assert_eq!(fill_width(level(50), 114), 57);
        assert_eq!(fill_width(level(100), 114), 114);
        assert_eq!(fill_width(level(1), 114), 1);
        assert_eq!(fill_width(level(99), 114), 112);
    }

    #[test]
    fn test_fill_width_matches_float_truncation() {
        for percent in 0u8..=100 {
            let truncated = ((percent as f32 / 100.0) * 114.0) as u32;
            assert_eq!(fill_width(level(percent), 114), truncated, "{}%", percent);
        }
    }

    #[test]
    fn test_draw_overwrites_previous_bar() {
        let track = Rectangle::new(Point::new(3, 2), Size::new(114, 2));
        let gauge = BatteryGauge::new(track, Palette::new(BinaryColor::Off, BinaryColor::On));
        let mut display = screen(Size::new(120, 6));

        gauge.draw(level(100), &mut display).unwrap();
        assert_eq!(count(&display, BinaryColor::On), 114 * 2);

        gauge.draw(level(50), &mut display).unwrap();
        assert_eq!(count_in(&display, &track, BinaryColor::On), 57 * 2);
        assert_eq!(count(&display, BinaryColor::On), 57 * 2);
        assert_eq!(display.get_pixel(Point::new(3, 2)), BinaryColor::On);
        assert_eq!(display.get_pixel(Point::new(59, 3)), BinaryColor::On);
        assert_eq!(display.get_pixel(Point::new(60, 3)), BinaryColor::Off);
    }

    #[test]
    fn test_draw_empty_clears_track() {
        let track = Rectangle::new(Point::zero(), Size::new(10, 1));
        let gauge = BatteryGauge::new(track, Palette::new(BinaryColor::Off, BinaryColor::On));
        let mut display = screen(Size::new(10, 1));
        display.clear(BinaryColor::On).unwrap();

        gauge.draw(level(0), &mut display).unwrap();
        assert_eq!(count(&display, BinaryColor::On), 0);
    }

    proptest! {
        #[test]
        fn prop_fill_width_is_truncated_fraction(percent in 0u8..=100, width in 1u32..=240) {
            let fill = fill_width(level(percent), width);
            prop_assert_eq!(fill, (percent as u32 * width) / 100);
            prop_assert!(fill <= width);
        }

        #[test]
        fn prop_out_of_range_is_clamped(percent in 101u8..=u8::MAX, width in 1u32..=240) {
            prop_assert_eq!(fill_width(level(percent), width), width);
        }

        #[test]
        fn prop_bar_stays_inside_track(percent in any::<u8>(), x in -10i32..10, y in -10i32..10) {
            let track = Rectangle::new(Point::new(x, y), Size::new(114, 4));
            let gauge = BatteryGauge::new(track, Palette::new(BinaryColor::Off, BinaryColor::On));
            let bar = gauge.bar(level(percent));
            prop_assert_eq!(bar.top_left, track.top_left);
            prop_assert_eq!(bar.size.height, track.size.height);
            prop_assert!(bar.size.width <= track.size.width);
        }
    }
}
