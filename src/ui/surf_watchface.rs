//! Surf report watchface
//!
//! Clock, date and battery bar below a static surf report made of the
//! location, the air temperature next to a cloud and the wave height next to
//! a wave.

use chrono::NaiveDateTime;
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::PixelColor,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    Drawable,
};
use enumset::EnumSet;

use super::{
    gauge::BatteryGauge,
    label::draw_centered,
    resources::{Icon, ResourceId, ResourcePack},
    Button, Region, WatchFace,
};
use crate::{
    battery::{BatteryChargeState, BatteryLevel},
    config::{Config, Palette},
    time::{ClockReading, TimeUnit},
    Error,
};

pub struct SurfWatchface<C: PixelColor> {
    config: Config,
    palette: Palette<C>,
    wave: &'static Icon,
    cloud: &'static Icon,
    /// Clock and date text
    reading: ClockReading,
    gauge: BatteryGauge<C>,
    battery: BatteryLevel,
    dirty: EnumSet<Region>,
}

impl<C: PixelColor> SurfWatchface<C> {
    /// Create the face with all regions pending a redraw. Fails if one of
    /// the icons is missing from `resources`.
    pub fn new(config: Config, palette: Palette<C>, resources: &ResourcePack) -> Result<Self, Error> {
        let layout = &config.layout;

        Ok(Self {
            wave: resources.get(ResourceId::WAVE)?,
            cloud: resources.get(ResourceId::CLOUD)?,
            reading: ClockReading::default(),
            gauge: BatteryGauge::new(layout.gauge, palette),
            battery: BatteryLevel::EMPTY,
            dirty: EnumSet::all(),
            config,
            palette,
        })
    }

    pub fn reading(&self) -> &ClockReading {
        &self.reading
    }

    pub fn battery_level(&self) -> BatteryLevel {
        self.battery
    }

    fn draw_icon<D>(&self, icon: &Icon, origin: Point, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        Rectangle::new(origin, icon.size())
            .into_styled(PrimitiveStyle::with_fill(self.palette.background))
            .draw(target)?;
        icon.draw(origin, self.palette.foreground, target)
    }

    fn draw_report<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let layout = &self.config.layout;
        let report = &self.config.report;

        draw_centered(report.location, layout.location, layout.text_font, &self.palette, target)?;
        self.draw_icon(self.cloud, layout.cloud_icon, target)?;
        draw_centered(report.temperature, layout.temperature, layout.text_font, &self.palette, target)?;
        self.draw_icon(self.wave, layout.wave_icon, target)?;
        draw_centered(report.wave_height, layout.wave_height, layout.text_font, &self.palette, target)
    }
}

impl<C: PixelColor> WatchFace for SurfWatchface<C> {
    type Color = C;

    fn on_tick(&mut self, now: &NaiveDateTime, units: EnumSet<TimeUnit>) -> Result<(), Error> {
        if units.is_empty() {
            return Ok(());
        }

        if self.reading.update_time(now)? {
            self.dirty |= Region::Clock;
        }

        let date_units = TimeUnit::Day | TimeUnit::Month | TimeUnit::Year;
        if (!units.is_disjoint(date_units) || self.reading.date.as_str().is_empty())
            && self.reading.update_date(now)?
        {
            self.dirty |= Region::Date;
        }

        Ok(())
    }

    fn on_battery_change(&mut self, state: BatteryChargeState) {
        self.battery = state.level;
        self.dirty |= Region::Battery;
    }

    fn on_button(&mut self, button: Button) -> Result<(), Error> {
        info!("Button pressed: {}", button.name());
        self.reading.time.set(button.name())?;
        self.dirty |= Region::Clock;
        Ok(())
    }

    fn dirty(&self) -> EnumSet<Region> {
        self.dirty
    }

    fn draw<D>(&mut self, target: &mut D) -> Result<EnumSet<Region>, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let pending = self.dirty;
        let layout = &self.config.layout;
        let palette = &self.palette;

        for region in pending {
            match region {
                Region::Report => self.draw_report(target)?,
                Region::Battery => self.gauge.draw(self.battery, target)?,
                Region::Clock => draw_centered(
                    self.reading.time.as_str(),
                    layout.clock,
                    layout.clock_font,
                    palette,
                    target,
                )?,
                Region::Date => draw_centered(
                    self.reading.date.as_str(),
                    layout.date,
                    layout.text_font,
                    palette,
                    target,
                )?,
            }
        }

        self.dirty = EnumSet::empty();
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{LCD_H, LCD_W},
        ui::{
            resources::WAVE,
            testing::{count, count_in, screen, Screen, WriteCounter},
        },
    };
    use chrono::NaiveDate;
    use embedded_graphics::{geometry::Size, pixelcolor::BinaryColor};
    use enumset::enum_set;

    const PALETTE: Palette<BinaryColor> = Palette::new(BinaryColor::Off, BinaryColor::On);

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 5)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn face() -> SurfWatchface<BinaryColor> {
        SurfWatchface::new(Config::default(), PALETTE, &ResourcePack::builtin()).unwrap()
    }

    fn lcd() -> Screen {
        screen(Size::new(LCD_W, LCD_H))
    }

    #[test]
    fn test_new_requires_icons() {
        static WAVE_ONLY: [(ResourceId, Icon); 1] = [(ResourceId::WAVE, WAVE)];
        let result =
            SurfWatchface::new(Config::default(), PALETTE, &ResourcePack::new(&WAVE_ONLY));
        assert!(matches!(
            result,
            Err(Error::ResourceNotFound(ResourceId::CLOUD))
        ));
    }

    #[test]
    fn test_first_draw_covers_everything_once() {
        let mut face = face();
        let mut display = lcd();
        assert_eq!(face.dirty(), EnumSet::all());

        let mut counter = WriteCounter::new(&mut display);
        assert_eq!(face.draw(&mut counter).unwrap(), EnumSet::all());
        let writes = counter.writes();
        assert!(writes > 0);

        assert_eq!(face.draw(&mut counter).unwrap(), EnumSet::empty());
        assert_eq!(counter.writes(), writes);
        assert!(count(&display, BinaryColor::On) > 0);
    }

    #[test]
    fn test_tick_formats_clock_and_date() {
        let mut face = face();
        let mut display = lcd();
        face.draw(&mut display).unwrap();

        face.on_tick(&at(14, 5), EnumSet::all()).unwrap();
        assert_eq!(face.reading().time.as_str(), "02:05 PM");
        assert_eq!(face.reading().date.as_str(), "Mon 05, Jun");
        assert_eq!(face.dirty(), Region::Clock | Region::Date);
        face.draw(&mut display).unwrap();

        // Same minute, nothing changes
        face.on_tick(&at(14, 5), enum_set!(TimeUnit::Minute)).unwrap();
        assert_eq!(face.dirty(), EnumSet::empty());

        face.on_tick(&at(14, 6), enum_set!(TimeUnit::Minute)).unwrap();
        assert_eq!(face.reading().time.as_str(), "02:06 PM");
        assert_eq!(face.dirty(), enum_set!(Region::Clock));
    }

    #[test]
    fn test_minute_tick_leaves_date_alone() {
        let mut face = face();
        face.on_tick(&at(23, 59), EnumSet::all()).unwrap();
        face.draw(&mut lcd()).unwrap();

        let next_day = NaiveDate::from_ymd_opt(2023, 6, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        face.on_tick(&next_day, enum_set!(TimeUnit::Minute)).unwrap();
        assert_eq!(face.reading().date.as_str(), "Mon 05, Jun");

        face.on_tick(&next_day, TimeUnit::Minute | TimeUnit::Day).unwrap();
        assert_eq!(face.reading().date.as_str(), "Tue 06, Jun");
        assert_eq!(face.dirty(), Region::Clock | Region::Date);
    }

    #[test]
    fn test_battery_change_redraws_gauge_once() {
        let mut face = face();
        let mut display = lcd();
        face.draw(&mut display).unwrap();
        let track = Config::default().layout.gauge;

        face.on_battery_change(BatteryChargeState::new(50, false));
        assert_eq!(face.dirty(), enum_set!(Region::Battery));
        assert_eq!(face.draw(&mut display).unwrap(), enum_set!(Region::Battery));
        assert_eq!(count_in(&display, &track, BinaryColor::On), 57 * track.size.height as usize);
        assert_eq!(face.draw(&mut display).unwrap(), EnumSet::empty());
    }

    #[test]
    fn test_gauge_shows_latest_level_only() {
        let mut face = face();
        let mut display = lcd();
        let track = Config::default().layout.gauge;

        face.on_battery_change(BatteryChargeState::new(100, false));
        face.draw(&mut display).unwrap();
        assert_eq!(count_in(&display, &track, BinaryColor::On), 114 * track.size.height as usize);

        face.on_battery_change(BatteryChargeState::new(90, false));
        face.on_battery_change(BatteryChargeState::new(20, true));
        assert_eq!(face.battery_level().percent(), 20);
        assert_eq!(face.draw(&mut display).unwrap(), enum_set!(Region::Battery));
        // 20% of 114
        assert_eq!(count_in(&display, &track, BinaryColor::On), 22 * track.size.height as usize);
    }

    #[test]
    fn test_battery_level_clamped() {
        let mut face = face();
        face.on_battery_change(BatteryChargeState::new(150, false));
        assert_eq!(face.battery_level(), BatteryLevel::FULL);
    }

    #[test]
    fn test_buttons_show_placeholder_until_next_minute() {
        let mut face = face();
        face.on_tick(&at(9, 41), EnumSet::all()).unwrap();
        face.draw(&mut lcd()).unwrap();

        for (button, text) in [
            (Button::Select, "Select"),
            (Button::Up, "Up"),
            (Button::Down, "Down"),
        ] {
            face.on_button(button).unwrap();
            assert_eq!(face.reading().time.as_str(), text);
            assert_eq!(face.dirty(), enum_set!(Region::Clock));
        }

        face.on_tick(&at(9, 42), enum_set!(TimeUnit::Minute)).unwrap();
        assert_eq!(face.reading().time.as_str(), "09:42 AM");
    }
}
