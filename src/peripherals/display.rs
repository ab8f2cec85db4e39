//! Display control module for PineTime

use embassy_nrf::{
    gpio::Output,
    peripherals::{P0_18, P0_25, P0_26, SPI2},
    spim::Spim,
};

use display_interface_spi::SPIInterface;
use embassy_time::Delay;
use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use enumset::EnumSet;
use mipidsi::{models::ST7789, Builder, Orientation};
use surfreport::{
    config::{LCD_H, LCD_W},
    ui::{Region, WatchFace},
};

type Lcd<'a> = mipidsi::Display<
    SPIInterface<Spim<'a, SPI2>, Output<'a, P0_18>, Output<'a, P0_25>>,
    ST7789,
    Output<'a, P0_26>,
>;

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Controller did not accept the init sequence
    Init,
    /// SPI transfer to the controller failed
    Interface,
}

pub struct Display<'a> {
    /// Display instance
    lcd: Lcd<'a>,
}

impl<'a> Display<'a> {
    /// Initialize the display
    pub fn init(
        spim: Spim<'a, SPI2>,
        cs: Output<'a, P0_25>,
        dc: Output<'a, P0_18>,
        rst: Output<'a, P0_26>,
        delay: &mut Delay,
    ) -> Result<Self, Error> {
        let lcd = Builder::st7789(SPIInterface::new(spim, dc, cs))
            .with_display_size(LCD_W as u16, LCD_H as u16)
            .with_orientation(Orientation::Portrait(false))
            .init(delay, Some(rst))
            .map_err(|_| Error::Init)?;

        Ok(Self { lcd })
    }

    /// Clear the display
    pub fn clear(&mut self, color: Rgb565) -> Result<(), Error> {
        self.lcd.clear(color).map_err(|_| Error::Interface)
    }

    /// Redraw the dirty parts of a watch face
    pub fn render<W>(&mut self, face: &mut W) -> Result<EnumSet<Region>, Error>
    where
        W: WatchFace<Color = Rgb565>,
    {
        face.draw(&mut self.lcd).map_err(|_| Error::Interface)
    }
}
