//! Rendering test helpers on top of the simulator display

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Size},
    pixelcolor::BinaryColor,
    primitives::{PointsIter, Rectangle},
    Pixel,
};
use embedded_graphics_simulator::SimulatorDisplay;

pub type Screen = SimulatorDisplay<BinaryColor>;

/// Blank screen, every pixel `Off`
pub fn screen(size: Size) -> Screen {
    SimulatorDisplay::new(size)
}

/// Pixels of `color` inside `area`
pub fn count_in(display: &Screen, area: &Rectangle, color: BinaryColor) -> usize {
    area.intersection(&display.bounding_box())
        .points()
        .filter(|point| display.get_pixel(*point) == color)
        .count()
}

/// Pixels of `color` on the whole screen
pub fn count(display: &Screen, color: BinaryColor) -> usize {
    count_in(display, &display.bounding_box(), color)
}

/// Forwards to another target and counts the pixels drawn through it
pub struct WriteCounter<'a, D> {
    target: &'a mut D,
    writes: usize,
}

impl<'a, D: DrawTarget> WriteCounter<'a, D> {
    pub fn new(target: &'a mut D) -> Self {
        Self { target, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<D: DrawTarget> Dimensions for WriteCounter<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D: DrawTarget> DrawTarget for WriteCounter<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let writes = &mut self.writes;
        self.target
            .draw_iter(pixels.into_iter().inspect(|_| *writes += 1))
    }
}
