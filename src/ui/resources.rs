//! Bundled icon resources
//!
//! Icons are pre-rasterised monochrome bitmaps written as ASCII art, `#` for
//! a set pixel. They are looked up by identifier and blitted unscaled.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    Pixel,
};

use crate::Error;

/// Identifier of a bundled resource
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResourceId(pub u16);

impl ResourceId {
    pub const WAVE: Self = Self(1);
    pub const CLOUD: Self = Self(2);
}

/// Monochrome bitmap icon
#[derive(Debug, PartialEq, Eq)]
pub struct Icon {
    rows: &'static [&'static str],
}

impl Icon {
    pub const fn new(rows: &'static [&'static str]) -> Self {
        Self { rows }
    }

    pub fn size(&self) -> Size {
        let width = self.rows.first().map_or(0, |row| row.len());
        Size::new(width as u32, self.rows.len() as u32)
    }

    /// Positions of all set pixels relative to `origin`
    pub fn points(&self, origin: Point) -> impl Iterator<Item = Point> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'#')
                .map(move |(x, _)| origin + Point::new(x as i32, y as i32))
        })
    }

    /// Draw the set pixels in `color`, leaving the rest of the target as is
    pub fn draw<D>(&self, origin: Point, color: D::Color, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget,
    {
        target.draw_iter(self.points(origin).map(|point| Pixel(point, color)))
    }
}

pub const WAVE: Icon = Icon::new(&[
    "..........#######...............",
    ".......###.......##.............",
    ".....##....#####...#............",
    "....#....##.....#...#...........",
    "...#....#........#..#...........",
    "..#....#.........#..#...........",
    "..#....#........#...#...........",
    ".#......##....##....#...........",
    ".#........####.......#..........",
    "#.....................##......##",
    "#.......................######..",
    "################################",
]);

pub const CLOUD: Icon = Icon::new(&[
    "...........#####............",
    ".........##.....##..........",
    "........#.........#.........",
    "....####...........#........",
    "...#................###.....",
    "..#....................#....",
    ".#......................#...",
    "#........................#..",
    "#........................#..",
    "#........................#..",
    ".#......................#...",
    "..######################....",
]);

static BUILTIN: [(ResourceId, Icon); 2] = [(ResourceId::WAVE, WAVE), (ResourceId::CLOUD, CLOUD)];

/// Table of bundled resources
pub struct ResourcePack {
    entries: &'static [(ResourceId, Icon)],
}

impl ResourcePack {
    pub const fn new(entries: &'static [(ResourceId, Icon)]) -> Self {
        Self { entries }
    }

    /// Icons shipped with the firmware
    pub const fn builtin() -> Self {
        Self::new(&BUILTIN)
    }

    pub fn get(&self, id: ResourceId) -> Result<&'static Icon, Error> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, icon)| icon)
            .ok_or(Error::ResourceNotFound(id))
    }
}
