//! Text labels

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::PixelColor,
    primitives::{Primitive, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
    Drawable,
};

use crate::config::Palette;

/// Clear `bounds` and draw `text` centered inside it
pub fn draw_centered<C, D>(
    text: &str,
    bounds: Rectangle,
    font: &MonoFont<'_>,
    palette: &Palette<C>,
    target: &mut D,
) -> Result<(), D::Error>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    bounds
        .into_styled(PrimitiveStyle::with_fill(palette.background))
        .draw(target)?;

    let character_style = MonoTextStyle::new(font, palette.foreground);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, bounds.center(), character_style, text_style).draw(target)?;

    Ok(())
}
