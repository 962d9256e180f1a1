/*
 *  draw.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing primitives shared by every page
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::display::button::{ButtonAction, ButtonRegion};

pub fn draw_line<D>(
    target: &mut D,
    start: Point,
    end: Point,
    color: Rgb888,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(target)
}

/// Horizontal dashed rule from `x0` to `x1` at `y`
pub fn draw_dashed_rule<D>(
    target: &mut D,
    x0: i32,
    x1: i32,
    y: i32,
    dash: u32,
    gap: u32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let step = (dash + gap).max(1) as usize;
    for x in (x0..x1).step_by(step) {
        let end = (x + dash as i32 - 1).min(x1);
        draw_line(target, Point::new(x, y), Point::new(end, y), color, 1)?;
    }
    Ok(())
}

/// Text with its top-left corner at (x, y)
pub fn draw_text<D>(
    target: &mut D,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Text::with_baseline(text, Point::new(x, y), MonoTextStyle::new(font, color), Baseline::Top)
        .draw(target)?;
    Ok(())
}

/// Text aligned within a box, vertically centred
pub fn draw_text_align<D>(
    target: &mut D,
    text: &str,
    area: Rectangle,
    align: Alignment,
    font: &MonoFont,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let x = match align {
        Alignment::Left => area.top_left.x,
        Alignment::Center => area.top_left.x + area.size.width as i32 / 2,
        Alignment::Right => area.top_left.x + area.size.width as i32 - 1,
    };
    let y = area.top_left.y + area.size.height as i32 / 2;
    let style = TextStyleBuilder::new()
        .alignment(align)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, Point::new(x, y), MonoTextStyle::new(font, color), style)
        .draw(target)?;
    Ok(())
}

pub fn draw_rect_with_style<D>(
    target: &mut D,
    rect: Rectangle,
    style: PrimitiveStyle<Rgb888>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    rect.into_styled(style).draw(target)
}

pub fn draw_circle_from_center<D>(
    target: &mut D,
    center: Point,
    radius: u32,
    style: PrimitiveStyle<Rgb888>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(center, radius * 2 + 1)
        .into_styled(style)
        .draw(target)
}

/// Outlined button with a centred label. Returns the region to hit-test.
pub fn draw_button<D>(
    target: &mut D,
    label: &str,
    bounds: Rectangle,
    action: ButtonAction,
    font: &MonoFont,
    color: Rgb888,
) -> Result<ButtonRegion, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(color)
        .stroke_width(2)
        .build();
    draw_rect_with_style(target, bounds, style)?;
    draw_text_align(target, label, bounds, Alignment::Center, font, color)?;
    Ok(ButtonRegion::new(label, bounds, action))
}

/// Full-width menu row: label on the left, current value on the right
pub fn draw_menu_row<D>(
    target: &mut D,
    label: &str,
    value: &str,
    bounds: Rectangle,
    action: ButtonAction,
    font: &MonoFont,
    color: Rgb888,
) -> Result<ButtonRegion, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_rect_with_style(target, bounds, PrimitiveStyle::with_stroke(color, 1))?;
    let inner = Rectangle::new(
        bounds.top_left + Point::new(8, 0),
        Size::new(bounds.size.width.saturating_sub(16), bounds.size.height),
    );
    draw_text_align(target, label, inner, Alignment::Left, font, color)?;
    draw_text_align(target, value, inner, Alignment::Right, font, color)?;
    Ok(ButtonRegion::new(label, bounds, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::Canvas;
    use embedded_graphics::mono_font::iso_8859_1::FONT_6X10;

    const AMBER: Rgb888 = Rgb888::new(224, 122, 0);

    #[test]
    fn test_button_region_matches_bounds() {
        let mut canvas = Canvas::new(100, 60, Rgb888::BLACK);
        let rect = Rectangle::new(Point::new(10, 10), Size::new(60, 30));
        let region = draw_button(&mut canvas, "OK", rect, ButtonAction::Home, &FONT_6X10, AMBER).unwrap();
        assert_eq!(region.bounds, rect);
        assert_eq!(region.label, "OK");
        // outline painted, outside untouched
        assert_eq!(canvas.pixel(10, 10), Some(AMBER));
        assert_eq!(canvas.pixel(5, 5), Some(Rgb888::BLACK));
        // label lands inside the button
        let lit_inside = (12..68)
            .flat_map(|x| (12..38).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(AMBER))
            .count();
        assert!(lit_inside > 0);
    }

    #[test]
    fn test_dashed_rule_has_gaps() {
        let mut canvas = Canvas::new(40, 4, Rgb888::BLACK);
        draw_dashed_rule(&mut canvas, 0, 40, 1, 4, 4, AMBER).unwrap();
        assert_eq!(canvas.pixel(0, 1), Some(AMBER));
        assert_eq!(canvas.pixel(3, 1), Some(AMBER));
        assert_eq!(canvas.pixel(5, 1), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(8, 1), Some(AMBER));
    }

    #[test]
    fn test_text_clipped_to_canvas() {
        let mut canvas = Canvas::new(20, 10, Rgb888::BLACK);
        draw_text(&mut canvas, "WIDE TEXT", 10, 0, &FONT_6X10, AMBER).unwrap();
        assert!(canvas.count_lit(Rgb888::BLACK) > 0);
    }
}
