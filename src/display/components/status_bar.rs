/*
 *  display/components/status_bar.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Page header: title left, clock right, amber rule beneath
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

use chrono::NaiveTime;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use super::clock::format_time_12h;
use crate::display::layout::{
    FONT_SMALL, FONT_TITLE, HEADER_RULE_Y, HEADER_TEXT_Y, LOGICAL_WIDTH, MARGIN,
};
use crate::draw::{draw_line, draw_text, draw_text_align};

/// Header drawn across the top of every page except HOME
pub struct StatusBar<'a> {
    pub title: &'a str,
    pub time: NaiveTime,
}

impl<'a> StatusBar<'a> {
    pub fn new(title: &'a str, time: NaiveTime) -> Self {
        Self { title, time }
    }

    pub fn render<D>(&self, target: &mut D, color: Rgb888) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        draw_text(target, self.title, MARGIN, HEADER_TEXT_Y, FONT_TITLE, color)?;

        let right = Rectangle::new(
            Point::new(MARGIN, HEADER_TEXT_Y),
            Size::new(LOGICAL_WIDTH - 2 * MARGIN as u32, FONT_TITLE.character_size.height),
        );
        draw_text_align(target, &format_time_12h(self.time), right, Alignment::Right, FONT_SMALL, color)?;

        draw_line(
            target,
            Point::new(MARGIN, HEADER_RULE_Y),
            Point::new(LOGICAL_WIDTH as i32 - MARGIN, HEADER_RULE_Y),
            color,
            1,
        )
    }
}
