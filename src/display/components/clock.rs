/*
 *  display/components/clock.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Digital time/date strings and the analog clock face
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

use chrono::{NaiveDate, NaiveTime, Timelike};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, PrimitiveStyleBuilder};

use crate::draw::{draw_circle_from_center, draw_line};

/// 12-hour time, no leading zero on the hour: "9:05 PM"
pub fn format_time_12h(t: NaiveTime) -> String {
    t.format("%-I:%M %p").to_string()
}

/// "05 MAR 2026"
pub fn format_date(d: NaiveDate) -> String {
    d.format("%d %b %Y").to_string().to_uppercase()
}

/// Hand angles in degrees clockwise from 12: (hour, minute, second)
pub fn hand_angles(t: NaiveTime) -> (f32, f32, f32) {
    let s = t.second() as f32;
    let m = t.minute() as f32;
    let h = (t.hour() % 12) as f32;
    let second = s * 6.0;
    let minute = (m + s / 60.0) * 6.0;
    let hour = (h + m / 60.0) * 30.0;
    (hour, minute, second)
}

/// Point `len` pixels from `center` at `deg` clockwise from 12 o'clock
pub fn polar(center: Point, deg: f32, len: f32) -> Point {
    let rad = deg.to_radians();
    Point::new(
        center.x + (rad.sin() * len).round() as i32,
        center.y - (rad.cos() * len).round() as i32,
    )
}

/// Analog clock face
#[derive(Debug, Clone, Copy)]
pub struct AnalogClock {
    pub center: Point,
    pub radius: u32,
}

impl AnalogClock {
    pub fn new(center: Point, radius: u32) -> Self {
        Self { center, radius }
    }

    /// (hour, minute, second) hand lengths, strictly increasing
    pub fn hand_lengths(&self) -> (f32, f32, f32) {
        let r = self.radius as f32;
        (r * 0.5, r * 0.75, r * 0.85)
    }

    /// Inner and outer radius and stroke width for tick `i` of 60
    pub fn tick(&self, i: u32) -> (f32, f32, u32) {
        let r = self.radius as f32;
        if i % 5 == 0 {
            (r - 8.0, r, 2)
        } else {
            (r - 4.0, r, 1)
        }
    }

    pub fn draw<D>(&self, target: &mut D, t: NaiveTime, color: Rgb888, dim: Rgb888) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        draw_circle_from_center(target, self.center, self.radius + 2, PrimitiveStyle::with_stroke(dim, 1))?;

        for i in 0..60u32 {
            let deg = i as f32 * 6.0;
            let (inner, outer, width) = self.tick(i);
            let c = if width > 1 { color } else { dim };
            draw_line(target, polar(self.center, deg, inner), polar(self.center, deg, outer), c, width)?;
        }

        let (hour_deg, min_deg, sec_deg) = hand_angles(t);
        let (hour_len, min_len, sec_len) = self.hand_lengths();
        draw_line(target, self.center, polar(self.center, hour_deg, hour_len), color, 3)?;
        draw_line(target, self.center, polar(self.center, min_deg, min_len), color, 2)?;
        draw_line(target, self.center, polar(self.center, sec_deg, sec_len), dim, 1)?;

        let hub = PrimitiveStyleBuilder::new().fill_color(color).build();
        draw_circle_from_center(target, self.center, 2, hub)
    }
}
