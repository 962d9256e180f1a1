/*
 *  display/page.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Screen pages and the brightness slider
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};

use super::layout::{SLIDER_BAR, SLIDER_SLACK};

/// The page currently on screen. Each variant carries only what its page needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Volt,
    Oil,
    Temp,
    Menu,
    Brightness(Slider),
}

impl Page {
    /// Brightness page with the standard slider geometry
    pub fn brightness() -> Self {
        Page::Brightness(Slider::default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "HOME",
            Page::Volt => "VOLT",
            Page::Oil => "OIL",
            Page::Temp => "TEMP",
            Page::Menu => "MENU",
            Page::Brightness(_) => "BRIGHTNESS",
        }
    }
}

/// Horizontal brightness bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub bar: Rectangle,
}

impl Default for Slider {
    fn default() -> Self {
        Self { bar: SLIDER_BAR }
    }
}

impl Slider {
    /// The bar plus some slack all round for fat fingers
    pub fn touch_area(&self) -> Rectangle {
        let slack = SLIDER_SLACK as i32;
        Rectangle::new(
            self.bar.top_left - Point::new(slack, slack),
            self.bar.size + Size::new(2 * SLIDER_SLACK, 2 * SLIDER_SLACK),
        )
    }

    pub fn hit(&self, p: Point) -> bool {
        self.touch_area().contains(p)
    }

    /// Percent for a tap at logical `x`:
    /// round(100 * clamp((x - bar_x) / bar_w, 0, 1))
    pub fn level_at(&self, x: i32) -> u8 {
        let w = self.bar.size.width.max(1) as f32;
        let frac = ((x - self.bar.top_left.x) as f32 / w).clamp(0.0, 1.0);
        (100.0 * frac).round() as u8
    }

    /// Filled width of the bar for a brightness percent
    pub fn fill_width(&self, percent: u8) -> u32 {
        (self.bar.size.width * percent.min(100) as u32 + 50) / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_at() {
        let s = Slider::default();
        let x0 = s.bar.top_left.x;
        let w = s.bar.size.width as i32;
        assert_eq!(s.level_at(x0), 0);
        assert_eq!(s.level_at(x0 + w), 100);
        assert_eq!(s.level_at(x0 + w / 2), 50);
        assert_eq!(s.level_at(x0 + w / 4), 25);
        // clamped either side
        assert_eq!(s.level_at(x0 - 30), 0);
        assert_eq!(s.level_at(x0 + w + 30), 100);
    }

    #[test]
    fn test_touch_area_has_slack() {
        let s = Slider::default();
        let mid_x = s.bar.center().x;
        assert!(s.hit(Point::new(mid_x, s.bar.top_left.y - 10)));
        assert!(!s.hit(Point::new(mid_x, s.bar.top_left.y - 40)));
    }

    #[test]
    fn test_fill_width() {
        let s = Slider::default();
        assert_eq!(s.fill_width(0), 0);
        assert_eq!(s.fill_width(100), s.bar.size.width);
        assert_eq!(s.fill_width(50), s.bar.size.width / 2);
    }

    #[test]
    fn test_page_names() {
        assert_eq!(Page::brightness().name(), "BRIGHTNESS");
        assert_eq!(Page::Home.name(), "HOME");
    }
}
