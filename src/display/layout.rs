/*
 *  display/layout.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Logical canvas geometry, palette and fonts
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

//! Every page is laid out against a fixed 320x240 canvas which is scaled
//! to whatever the physical panel is at present time.

use embedded_graphics::mono_font::{iso_8859_1, MonoFont};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

pub const LOGICAL_WIDTH: u32 = 320;
pub const LOGICAL_HEIGHT: u32 = 240;

pub const fn logical_size() -> Size {
    Size::new(LOGICAL_WIDTH, LOGICAL_HEIGHT)
}

// ---- palette, 80s amber on black ----
pub const AMBER: Rgb888 = Rgb888::new(224, 122, 0);
pub const AMBER_DIM: Rgb888 = Rgb888::new(112, 61, 0);
pub const BACKGROUND: Rgb888 = Rgb888::new(0, 0, 0);

// ---- fonts (iso_8859_1 for the degree sign) ----
pub const FONT_TITLE: &MonoFont<'static> = &iso_8859_1::FONT_10X20;
pub const FONT_VALUE: &MonoFont<'static> = &iso_8859_1::FONT_10X20;
pub const FONT_BODY: &MonoFont<'static> = &iso_8859_1::FONT_9X15;
pub const FONT_BODY_BOLD: &MonoFont<'static> = &iso_8859_1::FONT_9X15_BOLD;
pub const FONT_LABEL: &MonoFont<'static> = &iso_8859_1::FONT_7X13_BOLD;
pub const FONT_SMALL: &MonoFont<'static> = &iso_8859_1::FONT_6X10;

// ---- margins and header ----
pub const MARGIN: i32 = 8;
pub const HEADER_TEXT_Y: i32 = 8;
pub const HEADER_RULE_Y: i32 = 32;
pub const CONTENT_TOP: i32 = 40;

// ---- home page ----
pub const LOGO_SIZE: u32 = 48;
pub const LOGO_ORIGIN: Point = Point::new(8, 8);
pub const EMBLEM_CENTER: Point = Point::new(32, 32);
pub const EMBLEM_RADIUS: u32 = 20;
pub const HOME_TITLE: Point = Point::new(68, 18);
pub const HOME_RULE_Y: i32 = 60;
pub const ANALOG_CENTER: Point = Point::new(262, 128);
pub const ANALOG_RADIUS: u32 = 50;

// ---- bottom navigation bar ----
pub const NAV_Y: i32 = 204;
pub const NAV_HEIGHT: u32 = 30;
pub const NAV_GAP: i32 = 6;

/// Evenly split the nav bar into `count` buttons, left to right
pub fn nav_slots(count: usize) -> Vec<Rectangle> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as i32;
    let usable = LOGICAL_WIDTH as i32 - 2 * MARGIN - NAV_GAP * (n - 1);
    let w = usable / n;
    (0..n)
        .map(|i| {
            Rectangle::new(
                Point::new(MARGIN + i * (w + NAV_GAP), NAV_Y),
                Size::new(w as u32, NAV_HEIGHT),
            )
        })
        .collect()
}

// ---- menu rows ----
pub const MENU_ROW_TOP: i32 = 38;
pub const MENU_ROW_PITCH: i32 = 32;
pub const MENU_ROW_HEIGHT: u32 = 28;

pub fn menu_row(index: usize) -> Rectangle {
    Rectangle::new(
        Point::new(MARGIN, MENU_ROW_TOP + index as i32 * MENU_ROW_PITCH),
        Size::new(LOGICAL_WIDTH - 2 * MARGIN as u32, MENU_ROW_HEIGHT),
    )
}

// ---- oil page ----
pub const OIL_RESET: Rectangle = Rectangle::new(Point::new(200, 150), Size::new(112, 30));

// ---- brightness slider ----
pub const SLIDER_BAR: Rectangle = Rectangle::new(Point::new(40, 110), Size::new(240, 24));
/// Extra touch area above and below the bar
pub const SLIDER_SLACK: u32 = 16;
