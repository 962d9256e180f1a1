/*
 *  display/input.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Pointer/touch events and physical to logical coordinate mapping
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

/// Input as reported by a backend, physical pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Press / touch down
    Tap(Point),
    /// Pointer moved while held
    Drag(Point),
    /// Window closed, Escape or Q
    Quit,
}

/// Maps physical display coordinates onto the logical canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    logical: Size,
    physical: Size,
}

impl InputMapper {
    pub fn new(logical: Size, physical: Size) -> Self {
        Self { logical, physical }
    }

    pub fn logical(&self) -> Size {
        self.logical
    }

    pub fn physical(&self) -> Size {
        self.physical
    }

    /// Window resized or display re-detected
    pub fn set_physical(&mut self, physical: Size) {
        self.physical = physical;
    }

    /// Scale by (logical_w / physical_w, logical_h / physical_h)
    pub fn to_logical(&self, p: Point) -> Point {
        let sx = self.logical.width as f32 / self.physical.width.max(1) as f32;
        let sy = self.logical.height as f32 / self.physical.height.max(1) as f32;
        Point::new(
            (p.x as f32 * sx).floor() as i32,
            (p.y as f32 * sy).floor() as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_800x480() {
        let m = InputMapper::new(Size::new(320, 240), Size::new(800, 480));
        assert_eq!(m.to_logical(Point::new(0, 0)), Point::new(0, 0));
        assert_eq!(m.to_logical(Point::new(400, 240)), Point::new(160, 120));
        assert_eq!(m.to_logical(Point::new(799, 479)), Point::new(319, 239));
    }

    #[test]
    fn test_identity_when_sizes_match() {
        let m = InputMapper::new(Size::new(320, 240), Size::new(320, 240));
        assert_eq!(m.to_logical(Point::new(17, 203)), Point::new(17, 203));
    }

    #[test]
    fn test_resize() {
        let mut m = InputMapper::new(Size::new(320, 240), Size::new(640, 480));
        assert_eq!(m.to_logical(Point::new(100, 100)), Point::new(50, 50));
        m.set_physical(Size::new(1280, 960));
        assert_eq!(m.to_logical(Point::new(100, 100)), Point::new(25, 25));
    }
}
