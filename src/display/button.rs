/*
 *  display/button.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Tappable button regions produced by each rendered frame
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

/// What a button does when tapped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Home,
    Back,
    Menu,
    Volt,
    Oil,
    Temp,
    ResetOil,
    ToggleTemperatureUnit,
    ToggleSpeedUnit,
    ToggleAutoNight,
    ToggleClockStyle,
    Brightness,
}

/// A button as drawn this frame, in logical coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonRegion {
    pub label: String,
    pub bounds: Rectangle,
    pub action: ButtonAction,
}

impl ButtonRegion {
    pub fn new(label: impl Into<String>, bounds: Rectangle, action: ButtonAction) -> Self {
        Self { label: label.into(), bounds, action }
    }

    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }
}

/// First region under `p`, in draw order
pub fn hit_test(regions: &[ButtonRegion], p: Point) -> Option<&ButtonRegion> {
    regions.iter().find(|r| r.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test() {
        let regions = vec![
            ButtonRegion::new("HOME", Rectangle::new(Point::new(0, 0), Size::new(10, 10)), ButtonAction::Home),
            ButtonRegion::new("BACK", Rectangle::new(Point::new(20, 0), Size::new(10, 10)), ButtonAction::Back),
        ];
        assert_eq!(hit_test(&regions, Point::new(5, 5)).map(|r| r.action), Some(ButtonAction::Home));
        assert_eq!(hit_test(&regions, Point::new(29, 9)).map(|r| r.label.as_str()), Some("BACK"));
        // right and bottom edges are exclusive
        assert!(hit_test(&regions, Point::new(10, 5)).is_none());
        assert!(hit_test(&regions, Point::new(15, 5)).is_none());
        assert!(hit_test(&[], Point::new(0, 0)).is_none());
    }
}
