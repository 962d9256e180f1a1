/*
 *  display/router.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Page router - tracks the current page and the buttons drawn on it,
 *  and handles page transitions driven by button taps
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

use super::button::{hit_test, ButtonAction, ButtonRegion};
use super::page::Page;

/// Where `action` leads from `current`. None means the action does not
/// change page (setting toggles, oil reset).
pub fn next_page(current: Page, action: ButtonAction) -> Option<Page> {
    match action {
        ButtonAction::Home => Some(Page::Home),
        ButtonAction::Menu => Some(Page::Menu),
        ButtonAction::Volt => Some(Page::Volt),
        ButtonAction::Oil => Some(Page::Oil),
        ButtonAction::Temp => Some(Page::Temp),
        ButtonAction::Brightness => Some(Page::brightness()),
        ButtonAction::Back => match current {
            Page::Brightness(_) => Some(Page::Menu),
            Page::Home | Page::Volt | Page::Oil | Page::Temp | Page::Menu => Some(Page::Home),
        },
        ButtonAction::ResetOil
        | ButtonAction::ToggleTemperatureUnit
        | ButtonAction::ToggleSpeedUnit
        | ButtonAction::ToggleAutoNight
        | ButtonAction::ToggleClockStyle => None,
    }
}

/// Page router
///
/// Holds the one current page and exactly the button regions rendered for
/// it. Regions are dropped on every page change, so until the new page has
/// been drawn nothing can be hit.
#[derive(Debug)]
pub struct Router {
    current: Page,
    regions: Vec<ButtonRegion>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Page::Home)
    }
}

impl Router {
    pub fn new(start: Page) -> Self {
        Self {
            current: start,
            regions: Vec::new(),
        }
    }

    pub fn current_page(&self) -> Page {
        self.current
    }

    pub fn regions(&self) -> &[ButtonRegion] {
        &self.regions
    }

    /// Replace the hit regions with those just rendered for the current page
    pub fn set_regions(&mut self, regions: Vec<ButtonRegion>) {
        self.regions = regions;
    }

    /// Button under a logical point, current frame only
    pub fn hit(&self, p: Point) -> Option<&ButtonRegion> {
        hit_test(&self.regions, p)
    }

    /// Apply the navigation part of an action. Returns true if the page changed.
    pub fn navigate(&mut self, action: ButtonAction) -> bool {
        match next_page(self.current, action) {
            Some(page) => self.go(page),
            None => false,
        }
    }

    /// Switch to `page`. Returns true if it differs from the current one.
    pub fn go(&mut self, page: Page) -> bool {
        // stale rectangles must never be tested against the new page
        self.regions.clear();
        if page != self.current {
            log::info!("Page changed: {} -> {}", self.current.name(), page.name());
            self.current = page;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::Rectangle;

    fn region(label: &str, x: i32, action: ButtonAction) -> ButtonRegion {
        ButtonRegion::new(label, Rectangle::new(Point::new(x, 200), Size::new(50, 30)), action)
    }

    #[test]
    fn test_home_transitions() {
        assert_eq!(next_page(Page::Home, ButtonAction::Volt), Some(Page::Volt));
        assert_eq!(next_page(Page::Home, ButtonAction::Oil), Some(Page::Oil));
        assert_eq!(next_page(Page::Home, ButtonAction::Temp), Some(Page::Temp));
        assert_eq!(next_page(Page::Home, ButtonAction::Menu), Some(Page::Menu));
    }

    #[test]
    fn test_value_page_transitions() {
        for page in [Page::Volt, Page::Oil, Page::Temp, Page::Menu] {
            assert_eq!(next_page(page, ButtonAction::Home), Some(Page::Home));
            assert_eq!(next_page(page, ButtonAction::Back), Some(Page::Home));
            assert_eq!(next_page(page, ButtonAction::Menu), Some(Page::Menu));
        }
    }

    #[test]
    fn test_brightness_back_goes_to_menu() {
        assert_eq!(next_page(Page::Menu, ButtonAction::Brightness), Some(Page::brightness()));
        assert_eq!(next_page(Page::brightness(), ButtonAction::Back), Some(Page::Menu));
        assert_eq!(next_page(Page::brightness(), ButtonAction::Home), Some(Page::Home));
    }

    #[test]
    fn test_toggles_stay_put() {
        for action in [
            ButtonAction::ResetOil,
            ButtonAction::ToggleTemperatureUnit,
            ButtonAction::ToggleSpeedUnit,
            ButtonAction::ToggleAutoNight,
            ButtonAction::ToggleClockStyle,
        ] {
            assert_eq!(next_page(Page::Menu, action), None);
        }
    }

    #[test]
    fn test_page_change_clears_regions() {
        let mut router = Router::default();
        router.set_regions(vec![region("MENU", 0, ButtonAction::Menu)]);
        assert!(router.hit(Point::new(10, 210)).is_some());

        assert!(router.navigate(ButtonAction::Menu));
        assert_eq!(router.current_page(), Page::Menu);
        assert!(router.regions().is_empty());
        assert!(router.hit(Point::new(10, 210)).is_none());
    }

    #[test]
    fn test_tap_outside_regions() {
        let mut router = Router::new(Page::Menu);
        router.set_regions(vec![region("HOME", 0, ButtonAction::Home), region("BACK", 60, ButtonAction::Back)]);
        assert!(router.hit(Point::new(200, 20)).is_none());
        assert_eq!(router.current_page(), Page::Menu);

        let action = router.hit(Point::new(5, 205)).map(|r| r.action);
        assert_eq!(action, Some(ButtonAction::Home));
        assert!(router.navigate(ButtonAction::Home));
        assert_eq!(router.current_page(), Page::Home);
    }

    #[test]
    fn test_toggle_does_not_clear_regions() {
        let mut router = Router::new(Page::Menu);
        router.set_regions(vec![region("HOME", 0, ButtonAction::Home)]);
        assert!(!router.navigate(ButtonAction::ToggleAutoNight));
        assert_eq!(router.regions().len(), 1);
    }
}
