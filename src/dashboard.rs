/*
 *  dashboard.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  The dashboard state and its per-frame step:
 *  drain input, mutate state, render, present
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

use chrono::{DateTime, Local};
use embedded_graphics::prelude::*;
use log::debug;

use crate::dimming::{dim_factor, overlay_alpha};
use crate::display::button::{ButtonAction, ButtonRegion};
use crate::display::framebuffer::Frame;
use crate::display::input::{InputEvent, InputMapper};
use crate::display::layout::{BACKGROUND, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::display::page::Page;
use crate::display::render::{render_page, PageContext};
use crate::display::router::Router;
use crate::oil::OilStore;
use crate::sensors::{Readings, SensorSource};
use crate::settings::Settings;
use crate::svgimage::Logo;
use crate::vframebuf::Canvas;
use crate::weather::{WeatherProvider, WeatherReport};

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Dashboard {
    settings: Settings,
    oil: OilStore,
    router: Router,
    sensors: Box<dyn SensorSource>,
    weather: Box<dyn WeatherProvider>,
    readings: Readings,
    report: WeatherReport,
    last_sample: Option<i64>,
    canvas: Canvas,
    logo: Logo,
    title: String,
}

impl Dashboard {
    pub fn new(
        settings: Settings,
        oil: OilStore,
        mut sensors: Box<dyn SensorSource>,
        weather: Box<dyn WeatherProvider>,
        logo: Logo,
        title: impl Into<String>,
    ) -> Self {
        let readings = sensors.read();
        let report = weather.report(settings.temperature_unit);
        Self {
            settings,
            oil,
            router: Router::default(),
            sensors,
            weather,
            readings,
            report,
            last_sample: None,
            canvas: Canvas::new(LOGICAL_WIDTH, LOGICAL_HEIGHT, BACKGROUND),
            logo,
            title: title.into(),
        }
    }

    /// Home page heading, also the window caption
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn page(&self) -> Page {
        self.router.current_page()
    }

    pub fn oil(&self) -> &OilStore {
        &self.oil
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    /// Buttons drawn by the last render
    pub fn regions(&self) -> &[ButtonRegion] {
        self.router.regions()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Handle one backend event
    pub fn handle(&mut self, event: InputEvent, mapper: &InputMapper, now: DateTime<Local>) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::Tap(p) => {
                self.tap(mapper.to_logical(p), now.timestamp());
            }
            InputEvent::Drag(p) => self.drag(mapper.to_logical(p)),
        }
        Flow::Continue
    }

    /// Tap at a logical point. Buttons win over the brightness slider.
    pub fn tap(&mut self, p: Point, now_ts: i64) -> Option<ButtonAction> {
        if let Some(action) = self.router.hit(p).map(|r| r.action) {
            debug!("Tap {:?} -> {:?}", p, action);
            self.apply(action, now_ts);
            return Some(action);
        }
        self.drag(p);
        None
    }

    /// Pointer held and moving: only the brightness slider follows it
    pub fn drag(&mut self, p: Point) {
        if let Page::Brightness(slider) = self.router.current_page() {
            if slider.hit(p) {
                self.settings.set_brightness(slider.level_at(p.x));
            }
        }
    }

    pub fn apply(&mut self, action: ButtonAction, now_ts: i64) {
        match action {
            ButtonAction::ToggleTemperatureUnit => {
                self.settings.toggle_temperature_unit();
                // weather is cached per second, restate it in the new unit now
                self.report = self.weather.report(self.settings.temperature_unit);
            }
            ButtonAction::ToggleSpeedUnit => self.settings.toggle_speed_unit(),
            ButtonAction::ToggleAutoNight => self.settings.toggle_auto_night(),
            ButtonAction::ToggleClockStyle => self.settings.toggle_clock_style(),
            ButtonAction::ResetOil => {
                self.oil.reset(now_ts);
            }
            _ => {
                if self.router.navigate(action) && self.router.current_page() == Page::Oil {
                    self.oil.reload(now_ts);
                }
            }
        }
    }

    /// Draw the current page onto the logical canvas and keep its regions
    pub fn render(&mut self, now: DateTime<Local>) {
        let ts = now.timestamp();
        if self.last_sample != Some(ts) {
            self.readings = self.sensors.read();
            self.report = self.weather.report(self.settings.temperature_unit);
            self.last_sample = Some(ts);
        }

        let ctx = PageContext {
            page: self.router.current_page(),
            settings: &self.settings,
            oil_days: self.oil.days_elapsed(ts),
            readings: &self.readings,
            weather: &self.report,
            local: now.naive_local(),
            title: &self.title,
            logo: &self.logo,
        };
        let regions = match render_page(&mut self.canvas, &ctx) {
            Ok(regions) => regions,
            Err(e) => match e {},
        };
        self.router.set_regions(regions);
    }

    pub fn dim_factor(&self, now: DateTime<Local>) -> f32 {
        dim_factor(&self.settings, now.time())
    }

    /// Upscale the canvas into `frame` and dim it
    pub fn present(&self, now: DateTime<Local>, frame: &mut Frame) {
        frame.compose(&self.canvas, overlay_alpha(self.dim_factor(now)));
    }

    /// One frame: events, render, present
    pub fn step<I>(&mut self, events: I, mapper: &InputMapper, now: DateTime<Local>, frame: &mut Frame) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.handle(event, mapper, now) == Flow::Quit {
                return Flow::Quit;
            }
        }
        self.render(now);
        self.present(now, frame);
        Flow::Continue
    }
}
