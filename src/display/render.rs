/*
 *  display/render.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Page renderer. Each page is drawn from scratch every frame and hands
 *  back the button regions it painted; nothing is remembered between
 *  frames.
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

use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;

use super::button::{ButtonAction, ButtonRegion};
use super::components::{format_date, format_time_12h, AnalogClock, StatusBar};
use super::layout::*;
use super::page::{Page, Slider};
use crate::draw::{
    draw_button, draw_dashed_rule, draw_menu_row, draw_rect_with_style, draw_text,
    draw_text_align,
};
use crate::sensors::{battery_status, Readings};
use crate::settings::{speed_display, temp_display, ClockStyle, Settings};
use crate::svgimage::Logo;
use crate::weather::WeatherReport;

/// Everything a page may draw from
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub page: Page,
    pub settings: &'a Settings,
    pub oil_days: i64,
    pub readings: &'a Readings,
    pub weather: &'a WeatherReport,
    pub local: NaiveDateTime,
    pub title: &'a str,
    pub logo: &'a Logo,
}

/// Clear the canvas, draw the page and return its button regions
pub fn render_page<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    target.clear(BACKGROUND)?;
    match ctx.page {
        Page::Home => draw_home(target, ctx),
        Page::Volt => draw_volt(target, ctx),
        Page::Oil => draw_oil(target, ctx),
        Page::Temp => draw_temp(target, ctx),
        Page::Menu => draw_menu(target, ctx),
        Page::Brightness(slider) => draw_brightness(target, ctx, &slider),
    }
}

/// Bottom navigation bar, buttons evenly spaced left to right
fn draw_nav<D>(target: &mut D, items: &[(&str, ButtonAction)]) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    nav_slots(items.len())
        .into_iter()
        .zip(items)
        .map(|(bounds, (label, action))| draw_button(target, label, bounds, *action, FONT_LABEL, AMBER))
        .collect()
}

const VALUE_PAGE_NAV: [(&str, ButtonAction); 3] = [
    ("HOME", ButtonAction::Home),
    ("BACK", ButtonAction::Back),
    ("MENU", ButtonAction::Menu),
];

const SETTINGS_PAGE_NAV: [(&str, ButtonAction); 2] = [
    ("HOME", ButtonAction::Home),
    ("BACK", ButtonAction::Back),
];

fn content_width() -> u32 {
    LOGICAL_WIDTH - 2 * MARGIN as u32
}

/// Label on the left, value right-aligned on the same line
fn draw_value_line<D>(target: &mut D, label: &str, value: &str, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let row = Rectangle::new(Point::new(MARGIN + 8, y), Size::new(content_width() - 16, 24));
    draw_text_align(target, label, row, Alignment::Left, FONT_BODY, AMBER_DIM)?;
    draw_text_align(target, value, row, Alignment::Right, FONT_VALUE, AMBER)
}

fn draw_home<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    ctx.logo.draw(target, LOGO_ORIGIN)?;
    draw_text(target, ctx.title, HOME_TITLE.x, HOME_TITLE.y, FONT_TITLE, AMBER)?;
    draw_dashed_rule(target, MARGIN, LOGICAL_WIDTH as i32 - MARGIN, HOME_RULE_Y, 6, 4, AMBER_DIM)?;

    let date = format!("DATE  {}", format_date(ctx.local.date()));
    match ctx.settings.clock_style {
        ClockStyle::Digital => {
            let time = format!("TIME  {}", format_time_12h(ctx.local.time()));
            draw_text(target, &time, 16, 66, FONT_VALUE, AMBER)?;
            draw_text(target, &date, 16, 90, FONT_BODY, AMBER)?;
        }
        ClockStyle::Analog => {
            AnalogClock::new(ANALOG_CENTER, ANALOG_RADIUS).draw(target, ctx.local.time(), AMBER, AMBER_DIM)?;
            draw_text(target, &date, 16, 70, FONT_BODY, AMBER)?;
        }
    }

    draw_text(target, "WEATHER", 16, 116, FONT_LABEL, AMBER_DIM)?;
    for (i, (_, value)) in ctx.weather.iter().take(3).enumerate() {
        draw_text(target, value, 16, 134 + 16 * i as i32, FONT_BODY, AMBER)?;
    }

    let speed = format!("AVG SPD {}", speed_display(ctx.readings.avg_speed_mph, ctx.settings.speed_unit));
    draw_text(target, &speed, 16, 184, FONT_BODY, AMBER)?;
    let outside = Rectangle::new(Point::new(MARGIN, 184), Size::new(content_width(), 15));
    let out = format!("OUT {}", temp_display(ctx.readings.outside_temp_f, ctx.settings.temperature_unit));
    draw_text_align(target, &out, outside, Alignment::Right, FONT_BODY, AMBER)?;

    draw_nav(
        target,
        &[
            ("VOLT", ButtonAction::Volt),
            ("OIL", ButtonAction::Oil),
            ("TEMP", ButtonAction::Temp),
            ("MENU", ButtonAction::Menu),
        ],
    )
}

fn draw_volt<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    StatusBar::new("BATTERY", ctx.local.time()).render(target, AMBER)?;

    let volts = ctx.readings.battery_volts;
    let value_area = Rectangle::new(Point::new(MARGIN, 70), Size::new(content_width(), 30));
    draw_text_align(target, &format!("{:.1} V", volts), value_area, Alignment::Center, FONT_VALUE, AMBER)?;
    let status_area = Rectangle::new(Point::new(MARGIN, 110), Size::new(content_width(), 20));
    draw_text_align(target, battery_status(volts), status_area, Alignment::Center, FONT_BODY_BOLD, AMBER_DIM)?;

    draw_nav(target, &VALUE_PAGE_NAV)
}

fn draw_oil<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    StatusBar::new("OIL SERVICE", ctx.local.time()).render(target, AMBER)?;

    let days = match ctx.oil_days {
        1 => "1 DAY".to_string(),
        n => format!("{} DAYS", n),
    };
    draw_text(target, "SINCE LAST CHANGE", 16, 48, FONT_LABEL, AMBER_DIM)?;
    draw_text(target, &days, 16, 66, FONT_VALUE, AMBER)?;

    draw_text(target, "OIL TEMP", 16, 110, FONT_LABEL, AMBER_DIM)?;
    let temp = temp_display(ctx.readings.oil_temp_f, ctx.settings.temperature_unit);
    draw_text(target, &temp, 16, 128, FONT_VALUE, AMBER)?;

    let mut regions = vec![draw_button(target, "RESET", OIL_RESET, ButtonAction::ResetOil, FONT_LABEL, AMBER)?];
    regions.extend(draw_nav(target, &VALUE_PAGE_NAV)?);
    Ok(regions)
}

fn draw_temp<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    StatusBar::new("TEMPERATURES", ctx.local.time()).render(target, AMBER)?;

    let unit = ctx.settings.temperature_unit;
    let r = ctx.readings;
    let rows = [
        ("COOLANT", r.coolant_temp_f),
        ("OIL", r.oil_temp_f),
        ("OUTSIDE", r.outside_temp_f),
        ("INTAKE", r.intake_temp_f),
    ];
    for (i, (label, f)) in rows.iter().enumerate() {
        draw_value_line(target, label, &temp_display(*f, unit), CONTENT_TOP + 8 + 36 * i as i32)?;
    }

    draw_nav(target, &VALUE_PAGE_NAV)
}

fn draw_menu<D>(target: &mut D, ctx: &PageContext) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    StatusBar::new("SETTINGS", ctx.local.time()).render(target, AMBER)?;

    let s = ctx.settings;
    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    let brightness = format!("{}%", s.brightness());
    let rows = [
        ("TEMP UNIT", s.temperature_unit.suffix(), ButtonAction::ToggleTemperatureUnit),
        ("SPEED UNIT", s.speed_unit.suffix(), ButtonAction::ToggleSpeedUnit),
        ("AUTO NIGHT", on_off(s.auto_night), ButtonAction::ToggleAutoNight),
        ("CLOCK", s.clock_style.label(), ButtonAction::ToggleClockStyle),
        ("BRIGHTNESS", brightness.as_str(), ButtonAction::Brightness),
    ];

    let mut regions = Vec::with_capacity(rows.len() + SETTINGS_PAGE_NAV.len());
    for (i, (label, value, action)) in rows.into_iter().enumerate() {
        regions.push(draw_menu_row(target, label, value, menu_row(i), action, FONT_BODY, AMBER)?);
    }
    regions.extend(draw_nav(target, &SETTINGS_PAGE_NAV)?);
    Ok(regions)
}

fn draw_brightness<D>(target: &mut D, ctx: &PageContext, slider: &Slider) -> Result<Vec<ButtonRegion>, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    StatusBar::new("BRIGHTNESS", ctx.local.time()).render(target, AMBER)?;

    let level = ctx.settings.brightness();
    let value_area = Rectangle::new(Point::new(MARGIN, 60), Size::new(content_width(), 30));
    draw_text_align(target, &format!("{}%", level), value_area, Alignment::Center, FONT_VALUE, AMBER)?;

    let bar = slider.bar;
    let fill = Rectangle::new(bar.top_left, Size::new(slider.fill_width(level), bar.size.height));
    draw_rect_with_style(target, fill, PrimitiveStyle::with_fill(AMBER_DIM))?;
    draw_rect_with_style(target, bar, PrimitiveStyle::with_stroke(AMBER, 2))?;

    draw_text(target, "0", bar.top_left.x, bar.top_left.y + bar.size.height as i32 + 6, FONT_SMALL, AMBER_DIM)?;
    let end = Rectangle::new(
        Point::new(bar.top_left.x, bar.top_left.y + bar.size.height as i32 + 6),
        Size::new(bar.size.width, 10),
    );
    draw_text_align(target, "100", end, Alignment::Right, FONT_SMALL, AMBER_DIM)?;

    draw_nav(target, &SETTINGS_PAGE_NAV)
}
