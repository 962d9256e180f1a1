/*
 *  settings.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory user settings and unit formatting
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

use log::info;
use serde::{Deserialize, Serialize};

/// Miles to kilometres
const KM_PER_MILE: f64 = 1.609344;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    F,
    C,
}

impl TemperatureUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnit::F => "°F",
            TemperatureUnit::C => "°C",
        }
    }

    fn toggled(self) -> Self {
        match self {
            TemperatureUnit::F => TemperatureUnit::C,
            TemperatureUnit::C => TemperatureUnit::F,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    Mph,
    Kmh,
}

impl SpeedUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            SpeedUnit::Mph => "MPH",
            SpeedUnit::Kmh => "KM/H",
        }
    }

    fn toggled(self) -> Self {
        match self {
            SpeedUnit::Mph => SpeedUnit::Kmh,
            SpeedUnit::Kmh => SpeedUnit::Mph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockStyle {
    Digital,
    Analog,
}

impl ClockStyle {
    pub fn label(self) -> &'static str {
        match self {
            ClockStyle::Digital => "DIGITAL",
            ClockStyle::Analog => "ANALOG",
        }
    }

    fn toggled(self) -> Self {
        match self {
            ClockStyle::Digital => ClockStyle::Analog,
            ClockStyle::Analog => ClockStyle::Digital,
        }
    }
}

/// User settings. Lives for the process only, every run starts from defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub temperature_unit: TemperatureUnit,
    pub speed_unit: SpeedUnit,
    pub auto_night: bool,
    pub clock_style: ClockStyle,
    /// 0-100 percent
    brightness: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::F,
            speed_unit: SpeedUnit::Mph,
            auto_night: true,
            clock_style: ClockStyle::Digital,
            brightness: 100,
        }
    }
}

impl Settings {
    pub fn new(
        temperature_unit: TemperatureUnit,
        speed_unit: SpeedUnit,
        auto_night: bool,
        clock_style: ClockStyle,
        brightness: u8,
    ) -> Self {
        Self {
            temperature_unit,
            speed_unit,
            auto_night,
            clock_style,
            brightness: brightness.min(100),
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set brightness percent, values above 100 are clamped
    pub fn set_brightness(&mut self, percent: u8) {
        let percent = percent.min(100);
        if percent != self.brightness {
            log::debug!("Brightness {} -> {}", self.brightness, percent);
            self.brightness = percent;
        }
    }

    pub fn toggle_temperature_unit(&mut self) {
        self.temperature_unit = self.temperature_unit.toggled();
        info!("Temperature unit: {:?}", self.temperature_unit);
    }

    pub fn toggle_speed_unit(&mut self) {
        self.speed_unit = self.speed_unit.toggled();
        info!("Speed unit: {:?}", self.speed_unit);
    }

    pub fn toggle_auto_night(&mut self) {
        self.auto_night = !self.auto_night;
        info!("Auto night: {}", if self.auto_night { "ON" } else { "OFF" });
    }

    pub fn toggle_clock_style(&mut self) {
        self.clock_style = self.clock_style.toggled();
        info!("Clock style: {:?}", self.clock_style);
    }
}

/// Fahrenheit reading converted to the display unit
pub fn temp_value(fahrenheit: i32, unit: TemperatureUnit) -> i32 {
    match unit {
        TemperatureUnit::F => fahrenheit,
        TemperatureUnit::C => ((fahrenheit - 32) as f64 * 5.0 / 9.0).round() as i32,
    }
}

/// e.g. "82°F" or "28°C"
pub fn temp_display(fahrenheit: i32, unit: TemperatureUnit) -> String {
    format!("{}{}", temp_value(fahrenheit, unit), unit.suffix())
}

pub fn speed_value(mph: u32, unit: SpeedUnit) -> u32 {
    match unit {
        SpeedUnit::Mph => mph,
        SpeedUnit::Kmh => (mph as f64 * KM_PER_MILE).round() as u32,
    }
}

pub fn speed_display(mph: u32, unit: SpeedUnit) -> String {
    format!("{} {}", speed_value(mph, unit), unit.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_display_celsius() {
        for f in [-40, 0, 32, 50, 82, 98, 195, 212, 451] {
            let expected = ((f - 32) as f64 * 5.0 / 9.0).round() as i32;
            assert_eq!(temp_display(f, TemperatureUnit::C), format!("{}°C", expected));
        }
        assert_eq!(temp_display(212, TemperatureUnit::C), "100°C");
        assert_eq!(temp_display(82, TemperatureUnit::C), "28°C");
        assert_eq!(temp_display(-40, TemperatureUnit::C), "-40°C");
    }

    #[test]
    fn test_temp_display_fahrenheit_passthrough() {
        for f in [-40, 0, 82, 210] {
            assert_eq!(temp_display(f, TemperatureUnit::F), format!("{}°F", f));
        }
    }

    #[test]
    fn test_speed_display() {
        assert_eq!(speed_display(38, SpeedUnit::Mph), "38 MPH");
        assert_eq!(speed_display(38, SpeedUnit::Kmh), "61 KM/H");
        assert_eq!(speed_display(0, SpeedUnit::Kmh), "0 KM/H");
    }

    #[test]
    fn test_toggles_flip_back() {
        let mut s = Settings::default();
        s.toggle_temperature_unit();
        assert_eq!(s.temperature_unit, TemperatureUnit::C);
        s.toggle_temperature_unit();
        assert_eq!(s.temperature_unit, TemperatureUnit::F);

        s.toggle_speed_unit();
        assert_eq!(s.speed_unit, SpeedUnit::Kmh);

        let night = s.auto_night;
        s.toggle_auto_night();
        assert_eq!(s.auto_night, !night);

        s.toggle_clock_style();
        assert_eq!(s.clock_style, ClockStyle::Analog);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut s = Settings::default();
        s.set_brightness(250);
        assert_eq!(s.brightness(), 100);
        s.set_brightness(35);
        assert_eq!(s.brightness(), 35);
        assert_eq!(Settings::new(TemperatureUnit::F, SpeedUnit::Mph, false, ClockStyle::Digital, 180).brightness(), 100);
    }
}
