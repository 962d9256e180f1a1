/*
 *  weather.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather block on the home page. The provider is a trait so a live
 *  feed can replace the configured stub without touching the renderer.
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

use serde::{Deserialize, Serialize};

use crate::settings::{temp_display, temp_value, TemperatureUnit};

pub const DEFAULT_CITY: &str = "NASHVILLE";
pub const DEFAULT_CONDITION: &str = "CLOUDY";

/// Ordered label -> value pairs, drawn top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherReport {
    entries: Vec<(String, String)>,
}

impl WeatherReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, label: &str, value: impl Into<String>) -> Self {
        self.entries.push((label.to_string(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Source of current conditions, temperatures shown in `unit`
pub trait WeatherProvider {
    fn report(&self, unit: TemperatureUnit) -> WeatherReport;
}

/// Configured fake conditions. Temperatures are held in °F like the
/// sensor readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubWeather {
    pub city: String,
    pub temp_f: i32,
    pub condition: String,
    pub high_f: i32,
    pub low_f: i32,
    /// chance of precipitation, percent
    pub pop: u8,
}

impl Default for StubWeather {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            temp_f: 82,
            condition: DEFAULT_CONDITION.to_string(),
            high_f: 88,
            low_f: 71,
            pop: 30,
        }
    }
}

impl WeatherProvider for StubWeather {
    fn report(&self, unit: TemperatureUnit) -> WeatherReport {
        WeatherReport::new()
            .with("city", self.city.as_str())
            .with("now", format!("{} {}", temp_display(self.temp_f, unit), self.condition))
            .with(
                "hilo",
                format!(
                    "H{} L{} POP{}%",
                    temp_value(self.high_f, unit),
                    temp_value(self.low_f, unit),
                    self.pop
                ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_report_order() {
        let report = StubWeather::default().report(TemperatureUnit::F);
        let labels: Vec<&str> = report.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["city", "now", "hilo"]);
        assert_eq!(report.get("city"), Some("NASHVILLE"));
        assert_eq!(report.get("now"), Some("82°F CLOUDY"));
        assert_eq!(report.get("hilo"), Some("H88 L71 POP30%"));
        assert_eq!(report.get("wind"), None);
    }

    #[test]
    fn test_celsius_follows_unit() {
        let report = StubWeather::default().report(TemperatureUnit::C);
        assert_eq!(report.get("now"), Some("28°C CLOUDY"));
        assert_eq!(report.get("hilo"), Some("H31 L22 POP30%"));
    }

    #[test]
    fn test_configured_values() {
        let stub = StubWeather {
            city: "LEEDS".into(),
            temp_f: 52,
            condition: "RAIN".into(),
            high_f: 55,
            low_f: 45,
            pop: 80,
        };
        assert_eq!(stub.report(TemperatureUnit::C).get("now"), Some("11°C RAIN"));
        assert_eq!(stub.report(TemperatureUnit::F).get("hilo"), Some("H55 L45 POP80%"));
        assert!(WeatherReport::new().is_empty());
    }
}
