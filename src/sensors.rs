/*
 *  sensors.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Vehicle readings shown on the value pages
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

use rand::Rng;

/// One sample of every value the pages display. Temperatures in °F,
/// speed in MPH; unit conversion happens at draw time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub battery_volts: f32,
    pub oil_temp_f: i32,
    pub coolant_temp_f: i32,
    pub outside_temp_f: i32,
    pub intake_temp_f: i32,
    pub avg_speed_mph: u32,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            battery_volts: 14.1,
            oil_temp_f: 210,
            coolant_temp_f: 195,
            outside_temp_f: 82,
            intake_temp_f: 95,
            avg_speed_mph: 38,
        }
    }
}

/// Battery state shown under the voltage
pub fn battery_status(volts: f32) -> &'static str {
    if volts > 13.2 {
        "CHARGING"
    } else if volts >= 12.2 {
        "OK"
    } else {
        "LOW"
    }
}

pub trait SensorSource {
    fn read(&mut self) -> Readings;
}

/// Fixed readings with optional random wobble, until real hardware is wired in
#[derive(Debug, Clone)]
pub struct FakeSensors {
    base: Readings,
    jitter: bool,
}

impl FakeSensors {
    pub fn new(jitter: bool) -> Self {
        Self { base: Readings::default(), jitter }
    }

    pub fn with_base(base: Readings, jitter: bool) -> Self {
        Self { base, jitter }
    }
}

impl SensorSource for FakeSensors {
    fn read(&mut self) -> Readings {
        if !self.jitter {
            return self.base;
        }
        let mut rng = rand::rng();
        let b = self.base;
        Readings {
            battery_volts: ((b.battery_volts + rng.random_range(-0.1..=0.1)) * 10.0).round() / 10.0,
            oil_temp_f: b.oil_temp_f + rng.random_range(-2..=2),
            coolant_temp_f: b.coolant_temp_f + rng.random_range(-1..=1),
            outside_temp_f: b.outside_temp_f,
            intake_temp_f: b.intake_temp_f + rng.random_range(-1..=1),
            avg_speed_mph: b.avg_speed_mph.saturating_add_signed(rng.random_range(-1..=1)),
        }
    }
}
