/*
 *  dimming.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Night dimming and brightness overlay
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

use chrono::{NaiveTime, Timelike};
use crate::settings::Settings;

/// Base multiplier inside the night window
pub const NIGHT_DIM: f32 = 0.6;

/// Night runs from 20:00 to 06:30 local
const NIGHT_START_MINS: u32 = 20 * 60;
const NIGHT_END_MINS: u32 = 6 * 60 + 30;

pub fn is_night(local: NaiveTime) -> bool {
    let mins = local.hour() * 60 + local.minute();
    mins >= NIGHT_START_MINS || mins < NIGHT_END_MINS
}

/// Effective brightness multiplier in 0.0..=1.0
pub fn dim_factor(settings: &Settings, local: NaiveTime) -> f32 {
    let base = if settings.auto_night && is_night(local) {
        NIGHT_DIM
    } else {
        1.0
    };
    base * (settings.brightness() as f32 / 100.0)
}

/// Alpha of the black layer composited over the frame
pub fn overlay_alpha(factor: f32) -> u8 {
    ((1.0 - factor.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Composite a black layer of `alpha` over an RGBA frame in place.
/// Colours are never touched at draw time, only here.
pub fn apply_overlay(frame: &mut [u8], alpha: u8) {
    if alpha == 0 {
        return;
    }
    let keep = 255 - alpha as u32;
    for px in frame.chunks_exact_mut(4) {
        px[0] = ((px[0] as u32 * keep + 127) / 255) as u8;
        px[1] = ((px[1] as u32 * keep + 127) / 255) as u8;
        px[2] = ((px[2] as u32 * keep + 127) / 255) as u8;
    }
}
