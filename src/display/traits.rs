/*
 *  display/traits.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display backend abstraction
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

use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::input::InputEvent;

/// A polled display backend: the frame loop asks it for input, then hands
/// it a finished physical frame.
///
/// The desktop window is not one of these; winit owns its own event loop.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Physical resolution frames must be composed at
    fn physical_size(&self) -> Size;

    /// Input gathered since the last call, physical coordinates
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Show a frame of `physical_size()`
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// True once the backend wants the loop to stop
    fn finished(&self) -> bool {
        false
    }
}
