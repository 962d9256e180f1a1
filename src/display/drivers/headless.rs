/*
 *  display/drivers/headless.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Offscreen backend: always available, keeps the last frame in memory
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

use std::collections::VecDeque;

use embedded_graphics::prelude::*;

use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::input::InputEvent;
use crate::display::traits::Backend;

/// Headless backend
///
/// Nothing is shown anywhere. Useful for:
/// - running without any display attached
/// - integration tests, which script input through `push_event`
///
/// Each `poll_events` hands out the events queued for the next frame.
#[derive(Debug)]
pub struct HeadlessBackend {
    size: Size,
    /// Per-frame event batches
    script: VecDeque<Vec<InputEvent>>,
    last_frame: Option<Frame>,
    frames: u64,
    max_frames: Option<u64>,
}

impl HeadlessBackend {
    pub fn new(size: Size, max_frames: Option<u64>) -> Self {
        Self {
            size,
            script: VecDeque::new(),
            last_frame: None,
            frames: 0,
            max_frames,
        }
    }

    /// Queue an event for delivery on its own frame
    pub fn push_event(&mut self, event: InputEvent) {
        self.script.push_back(vec![event]);
    }

    /// Queue several events delivered together on one frame
    pub fn push_batch(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(events);
    }

    pub fn pending(&self) -> usize {
        self.script.len()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl Backend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn physical_size(&self) -> Size {
        self.size
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.script.pop_front().unwrap_or_default()
    }

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if frame.size() != self.size {
            return Err(DisplayError::BufferSizeMismatch {
                expected: (self.size.width * self.size.height * 4) as usize,
                actual: frame.rgba().len(),
            });
        }
        match self.last_frame.as_mut() {
            Some(last) => last.clone_from(frame),
            None => self.last_frame = Some(frame.clone()),
        }
        self.frames += 1;
        Ok(())
    }

    fn finished(&self) -> bool {
        self.max_frames.is_some_and(|max| self.frames >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_events() {
        let mut b = HeadlessBackend::new(Size::new(4, 4), None);
        b.push_event(InputEvent::Tap(Point::new(1, 1)));
        b.push_batch(vec![InputEvent::Drag(Point::new(2, 2)), InputEvent::Quit]);
        assert_eq!(b.pending(), 2);
        assert_eq!(b.poll_events(), vec![InputEvent::Tap(Point::new(1, 1))]);
        assert_eq!(b.poll_events().len(), 2);
        assert!(b.poll_events().is_empty());
    }

    #[test]
    fn test_frame_limit() {
        let mut b = HeadlessBackend::new(Size::new(4, 4), Some(2));
        let frame = Frame::new(Size::new(4, 4));
        assert!(!b.finished());
        b.present(&frame).unwrap();
        b.present(&frame).unwrap();
        assert!(b.finished());
        assert_eq!(b.frames_presented(), 2);
        assert!(b.last_frame().is_some());
    }

    #[test]
    fn test_size_mismatch() {
        let mut b = HeadlessBackend::new(Size::new(4, 4), None);
        let frame = Frame::new(Size::new(2, 2));
        assert!(matches!(b.present(&frame), Err(DisplayError::BufferSizeMismatch { .. })));
    }
}
