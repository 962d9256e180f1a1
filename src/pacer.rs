/*
 *  pacer.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed-rate frame pacing
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
use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 30;

pub struct Pacer {
    next_deadline: Instant,
    frame: Duration,
}

impl Pacer {
    pub fn new(target_fps: u32) -> Self {
        Self { next_deadline: Instant::now(), frame: Self::frame_for(target_fps) }
    }

    #[inline]
    fn frame_for(fps: u32) -> Duration {
        Duration::from_micros((1_000_000u32 / fps.max(1)) as u64)
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// Returns true if a frame is due; if so the next deadline is scheduled.
    #[inline]
    pub fn should_flush(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next_deadline {
            self.next_deadline = now + self.frame;
            true
        } else {
            false
        }
    }

    /// Block until the next frame is due (loops that own their own thread)
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
        }
        // don't try to catch up after a long stall
        self.next_deadline = Instant::now().max(self.next_deadline) + self.frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(Pacer::new(30).frame(), Duration::from_micros(33_333));
        assert_eq!(Pacer::new(0).frame(), Duration::from_secs(1));
    }

    #[test]
    fn test_should_flush_schedules_next() {
        let mut pacer = Pacer::new(1);
        assert!(pacer.should_flush());
        assert!(!pacer.should_flush());
    }
}
