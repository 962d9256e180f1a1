/*
 *  display/factory.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Backend selection and the polled frame loop
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

use chrono::Local;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::dashboard::{Dashboard, Flow};
use crate::display::drivers::headless::HeadlessBackend;
use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::input::InputMapper;
use crate::display::layout::logical_size;
use crate::display::traits::Backend;
use crate::pacer::Pacer;

#[cfg(target_os = "linux")]
use crate::display::drivers::fbdev::FramebufferBackend;

#[cfg(feature = "window")]
use crate::display::drivers::window::WindowBackend;

/// Backends in the order they may be probed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Window,
    Framebuffer,
    Headless,
}

/// Type alias for boxed polled backends
pub type BoxedBackend = Box<dyn Backend>;

/// What probing produced
pub enum Opened {
    #[cfg(feature = "window")]
    Window(WindowBackend),
    Polled(BoxedBackend),
}

fn open_framebuffer(config: &DisplayConfig) -> Result<BoxedBackend, DisplayError> {
    #[cfg(target_os = "linux")]
    {
        let fb = FramebufferBackend::open(&config.framebuffer(), config.touch_device.as_deref())?;
        Ok(Box::new(fb))
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = config;
        Err(DisplayError::Unavailable("framebuffer"))
    }
}

fn open_headless(config: &DisplayConfig) -> BoxedBackend {
    let (w, h) = config.window_size();
    Box::new(HeadlessBackend::new(
        embedded_graphics::prelude::Size::new(w, h),
        config.headless_frames,
    ))
}

/// Open one backend. `title` captions the window, if one is made.
pub fn open(kind: BackendKind, config: &DisplayConfig, title: &str) -> Result<Opened, DisplayError> {
    match kind {
        BackendKind::Window => {
            #[cfg(feature = "window")]
            {
                WindowBackend::open(config, title).map(Opened::Window)
            }
            #[cfg(not(feature = "window"))]
            {
                let _ = title;
                Err(DisplayError::Unavailable("window"))
            }
        }
        BackendKind::Framebuffer => open_framebuffer(config).map(Opened::Polled),
        BackendKind::Headless => Ok(Opened::Polled(open_headless(config))),
    }
}

/// Try each configured backend in turn. Headless is the last resort even
/// when the configuration leaves it out.
pub fn probe(config: &DisplayConfig, title: &str) -> Opened {
    for kind in config.backends() {
        match open(kind, config, title) {
            Ok(opened) => {
                info!("Display backend: {:?}", kind);
                return opened;
            }
            Err(e) => warn!("{:?} backend unavailable: {}", kind, e),
        }
    }
    warn!("Falling back to headless display");
    Opened::Polled(open_headless(config))
}

/// Drive a polled backend until it finishes, the user quits, or
/// `max_frames` frames have been shown
pub fn run_polled(
    backend: &mut dyn Backend,
    dashboard: &mut Dashboard,
    fps: u32,
    max_frames: Option<u64>,
) -> Result<u64, DisplayError> {
    let size = backend.physical_size();
    let mapper = InputMapper::new(logical_size(), size);
    let mut frame = Frame::new(size);
    let mut pacer = Pacer::new(fps);
    let mut frames = 0u64;

    info!("Frame loop on {} at {} fps", backend.name(), fps);
    while !backend.finished() && max_frames.is_none_or(|max| frames < max) {
        let events = backend.poll_events();
        let flow = dashboard.step(events, &mapper, Local::now(), &mut frame);
        if flow == Flow::Quit {
            info!("Quit requested");
            break;
        }
        backend.present(&frame)?;
        frames += 1;
        pacer.wait();
    }
    Ok(frames)
}

/// Open the best backend and run the dashboard on it
pub fn run(mut dashboard: Dashboard, config: &DisplayConfig) -> Result<(), DisplayError> {
    match probe(config, dashboard.title()) {
        #[cfg(feature = "window")]
        Opened::Window(window) => window.run(dashboard, config.fps()),
        Opened::Polled(mut backend) => {
            let frames = run_polled(backend.as_mut(), &mut dashboard, config.fps(), None)?;
            info!("Stopped after {} frames", frames);
            Ok(())
        }
    }
}
