/*
 *  display/drivers/window.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop / KMS window backend via pixels + winit
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
use embedded_graphics::prelude::*;
use log::{error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::{
    dpi::PhysicalSize,
    event::{Event, TouchPhase, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowBuilder},
};
use winit_input_helper::WinitInputHelper;

use crate::config::DisplayConfig;
use crate::dashboard::{Dashboard, Flow};
use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::input::{InputEvent, InputMapper};
use crate::display::layout::logical_size;
use crate::pacer::Pacer;

const BACKEND: &str = "window";

/// An opened window, ready to take over the main thread
pub struct WindowBackend {
    event_loop: EventLoop<()>,
    window: Window,
    pixels: Pixels,
    size: Size,
}

/// winit panics rather than erroring when there is no display server
#[cfg(all(unix, not(target_os = "macos")))]
fn display_server_present() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_server_present() -> bool {
    true
}

impl WindowBackend {
    pub fn open(config: &DisplayConfig, title: &str) -> Result<Self, DisplayError> {
        if !display_server_present() {
            return Err(DisplayError::init(BACKEND, "no DISPLAY or WAYLAND_DISPLAY"));
        }

        let event_loop = EventLoop::new();
        let (w, h) = config.window_size();
        let mut builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(w, h))
            .with_resizable(true);
        if config.fullscreen() {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        let window = builder
            .build(&event_loop)
            .map_err(|e| DisplayError::init(BACKEND, e))?;

        let inner = window.inner_size();
        let surface_texture = SurfaceTexture::new(inner.width, inner.height, &window);
        let pixels = Pixels::new(inner.width, inner.height, surface_texture)
            .map_err(|e| DisplayError::init(BACKEND, e))?;

        info!(
            "Window {}x{}{}",
            inner.width,
            inner.height,
            if config.fullscreen() { " fullscreen" } else { "" }
        );
        Ok(Self {
            event_loop,
            window,
            pixels,
            size: Size::new(inner.width, inner.height),
        })
    }

    /// Hand the main thread to winit. Never returns; the process exits
    /// when the window closes or Escape / Q is pressed.
    pub fn run(self, mut dashboard: Dashboard, fps: u32) -> ! {
        let WindowBackend { event_loop, window, mut pixels, size } = self;
        let mut input = WinitInputHelper::new();
        let mut pacer = Pacer::new(fps);
        let mut mapper = InputMapper::new(logical_size(), size);
        let mut frame = Frame::new(size);
        let mut pending: Vec<InputEvent> = Vec::new();

        event_loop.run(move |event, _, control_flow| {
            // touch screens report through winit directly
            if let Event::WindowEvent { event: WindowEvent::Touch(touch), .. } = &event {
                let p = Point::new(touch.location.x as i32, touch.location.y as i32);
                match touch.phase {
                    TouchPhase::Started => pending.push(InputEvent::Tap(p)),
                    TouchPhase::Moved => pending.push(InputEvent::Drag(p)),
                    TouchPhase::Ended | TouchPhase::Cancelled => {}
                }
            }

            if let Event::RedrawRequested(_) = event {
                let flow = dashboard.step(pending.drain(..), &mapper, Local::now(), &mut frame);
                if let Err(err) = frame.copy_to(pixels.frame_mut()) {
                    error!("Frame not shown: {}", err);
                }
                if let Err(err) = pixels.render() {
                    error!("pixels.render() failed: {}", err);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if flow == Flow::Quit {
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            if input.update(&event) {
                if input.close_requested()
                    || input.key_pressed(VirtualKeyCode::Escape)
                    || input.key_pressed(VirtualKeyCode::Q)
                {
                    pending.push(InputEvent::Quit);
                }

                if let Some((x, y)) = input.mouse() {
                    let p = Point::new(x as i32, y as i32);
                    if input.mouse_pressed(0) {
                        pending.push(InputEvent::Tap(p));
                    } else if input.mouse_held(0) && input.mouse_diff() != (0.0, 0.0) {
                        pending.push(InputEvent::Drag(p));
                    }
                }

                if let Some(resized) = input.window_resized() {
                    if resized.width > 0 && resized.height > 0 {
                        if let Err(err) = pixels.resize_surface(resized.width, resized.height) {
                            error!("resize_surface failed: {}", err);
                        }
                        // frame and mapper follow the pixel buffer, not the window
                        match pixels.resize_buffer(resized.width, resized.height) {
                            Ok(()) => {
                                let physical = Size::new(resized.width, resized.height);
                                frame.resize(physical);
                                mapper.set_physical(physical);
                                info!("Window resized to {}x{}", resized.width, resized.height);
                            }
                            Err(err) => error!("resize_buffer failed: {}", err),
                        }
                    }
                }

                // quit must go through a redraw so it is handled in order
                if pacer.should_flush() || pending.contains(&InputEvent::Quit) {
                    window.request_redraw();
                }
                *control_flow = ControlFlow::WaitUntil(pacer.next_deadline());
            }
        })
    }
}
