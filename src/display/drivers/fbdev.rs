/*
 *  display/drivers/fbdev.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Linux framebuffer backend (/dev/fbN) with optional evdev touch input
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

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use embedded_graphics::prelude::*;
use log::{debug, info, warn};
use memmap2::{MmapMut, MmapOptions};

use crate::display::error::DisplayError;
use crate::display::framebuffer::Frame;
use crate::display::input::InputEvent;
use crate::display::traits::Backend;

// evdev event types and codes, linux/input-event-codes.h
const EV_SYN: u16 = 0x00;
const EV_KEY: u16 = 0x01;
const EV_ABS: u16 = 0x03;
const SYN_REPORT: u16 = 0x00;
const BTN_LEFT: u16 = 0x110;
const BTN_TOUCH: u16 = 0x14a;
const ABS_X: u16 = 0x00;
const ABS_Y: u16 = 0x01;
const ABS_MT_POSITION_X: u16 = 0x35;
const ABS_MT_POSITION_Y: u16 = 0x36;

const BACKEND: &str = "framebuffer";

/// "800,480\n" -> (800, 480)
pub fn parse_virtual_size(input: &str) -> Option<(u32, u32)> {
    let (w, h) = input.trim().split_once(',')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

/// Visible resolution from the first line of sysfs `modes`,
/// e.g. "U:800x480p-60" -> (800, 480)
pub fn parse_mode(input: &str) -> Option<(u32, u32)> {
    let line = input.lines().next()?;
    let geometry = line.split_once(':').map_or(line, |(_, g)| g);
    let (w, rest) = geometry.split_once('x')?;
    let h: String = rest.chars().take_while(char::is_ascii_digit).collect();
    Some((w.trim().parse().ok()?, h.parse().ok()?))
}

fn read_sysfs(dir: &Path, name: &str) -> Option<String> {
    fs::read_to_string(dir.join(name)).ok()
}

/// Pack one RGBA row into the framebuffer pixel format
pub fn encode_row(rgba: &[u8], out: &mut [u8], bpp: u32) {
    match bpp {
        32 => {
            // XRGB8888, little endian in memory: B G R X
            for (src, dst) in rgba.chunks_exact(4).zip(out.chunks_exact_mut(4)) {
                dst.copy_from_slice(&[src[2], src[1], src[0], 0xff]);
            }
        }
        16 => {
            for (src, dst) in rgba.chunks_exact(4).zip(out.chunks_exact_mut(2)) {
                let rgb565: u16 = ((src[0] as u16 & 0xf8) << 8)
                    | ((src[1] as u16 & 0xfc) << 3)
                    | (src[2] as u16 >> 3);
                dst.copy_from_slice(&rgb565.to_le_bytes());
            }
        }
        _ => {}
    }
}

/// Turns raw evdev records into taps and drags, one per SYN_REPORT
#[derive(Debug, Default, Clone)]
pub struct TouchDecoder {
    x: i32,
    y: i32,
    down: bool,
    reported_down: bool,
    moved: bool,
}

impl TouchDecoder {
    pub fn feed(&mut self, kind: u16, code: u16, value: i32) -> Option<InputEvent> {
        match (kind, code) {
            (EV_ABS, ABS_X | ABS_MT_POSITION_X) => {
                self.moved |= self.x != value;
                self.x = value;
            }
            (EV_ABS, ABS_Y | ABS_MT_POSITION_Y) => {
                self.moved |= self.y != value;
                self.y = value;
            }
            (EV_KEY, BTN_TOUCH | BTN_LEFT) => self.down = value != 0,
            (EV_SYN, SYN_REPORT) => return self.sync(),
            _ => {}
        }
        None
    }

    fn sync(&mut self) -> Option<InputEvent> {
        let p = Point::new(self.x, self.y);
        let event = match (self.reported_down, self.down) {
            (false, true) => Some(InputEvent::Tap(p)),
            (true, true) if self.moved => Some(InputEvent::Drag(p)),
            _ => None,
        };
        self.reported_down = self.down;
        self.moved = false;
        event
    }
}

/// Nonblocking reader for one /dev/input/eventN device
#[derive(Debug)]
pub struct TouchInput {
    file: File,
    path: PathBuf,
    decoder: TouchDecoder,
    pending: Vec<u8>,
}

impl TouchInput {
    pub fn open(path: &Path) -> Result<Self, DisplayError> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)
            .map_err(|e| DisplayError::io(path, e))?;
        info!("Touch input: {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
            decoder: TouchDecoder::default(),
            pending: Vec::new(),
        })
    }

    pub fn poll(&mut self) -> Vec<InputEvent> {
        let record = std::mem::size_of::<libc::input_event>();
        let mut buf = [0u8; 1024];
        loop {
            match self.file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => self.pending.extend_from_slice(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("Touch read failed on {}: {}", self.path.display(), e);
                    break;
                }
            }
        }

        // type, code and value trail the timeval in each record
        let header = record - 8;
        let mut events = Vec::new();
        let whole = self.pending.len() / record * record;
        for rec in self.pending[..whole].chunks_exact(record) {
            let kind = u16::from_ne_bytes([rec[header], rec[header + 1]]);
            let code = u16::from_ne_bytes([rec[header + 2], rec[header + 3]]);
            let value = i32::from_ne_bytes([rec[header + 4], rec[header + 5], rec[header + 6], rec[header + 7]]);
            if let Some(ev) = self.decoder.feed(kind, code, value) {
                events.push(ev);
            }
        }
        self.pending.drain(..whole);
        events
    }
}

/// Memory-mapped framebuffer device
pub struct FramebufferBackend {
    map: MmapMut,
    width: u32,
    height: u32,
    bpp: u32,
    stride: usize,
    touch: Option<TouchInput>,
    row: Vec<u8>,
}

impl FramebufferBackend {
    /// Open `device` (e.g. /dev/fb0), reading its geometry from sysfs
    pub fn open(device: &Path, touch: Option<&Path>) -> Result<Self, DisplayError> {
        let name = device
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DisplayError::init(BACKEND, format!("bad device path {}", device.display())))?;
        let sysfs = Path::new("/sys/class/graphics").join(name);

        // virtual_size can be a multiple of the screen when double buffered,
        // the first panned page is what is visible
        let (width, height) = read_sysfs(&sysfs, "modes")
            .as_deref()
            .and_then(parse_mode)
            .or_else(|| read_sysfs(&sysfs, "virtual_size").as_deref().and_then(parse_virtual_size))
            .ok_or_else(|| DisplayError::init(BACKEND, format!("no geometry for {}", name)))?;
        let bpp: u32 = read_sysfs(&sysfs, "bits_per_pixel")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(32);
        if bpp != 16 && bpp != 32 {
            return Err(DisplayError::UnsupportedFormat(bpp));
        }
        let stride: usize = read_sysfs(&sysfs, "stride")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or((width * bpp / 8) as usize);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(device)
            .map_err(|e| DisplayError::io(device, e))?;
        let len = stride * height as usize;
        // SAFETY: the fb device stays open for the life of the mapping and
        // only this process writes through it
        let map = unsafe { MmapOptions::new().len(len).map_mut(&file) }
            .map_err(|e| DisplayError::io(device, e))?;

        let touch = touch.and_then(|p| match TouchInput::open(p) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("Touch disabled: {}", e);
                None
            }
        });

        info!("Framebuffer {} {}x{} @ {} bpp, stride {}", device.display(), width, height, bpp, stride);
        Ok(Self {
            map,
            width,
            height,
            bpp,
            stride,
            touch,
            row: vec![0; stride],
        })
    }
}

impl Backend for FramebufferBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn physical_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.touch.as_mut().map(TouchInput::poll).unwrap_or_default()
    }

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = (self.width * self.height * 4) as usize;
        if frame.rgba().len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: frame.rgba().len() });
        }
        let src_stride = self.width as usize * 4;
        for (y, src) in frame.rgba().chunks_exact(src_stride).enumerate() {
            encode_row(src, &mut self.row, self.bpp);
            let at = y * self.stride;
            self.map[at..at + self.stride].copy_from_slice(&self.row);
        }
        debug!("fb frame written");
        Ok(())
    }
}
