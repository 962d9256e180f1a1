/*
 *  display/framebuffer.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Physical frame: the logical canvas upscaled to the panel, then dimmed
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

use crate::dimming::apply_overlay;
use crate::display::error::DisplayError;
use crate::vframebuf::Canvas;

/// RGBA8 frame at the physical display resolution
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    pub fn new(size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            rgba: vec![0; (size.width * size.height * 4) as usize],
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn resize(&mut self, size: Size) {
        self.width = size.width;
        self.height = size.height;
        self.rgba.resize((size.width * size.height * 4) as usize, 0);
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Copy into a backend buffer that should match this frame exactly.
    /// A size mismatch leaves `dst` untouched.
    pub fn copy_to(&self, dst: &mut [u8]) -> Result<(), DisplayError> {
        if dst.len() != self.rgba.len() {
            return Err(DisplayError::BufferSizeMismatch { expected: dst.len(), actual: self.rgba.len() });
        }
        dst.copy_from_slice(&self.rgba);
        Ok(())
    }

    /// Pixel at (x, y) as [r, g, b, a]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some([self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]])
    }

    /// Nearest-neighbour upscale of the canvas followed by the dim overlay
    pub fn compose(&mut self, canvas: &Canvas, overlay_alpha: u8) {
        scale_into(canvas, &mut self.rgba, self.width, self.height);
        apply_overlay(&mut self.rgba, overlay_alpha);
    }
}

/// Nearest-neighbour scale of `canvas` into an RGBA buffer of `out_w` x `out_h`
pub fn scale_into(canvas: &Canvas, out: &mut [u8], out_w: u32, out_h: u32) {
    let (cw, ch) = (canvas.width(), canvas.height());
    if cw == 0 || ch == 0 || out_w == 0 || out_h == 0 {
        return;
    }
    let src = canvas.as_slice();

    // source column per output column, computed once
    let cols: Vec<usize> = (0..out_w as usize).map(|x| x * cw / out_w as usize).collect();

    for (y, row) in out.chunks_exact_mut(out_w as usize * 4).take(out_h as usize).enumerate() {
        let sy = y * ch / out_h as usize;
        let src_row = &src[sy * cw..(sy + 1) * cw];
        for (px, &sx) in row.chunks_exact_mut(4).zip(cols.iter()) {
            let c = src_row[sx];
            px.copy_from_slice(&[c.r(), c.g(), c.b(), 0xff]);
        }
    }
}
