/*
 *  display/error.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display backend errors
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

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for all display operations
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Backend could not be brought up, the next one is tried
    #[error("{backend} initialization failed: {reason}")]
    InitializationFailed { backend: &'static str, reason: String },

    /// Backend not compiled in or not available on this platform
    #[error("{0} backend unavailable in this build")]
    Unavailable(&'static str),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported pixel format: {0} bits per pixel")]
    UnsupportedFormat(u32),

    /// Framebuffer size mismatch
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl DisplayError {
    pub fn init(backend: &'static str, reason: impl ToString) -> Self {
        DisplayError::InitializationFailed { backend, reason: reason.to_string() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DisplayError::Io { path: path.into(), source }
    }
}
