/*
 *  display/mod.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - pages, rendering and the backends that show them
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod framebuffer;
pub mod factory;

// Backends: headless always, framebuffer on Linux, window behind a feature
pub mod drivers;

// Fixed logical layout, palette and fonts
pub mod layout;

// Pages, buttons and navigation
pub mod page;
pub mod button;
pub mod router;
pub mod input;

// UI components
pub mod components;

// Page drawing
pub mod render;

// Re-exports for convenience
pub use traits::Backend;
pub use error::DisplayError;
pub use framebuffer::Frame;
pub use factory::{probe, run, run_polled, BackendKind, BoxedBackend, Opened};
pub use drivers::headless::HeadlessBackend;
pub use page::{Page, Slider};
pub use button::{hit_test, ButtonAction, ButtonRegion};
pub use router::{next_page, Router};
pub use input::{InputEvent, InputMapper};
pub use render::{render_page, PageContext};
