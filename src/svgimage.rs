/*
 *  svgimage.rs
 *
 *  obc-dash - on-board computer display
 *  (c) 2020-26 Stuart Hunter
 *
 *  Home page logo: an SVG rasterised once at start-up with resvg,
 *  or an amber emblem when the asset is unavailable
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

use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyleBuilder;
use log::{debug, warn};
use resvg::usvg::{Options as UsvgOptions, Transform, Tree};
use thiserror::Error;
use tiny_skia::Pixmap;

use crate::display::layout::{AMBER, AMBER_DIM, EMBLEM_CENTER, EMBLEM_RADIUS};
use crate::draw::draw_circle_from_center;

/// Asset loading failures. Never fatal, the emblem is drawn instead.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SVG parse error: {0}")]
    Parse(String),

    #[error("Cannot create {0}x{1} pixmap")]
    Pixmap(u32, u32),
}

/// Rasterised logo or fallback emblem
#[derive(Debug, Clone)]
pub enum Logo {
    /// Row-major pixels composited over black; None where fully transparent
    Image {
        width: u32,
        height: u32,
        pixels: Vec<Option<Rgb888>>,
    },
    Emblem,
}

impl Logo {
    /// Rasterise an SVG document to `size` x `size`
    pub fn from_svg(svg: &str, size: u32) -> Result<Self, AssetError> {
        let tree = Tree::from_str(svg, &UsvgOptions::default())
            .map_err(|e| AssetError::Parse(e.to_string()))?;

        let mut pixmap = Pixmap::new(size, size).ok_or(AssetError::Pixmap(size, size))?;
        let svg_size = tree.size();
        let transform = Transform::from_scale(
            size as f32 / svg_size.width(),
            size as f32 / svg_size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // premultiplied, so the colour channels are already composited over black
        let pixels = pixmap
            .pixels()
            .iter()
            .map(|p| (p.alpha() > 0).then(|| Rgb888::new(p.red(), p.green(), p.blue())))
            .collect();

        debug!("Logo rasterised at {}x{}", size, size);
        Ok(Logo::Image { width: size, height: size, pixels })
    }

    pub fn load(path: &Path, size: u32) -> Result<Self, AssetError> {
        let svg = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_svg(&svg, size)
    }

    /// Load the logo if one is configured, falling back to the emblem
    pub fn load_or_emblem(path: Option<&Path>, size: u32) -> Self {
        match path {
            Some(p) => Self::load(p, size).unwrap_or_else(|e| {
                warn!("Logo unavailable, using emblem: {}", e);
                Logo::Emblem
            }),
            None => Logo::Emblem,
        }
    }

    pub fn is_emblem(&self) -> bool {
        matches!(self, Logo::Emblem)
    }

    /// Draw with the top-left corner at `origin`. The emblem ignores
    /// `origin` and sits at its fixed home page position.
    pub fn draw<D>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        match self {
            Logo::Image { width, pixels, .. } => {
                let w = *width as usize;
                target.draw_iter(pixels.iter().enumerate().filter_map(|(i, c)| {
                    c.map(|c| Pixel(origin + Point::new((i % w) as i32, (i / w) as i32), c))
                }))
            }
            Logo::Emblem => {
                let ring = PrimitiveStyleBuilder::new()
                    .stroke_color(AMBER)
                    .stroke_width(3)
                    .fill_color(AMBER_DIM)
                    .build();
                draw_circle_from_center(target, EMBLEM_CENTER, EMBLEM_RADIUS, ring)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::Canvas;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <rect x="0" y="0" width="5" height="10" fill="#ff0000"/>
    </svg>"##;

    #[test]
    fn test_from_svg_rasterises() {
        let logo = Logo::from_svg(SQUARE, 20).unwrap();
        match &logo {
            Logo::Image { width, height, pixels } => {
                assert_eq!((*width, *height), (20, 20));
                assert_eq!(pixels[0], Some(Rgb888::new(255, 0, 0)));
                // right half transparent
                assert_eq!(pixels[19], None);
            }
            Logo::Emblem => panic!("expected image"),
        }
    }

    #[test]
    fn test_bad_svg_is_parse_error() {
        assert!(matches!(Logo::from_svg("not svg", 20), Err(AssetError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("obc-dash-no-such-logo.svg");
        assert!(matches!(Logo::load(&path, 48), Err(AssetError::Io { .. })));
        assert!(Logo::load_or_emblem(Some(&path), 48).is_emblem());
        assert!(Logo::load_or_emblem(None, 48).is_emblem());
    }

    #[test]
    fn test_draw_offsets_image() {
        let logo = Logo::from_svg(SQUARE, 10).unwrap();
        let mut canvas = Canvas::new(40, 40, Rgb888::BLACK);
        logo.draw(&mut canvas, Point::new(8, 8)).unwrap();
        assert_eq!(canvas.pixel(8, 8), Some(Rgb888::new(255, 0, 0)));
        assert_eq!(canvas.pixel(7, 8), Some(Rgb888::BLACK));
        assert_eq!(canvas.pixel(16, 8), Some(Rgb888::BLACK));
    }

    #[test]
    fn test_emblem_draws_ring() {
        let mut canvas = Canvas::new(80, 80, Rgb888::BLACK);
        Logo::Emblem.draw(&mut canvas, Point::zero()).unwrap();
        assert_eq!(canvas.pixel(EMBLEM_CENTER.x, EMBLEM_CENTER.y), Some(AMBER_DIM));
        assert!(canvas.count_lit(Rgb888::BLACK) > 0);
    }
}
