//! Image loading, tile compositing and canvas export backed by the `image` crate

use crate::io::configuration::{CANVAS_BACKGROUND, RESIZE_FILTER};
use crate::io::error::{CollageError, Result};
use crate::layout::engine::{ImageRecord, Placement};
use crate::layout::tree::Rect;
use image::buffer::ConvertBuffer;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use std::path::{Path, PathBuf};

/// Turns a path into an image handle and its aspect ratio
pub trait ImageLoader {
    /// What the loader hands back for later rendering or reporting
    type Handle;

    /// Load one image
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded, or reports a
    /// zero dimension
    fn load(&self, path: &Path) -> Result<ImageRecord<Self::Handle>>;
}

/// Decoded source image together with where it came from
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// File the pixels were read from
    pub path: PathBuf,
    /// Decoded pixels
    pub pixels: DynamicImage,
}

impl AsRef<Path> for DecodedImage {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Fully decodes every image so it can be composited later
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodingLoader;

impl ImageLoader for DecodingLoader {
    type Handle = DecodedImage;

    fn load(&self, path: &Path) -> Result<ImageRecord<DecodedImage>> {
        let pixels = image::open(path).map_err(|source| CollageError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let (width, height) = (pixels.width(), pixels.height());
        ImageRecord::from_dimensions(
            DecodedImage {
                path: path.to_path_buf(),
                pixels,
            },
            width,
            height,
        )
    }
}

/// Reads only the header dimensions, for layouts that are never rasterized
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderLoader;

impl ImageLoader for HeaderLoader {
    type Handle = PathBuf;

    fn load(&self, path: &Path) -> Result<ImageRecord<PathBuf>> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| CollageError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?;
        ImageRecord::from_dimensions(path.to_path_buf(), width, height)
    }
}

/// Draws placed images onto a canvas of the given pixel size
pub trait Rasterizer<H> {
    /// Finished canvas type
    type Canvas;

    /// Composite every placement, calling `on_tile` after each one
    ///
    /// # Errors
    ///
    /// Returns an error if a tile cannot be drawn
    fn rasterize(
        &self,
        placements: &[Placement<'_, H>],
        size: (u32, u32),
        on_tile: &mut dyn FnMut(),
    ) -> Result<Self::Canvas>;
}

/// Resizes decoded images into their tiles on an RGBA canvas
#[derive(Debug, Clone, Copy)]
pub struct ImageRasterizer {
    filter: FilterType,
    background: Rgba<u8>,
}

impl Default for ImageRasterizer {
    fn default() -> Self {
        Self::new(RESIZE_FILTER)
    }
}

impl ImageRasterizer {
    /// Rasterizer resampling with `filter` over an opaque background
    pub const fn new(filter: FilterType) -> Self {
        Self {
            filter,
            background: Rgba(CANVAS_BACKGROUND),
        }
    }

    /// Resize `pixels` into `rect` on `canvas`; tiles that snap to nothing are skipped
    pub fn draw_tile(&self, canvas: &mut RgbaImage, pixels: &DynamicImage, rect: &Rect) {
        let Some((x, y, width, height)) = snap_to_pixels(rect, canvas.dimensions()) else {
            return;
        };
        let resized = pixels.resize_exact(width, height, self.filter).to_rgba8();
        imageops::replace(canvas, &resized, i64::from(x), i64::from(y));
    }
}

impl Rasterizer<DecodedImage> for ImageRasterizer {
    type Canvas = RgbaImage;

    fn rasterize(
        &self,
        placements: &[Placement<'_, DecodedImage>],
        size: (u32, u32),
        on_tile: &mut dyn FnMut(),
    ) -> Result<RgbaImage> {
        let mut canvas = RgbaImage::from_pixel(size.0, size.1, self.background);
        for placement in placements {
            self.draw_tile(&mut canvas, &placement.handle.pixels, &placement.rect);
            on_tile();
        }
        Ok(canvas)
    }
}

/// Round both edges of `rect` to the pixel grid, clamped to `bounds`
///
/// Rounding edges rather than sizes means neighbouring tiles land on the same
/// pixel boundary. Returns `(x, y, width, height)`, or `None` when the tile
/// collapses to zero pixels in either direction.
pub fn snap_to_pixels(rect: &Rect, bounds: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
    let (max_x, max_y) = (f64::from(bounds.0), f64::from(bounds.1));
    let x0 = rect.x.round().clamp(0.0, max_x) as u32;
    let y0 = rect.y.round().clamp(0.0, max_y) as u32;
    let x1 = rect.right().round().clamp(0.0, max_x) as u32;
    let y1 = rect.bottom().round().clamp(0.0, max_y) as u32;

    (x1 > x0 && y1 > y0).then(|| (x0, y0, x1 - x0, y1 - y0))
}

/// Save the composited canvas, format chosen by the file extension
///
/// The alpha channel is dropped so lossy formats without alpha work too.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn export_canvas(canvas: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CollageError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let opaque: RgbImage = canvas.convert();
    opaque
        .save(output_path)
        .map_err(|e| CollageError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
