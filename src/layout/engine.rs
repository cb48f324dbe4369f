//! Public entry point tying search and positioning together

use crate::io::configuration::DEFAULT_MAX_ATTEMPTS;
use crate::io::error::{Result, inconsistency, invalid_input};
use crate::layout::position::resolve_positions;
use crate::layout::search::{AspectTarget, SearchOutcome, search_unconstrained, search_within};
use crate::layout::tree::{Rect, TileTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

/// Loaded image handle together with its aspect ratio
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord<H> {
    /// Whatever the caller uses to refer to the image later
    pub handle: H,
    /// Width divided by height
    pub aspect_ratio: f64,
}

impl<H> ImageRecord<H> {
    /// Record for an image of the given pixel size
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_dimensions(handle: H, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_input(
                "image dimensions",
                &format!("{width}x{height}"),
                &"images must have non-zero width and height",
            ));
        }
        Ok(Self {
            handle,
            aspect_ratio: f64::from(width) / f64::from(height),
        })
    }
}

/// Aspect ratios of `images`, in order
pub fn aspect_ratios<H>(images: &[ImageRecord<H>]) -> Vec<f64> {
    images.iter().map(|image| image.aspect_ratio).collect()
}

/// The canvas side fixed by the caller; the other follows from the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasDimension {
    /// Fixed width in pixels
    Width(u32),
    /// Fixed height in pixels
    Height(u32),
}

impl CanvasDimension {
    /// Canvas rectangle at the origin for a layout with the given aspect
    pub fn rect_for(self, aspect: f64) -> Rect {
        match self {
            Self::Width(width) => {
                let width = f64::from(width);
                Rect::new(0.0, 0.0, width, width / aspect)
            }
            Self::Height(height) => {
                let height = f64::from(height);
                Rect::new(0.0, 0.0, height * aspect, height)
            }
        }
    }

    const fn value(self) -> u32 {
        match self {
            Self::Width(value) | Self::Height(value) => value,
        }
    }
}

/// Knobs for a layout session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Trees generated before a constrained search gives up
    pub max_attempts: usize,
    /// Fixed seed for reproducible layouts; wall clock when absent
    pub seed: Option<u64>,
    /// Aspect band to search for; unconstrained when absent
    pub target: Option<AspectTarget>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            target: None,
        }
    }
}

/// Final placement of one image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Index into the caller's image list
    pub image_index: usize,
    /// Region of the canvas the image is scaled into
    pub rect: Rect,
}

/// Tile rectangle paired with the caller's image handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement<'a, H> {
    /// Image to draw
    pub handle: &'a H,
    /// Where to draw it
    pub rect: Rect,
}

/// Accepted and fully positioned layout
#[derive(Debug, Clone)]
pub struct CollageLayout {
    /// One tile per image, in leaf order
    pub tiles: Vec<Tile>,
    /// Whole canvas, anchored at the origin
    pub canvas: Rect,
    /// Width / height of the canvas
    pub canvas_aspect: f64,
    /// Trees generated to find this layout
    pub attempts: usize,
    /// Accepted tree with aspects and rectangles filled in
    pub tree: TileTree,
}

impl CollageLayout {
    /// Canvas size rounded to whole pixels, at least one pixel per side
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.canvas.width.round().max(1.0) as u32,
            self.canvas.height.round().max(1.0) as u32,
        )
    }

    /// Pair every tile with the handle of its image
    ///
    /// # Errors
    ///
    /// Returns an error if `images` is not the list the layout was built for
    pub fn placements<'a, H>(&self, images: &'a [ImageRecord<H>]) -> Result<Vec<Placement<'a, H>>> {
        if images.len() != self.tiles.len() {
            return Err(invalid_input(
                "images",
                &images.len(),
                &format!("layout has {} tiles", self.tiles.len()),
            ));
        }
        self.tiles
            .iter()
            .map(|tile| {
                let image = images.get(tile.image_index).ok_or_else(|| {
                    inconsistency(
                        "placements",
                        &format!("tile refers to missing image {}", tile.image_index),
                    )
                })?;
                Ok(Placement {
                    handle: &image.handle,
                    rect: tile.rect,
                })
            })
            .collect()
    }
}

/// Owns the random source and budget for a series of layout requests
pub struct LayoutEngine<R = StdRng> {
    rng: R,
    seed: Option<u64>,
    max_attempts: usize,
    target: Option<AspectTarget>,
}

impl LayoutEngine<StdRng> {
    /// Engine seeded from `config.seed`, or from the wall clock when unset
    pub fn new(config: &LayoutConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        info!(seed, "seeded layout engine");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
            max_attempts: config.max_attempts,
            target: config.target,
        }
    }
}

impl<R: Rng> LayoutEngine<R> {
    /// Engine drawing from a caller-supplied random source
    pub fn with_rng(rng: R, config: &LayoutConfig) -> Self {
        Self {
            rng,
            seed: None,
            max_attempts: config.max_attempts,
            target: config.target,
        }
    }

    /// Seed in use, unless the random source was injected
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Attempt budget for constrained searches
    pub const fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Layout using the configured target, if any
    ///
    /// # Errors
    ///
    /// See [`LayoutEngine::build_layout`] and [`LayoutEngine::build_layout_within`]
    pub fn build(&mut self, aspect_ratios: &[f64], canvas: CanvasDimension) -> Result<CollageLayout> {
        match self.target {
            Some(target) => self.build_layout_within(aspect_ratios, canvas, target),
            None => self.build_layout(aspect_ratios, canvas),
        }
    }

    /// Single random layout with whatever aspect it happens to have
    ///
    /// # Errors
    ///
    /// Returns an error if there are no images, an aspect ratio is not
    /// positive, or the canvas dimension is zero
    pub fn build_layout(
        &mut self,
        aspect_ratios: &[f64],
        canvas: CanvasDimension,
    ) -> Result<CollageLayout> {
        validate_request(aspect_ratios, canvas)?;
        let outcome = search_unconstrained(aspect_ratios, &mut self.rng)?;
        place(outcome, canvas)
    }

    /// Random layout whose canvas aspect lies within `target`'s band
    ///
    /// # Errors
    ///
    /// Returns an input error as [`LayoutEngine::build_layout`] does, or if
    /// the target or attempt budget is invalid, and
    /// [`crate::CollageError::LayoutUnattainable`] once the budget is spent
    pub fn build_layout_within(
        &mut self,
        aspect_ratios: &[f64],
        canvas: CanvasDimension,
        target: AspectTarget,
    ) -> Result<CollageLayout> {
        validate_request(aspect_ratios, canvas)?;
        target.validate()?;
        let outcome = search_within(aspect_ratios, target, self.max_attempts, &mut self.rng)?;
        place(outcome, canvas)
    }
}

fn validate_request(aspect_ratios: &[f64], canvas: CanvasDimension) -> Result<()> {
    if aspect_ratios.is_empty() {
        return Err(invalid_input(
            "images",
            &0,
            &"at least one image is required",
        ));
    }
    if let Some((index, aspect)) = aspect_ratios
        .iter()
        .enumerate()
        .find(|(_, aspect)| !aspect.is_finite() || **aspect <= 0.0)
    {
        return Err(invalid_input(
            "image aspect",
            aspect,
            &format!("image {index} must have a positive finite aspect ratio"),
        ));
    }
    if canvas.value() == 0 {
        return Err(invalid_input(
            "canvas dimension",
            &canvas.value(),
            &"must be at least 1 pixel",
        ));
    }
    Ok(())
}

fn place(outcome: SearchOutcome, canvas: CanvasDimension) -> Result<CollageLayout> {
    let SearchOutcome {
        mut tree,
        aspect,
        attempts,
    } = outcome;
    let canvas_rect = canvas.rect_for(aspect);
    resolve_positions(&mut tree, canvas_rect)?;

    let tiles = tree
        .leaves()
        .into_iter()
        .map(|id| {
            let node = tree.node(id)?;
            let image_index = node.image_index.ok_or_else(|| {
                inconsistency("tile extraction", &format!("leaf {} has no image", id.index()))
            })?;
            let rect = node.rect.ok_or_else(|| {
                inconsistency(
                    "tile extraction",
                    &format!("leaf {} has no rectangle", id.index()),
                )
            })?;
            Ok(Tile { image_index, rect })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CollageLayout {
        tiles,
        canvas: canvas_rect,
        canvas_aspect: aspect,
        attempts,
        tree,
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
