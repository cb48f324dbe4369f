//! Command-line interface for building a collage from a set of images

use crate::io::configuration::{
    DEFAULT_CANVAS_WIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT, DEFAULT_TOLERANCE,
    IMAGE_LIST_COMMENT, IMAGE_LIST_EXTENSION, MAX_CANVAS_DIMENSION, MAX_TARGET_ASPECT,
    MIN_CANVAS_DIMENSION, MIN_TARGET_ASPECT, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{CollageError, Result, WithContext, invalid_input};
use crate::io::image::{
    DecodedImage, DecodingLoader, HeaderLoader, ImageLoader, ImageRasterizer, Rasterizer,
    export_canvas,
};
use crate::io::progress::ProgressManager;
use crate::io::report::{HtmlReport, ReportExporter};
use crate::layout::engine::{
    CanvasDimension, CollageLayout, ImageRecord, LayoutConfig, LayoutEngine, aspect_ratios,
};
use crate::layout::search::AspectTarget;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "treecollage")]
#[command(
    author,
    version,
    about = "Arrange images into a collage by random recursive slicing"
)]
/// Command-line arguments for the collage tool
pub struct Cli {
    /// Image files, directories of images, or .txt lists with one image path per line
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Canvas width in pixels; the height follows from the layout
    #[arg(
        short = 'w',
        long,
        conflicts_with = "height",
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_CANVAS_DIMENSION)..=i64::from(MAX_CANVAS_DIMENSION))
    )]
    pub width: Option<u32>,

    /// Canvas height in pixels; the width follows from the layout
    #[arg(
        short = 'H',
        long,
        value_parser = clap::value_parser!(u32).range(i64::from(MIN_CANVAS_DIMENSION)..=i64::from(MAX_CANVAS_DIMENSION))
    )]
    pub height: Option<u32>,

    /// Target canvas aspect ratio (width / height); any aspect if omitted
    #[arg(short, long, value_parser = parse_target_aspect)]
    pub aspect: Option<f64>,

    /// Accept aspects within target / tolerance ..= target * tolerance
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE, value_parser = parse_tolerance)]
    pub tolerance: f64,

    /// Layouts tried before giving up on the target aspect
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Random seed for a reproducible layout
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Where to write the composited collage
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write an HTML page placing the original images
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Skip compositing; only read image headers and write the HTML page
    #[arg(long, requires = "html")]
    pub no_image: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn parse_target_aspect(value: &str) -> std::result::Result<f64, String> {
    let aspect: f64 = value
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if (MIN_TARGET_ASPECT..=MAX_TARGET_ASPECT).contains(&aspect) {
        Ok(aspect)
    } else {
        Err(format!(
            "aspect must be between {MIN_TARGET_ASPECT} and {MAX_TARGET_ASPECT}"
        ))
    }
}

fn parse_tolerance(value: &str) -> std::result::Result<f64, String> {
    let tolerance: f64 = value
        .parse()
        .map_err(|e| format!("'{value}' is not a number: {e}"))?;
    if tolerance.is_finite() && tolerance > 1.0 {
        Ok(tolerance)
    } else {
        Err("tolerance must be greater than 1".to_string())
    }
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter for the chosen verbosity
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// The fixed canvas side, defaulting to a fixed width
    pub const fn canvas_dimension(&self) -> CanvasDimension {
        match (self.width, self.height) {
            (Some(width), _) => CanvasDimension::Width(width),
            (None, Some(height)) => CanvasDimension::Height(height),
            (None, None) => CanvasDimension::Width(DEFAULT_CANVAS_WIDTH),
        }
    }

    /// Layout settings derived from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the aspect and tolerance do not form a valid target
    pub fn layout_config(&self) -> Result<LayoutConfig> {
        let target = self
            .aspect
            .map(|aspect| AspectTarget::new(aspect, self.tolerance))
            .transpose()?;
        Ok(LayoutConfig {
            max_attempts: self.max_attempts,
            seed: self.seed,
            target,
        })
    }
}

/// Figures reported once a collage has been produced
#[derive(Debug, Clone, PartialEq)]
pub struct CollageSummary {
    /// Images placed on the canvas
    pub image_count: usize,
    /// Canvas size in whole pixels
    pub canvas_size: (u32, u32),
    /// Exact canvas aspect ratio of the layout
    pub canvas_aspect: f64,
    /// Trees generated to find the layout
    pub attempts: usize,
    /// Seed that reproduces the layout
    pub seed: Option<u64>,
    /// Wall time for loading, layout and output
    pub elapsed: Duration,
}

/// Orchestrates loading, layout and output for one invocation
pub struct CollageProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CollageProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the collage and write every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if no images are found, an image cannot be loaded, no
    /// layout fits the requested aspect, or an output cannot be written
    pub fn process(&mut self) -> Result<CollageSummary> {
        let start_time = Instant::now();
        let paths = self.collect_images()?;
        if paths.is_empty() {
            return Err(invalid_input(
                "inputs",
                &self.cli.inputs.len(),
                &"no images found",
            ));
        }

        let config = self.cli.layout_config()?;
        let mut engine = LayoutEngine::new(&config);
        let canvas = self.cli.canvas_dimension();

        let layout = if self.cli.no_image {
            let images = self.load_all(&HeaderLoader, &paths)?;
            let layout = engine.build(&aspect_ratios(&images), canvas)?;
            self.write_report(&layout, &images)?;
            layout
        } else {
            let images = self.load_all(&DecodingLoader, &paths)?;
            let layout = engine.build(&aspect_ratios(&images), canvas)?;
            self.write_collage(&layout, &images)?;
            self.write_report(&layout, &images)?;
            layout
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        let summary = CollageSummary {
            image_count: layout.tiles.len(),
            canvas_size: layout.pixel_size(),
            canvas_aspect: layout.canvas_aspect,
            attempts: layout.attempts,
            seed: engine.seed(),
            elapsed: start_time.elapsed(),
        };
        info!(
            images = summary.image_count,
            attempts = summary.attempts,
            aspect = summary.canvas_aspect,
            "collage complete"
        );
        self.report_summary(&summary);
        Ok(summary)
    }

    /// Expand the inputs into image paths
    ///
    /// Directories contribute their supported image files in name order;
    /// `.txt` files contribute one path per non-empty, non-comment line,
    /// relative paths resolved against the list's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an input does not exist or cannot be read
    pub fn collect_images(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for input in &self.cli.inputs {
            if input.is_dir() {
                paths.extend(scan_directory(input)?);
            } else if input.is_file() {
                if has_extension(input, &[IMAGE_LIST_EXTENSION]) {
                    paths.extend(read_image_list(input)?);
                } else {
                    paths.push(input.clone());
                }
            } else {
                return Err(invalid_input(
                    "input",
                    &input.display(),
                    &"not an existing file or directory",
                ));
            }
        }
        Ok(paths)
    }

    fn load_all<L: ImageLoader>(
        &mut self,
        loader: &L,
        paths: &[PathBuf],
    ) -> Result<Vec<ImageRecord<L::Handle>>> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage("Loading", paths.len());
        }

        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(ref pm) = self.progress_manager {
                pm.set_message(&path.file_name().unwrap_or_default().to_string_lossy());
            }
            images.push(loader.load(path).with_path(path)?);
            if let Some(ref pm) = self.progress_manager {
                pm.advance();
            }
        }
        Ok(images)
    }

    fn write_collage(
        &mut self,
        layout: &CollageLayout,
        images: &[ImageRecord<DecodedImage>],
    ) -> Result<()> {
        let placements = layout.placements(images)?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_stage("Compositing", placements.len());
        }

        let progress = self.progress_manager.as_ref();
        let canvas = ImageRasterizer::default().rasterize(
            &placements,
            layout.pixel_size(),
            &mut || {
                if let Some(pm) = progress {
                    pm.advance();
                }
            },
        )?;
        export_canvas(&canvas, &self.cli.output)
    }

    fn write_report<H: AsRef<Path>>(
        &self,
        layout: &CollageLayout,
        images: &[ImageRecord<H>],
    ) -> Result<()> {
        let Some(ref html_path) = self.cli.html else {
            return Ok(());
        };
        let placements = layout.placements(images)?;
        HtmlReport::default().export(&placements, layout.pixel_size(), html_path)
    }

    // Allow print for the final user-facing summary line
    #[allow(clippy::print_stderr)]
    fn report_summary(&self, summary: &CollageSummary) {
        if self.cli.quiet {
            return;
        }
        let (width, height) = summary.canvas_size;
        let seed = summary
            .seed
            .map_or_else(|| "injected".to_string(), |seed| seed.to_string());
        eprintln!(
            "{} images -> {width}x{height} canvas, aspect {:.4}, {} attempt(s), seed {seed}, {} ms",
            summary.image_count,
            summary.canvas_aspect,
            summary.attempts,
            summary.elapsed.as_millis()
        );
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CollageError::FileSystem {
        path: dir.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_path(dir)?.path();
        if path.is_file() && has_extension(&path, SUPPORTED_EXTENSIONS) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_image_list(list: &Path) -> Result<Vec<PathBuf>> {
    let contents = std::fs::read_to_string(list).map_err(|e| CollageError::FileSystem {
        path: list.to_path_buf(),
        operation: "read image list",
        source: e,
    })?;
    let base = list.parent().unwrap_or_else(|| Path::new(""));

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(IMAGE_LIST_COMMENT))
        .map(|line| base.join(line))
        .collect())
}
