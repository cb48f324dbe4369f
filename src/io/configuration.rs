//! Layout constants and runtime configuration defaults

// Search budget
/// Maximum trees generated before a constrained search gives up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Multiplicative slack around the requested canvas aspect ratio
pub const DEFAULT_TOLERANCE: f64 = 1.1;

// Canvas bounds accepted on the command line
/// Canvas width used when neither width nor height is given
pub const DEFAULT_CANVAS_WIDTH: u32 = 1200;
/// Smallest fixed canvas side accepted by the CLI
pub const MIN_CANVAS_DIMENSION: u32 = 100;
/// Largest fixed canvas side accepted by the CLI
pub const MAX_CANVAS_DIMENSION: u32 = 2000;

/// Smallest target aspect ratio accepted by the CLI
pub const MIN_TARGET_ASPECT: f64 = 0.1;
/// Largest target aspect ratio accepted by the CLI
pub const MAX_TARGET_ASPECT: f64 = 10.0;

// Input discovery
/// File extensions picked up when scanning a directory
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp",
];
/// Extension that marks a file as an image list (one path per line)
pub const IMAGE_LIST_EXTENSION: &str = "txt";
/// Prefix for comment lines inside an image list
pub const IMAGE_LIST_COMMENT: char = '#';

// Output settings
/// Default path for the composited collage
pub const DEFAULT_OUTPUT: &str = "collage.png";
/// Heading shown at the top of the HTML report
pub const REPORT_TITLE: &str = "Image Collage";
/// Filter used when resizing source images into their tiles
pub const RESIZE_FILTER: image::imageops::FilterType = image::imageops::FilterType::Triangle;
/// Opaque background painted before tiles are composited
pub const CANVAS_BACKGROUND: [u8; 4] = [0, 0, 0, 255];

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
