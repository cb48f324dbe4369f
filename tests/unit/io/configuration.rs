//! Tests for configuration constants consistency

#[cfg(test)]
mod tests {
    use treecollage::io::configuration::{
        CANVAS_BACKGROUND, DEFAULT_CANVAS_WIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT,
        DEFAULT_TOLERANCE, IMAGE_LIST_EXTENSION, MAX_CANVAS_DIMENSION, MAX_TARGET_ASPECT,
        MIN_CANVAS_DIMENSION, MIN_TARGET_ASPECT, SUPPORTED_EXTENSIONS,
    };

    // Tests default canvas width lies inside the accepted range
    // Verified by setting the default above the maximum
    #[test]
    fn test_canvas_bounds() {
        assert!(MIN_CANVAS_DIMENSION > 0);
        assert!(MIN_CANVAS_DIMENSION < MAX_CANVAS_DIMENSION);
        assert!((MIN_CANVAS_DIMENSION..=MAX_CANVAS_DIMENSION).contains(&DEFAULT_CANVAS_WIDTH));
    }

    // Tests search defaults form a usable target
    // Verified by setting tolerance to exactly one
    #[test]
    fn test_search_defaults() {
        assert!(DEFAULT_MAX_ATTEMPTS > 0);
        assert!(DEFAULT_TOLERANCE > 1.0);
        assert!(MIN_TARGET_ASPECT > 0.0);
        assert!(MIN_TARGET_ASPECT < 1.0 && MAX_TARGET_ASPECT > 1.0);
    }

    // Tests image lists are not mistaken for images
    // Verified by adding txt to the supported extensions
    #[test]
    fn test_input_extensions() {
        assert!(!SUPPORTED_EXTENSIONS.contains(&IMAGE_LIST_EXTENSION));
        assert!(SUPPORTED_EXTENSIONS.contains(&"png"));
        assert!(SUPPORTED_EXTENSIONS.contains(&"jpg"));
        assert!(
            SUPPORTED_EXTENSIONS
                .iter()
                .all(|ext| ext.chars().all(|c| c.is_ascii_lowercase()))
        );
    }

    // Tests output defaults
    // Verified by making the background transparent
    #[test]
    fn test_output_defaults() {
        assert!(DEFAULT_OUTPUT.ends_with(".png"));
        assert_eq!(CANVAS_BACKGROUND[3], 255);
    }
}
