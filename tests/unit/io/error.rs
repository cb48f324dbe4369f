//! Tests for error formatting, source chaining and context enrichment

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use treecollage::io::error::{
        CollageError, ErrorContext, WithContext, inconsistency, invalid_input,
    };

    // Tests invalid input message names the parameter, value and reason
    // Verified by omitting the value from the message
    #[test]
    fn test_invalid_input_display() {
        let err = invalid_input("tolerance", &0.5, &"must be greater than 1");
        let message = err.to_string();

        assert!(message.contains("tolerance"));
        assert!(message.contains("0.5"));
        assert!(message.contains("must be greater than 1"));
        assert!(err.source().is_none());
    }

    // Tests exhausted search message reports the band and the attempts
    // Verified by printing the target instead of the band
    #[test]
    fn test_layout_unattainable_display() {
        let err = CollageError::LayoutUnattainable {
            attempts: 12,
            target: 1.0,
            tolerance: 1.1,
        };
        let message = err.to_string();

        assert!(message.contains("0.9091..=1.1000"), "{message}");
        assert!(message.contains("after 12 attempts"));
    }

    // Tests internal inconsistency formatting
    // Verified by dropping the operation name
    #[test]
    fn test_inconsistency_display() {
        let err = inconsistency("aspect calculation", &"leaf 3 has no image");

        assert!(matches!(err, CollageError::InternalInconsistency { .. }));
        assert_eq!(
            err.to_string(),
            "Internal inconsistency in aspect calculation: leaf 3 has no image"
        );
    }

    // Tests wrapped errors expose their cause
    // Verified by returning None for every variant
    #[test]
    fn test_source_chaining() {
        let fs_err = CollageError::FileSystem {
            path: PathBuf::from("out"),
            operation: "create directory",
            source: std::io::Error::other("denied"),
        };
        assert_eq!(fs_err.source().map(ToString::to_string), Some("denied".to_string()));

        let image_err: CollageError =
            image::ImageError::IoError(std::io::Error::other("truncated")).into();
        assert!(matches!(image_err, CollageError::ImageLoad { .. }));
        assert!(image_err.source().is_some());
    }

    // Tests path context replaces the unknown placeholder
    // Verified by leaving the path untouched
    #[test]
    fn test_with_path_on_image_error() {
        let result: Result<(), image::ImageError> =
            Err(image::ImageError::IoError(std::io::Error::other("bad header")));

        match result.with_path("photos/b.png") {
            Err(CollageError::ImageLoad { path, .. }) => {
                assert_eq!(path, PathBuf::from("photos/b.png"));
            }
            other => unreachable!("Expected ImageLoad error, got {other:?}"),
        }
    }

    // Tests attempt context overrides the recorded attempt count
    // Verified by ignoring the attempts field of the context
    #[test]
    fn test_with_context_attempts() {
        let result: Result<(), CollageError> = Err(CollageError::LayoutUnattainable {
            attempts: 1,
            target: 2.0,
            tolerance: 1.2,
        });
        let context = ErrorContext {
            attempts: Some(40),
            ..Default::default()
        };

        match result.with_context(context) {
            Err(CollageError::LayoutUnattainable { attempts, .. }) => assert_eq!(attempts, 40),
            other => unreachable!("Expected LayoutUnattainable, got {other:?}"),
        }
    }

    // Tests context leaves input errors unchanged
    // Verified by rewriting every variant
    #[test]
    fn test_context_ignores_input_errors() {
        let result: Result<(), CollageError> = Err(invalid_input("images", &0, &"none"));
        let err = result.with_path("ignored.png").unwrap_err();

        assert!(matches!(
            err,
            CollageError::InvalidInput {
                parameter: "images",
                ..
            }
        ));
    }
}
