#[cfg(test)]
mod error_tests {
    use corecam::errors::CameraError;
    use std::error::Error;

    #[test]
    fn test_writer_init_error() {
        let error = CameraError::WriterInitError("path not writable".to_string());
        assert!(error.to_string().contains("Writer init error"));
        assert!(error.to_string().contains("path not writable"));
    }

    #[test]
    fn test_append_error() {
        let error = CameraError::AppendError("track rejected sample".to_string());
        assert!(error.to_string().contains("Append error"));
        assert!(error.to_string().contains("track rejected sample"));
    }

    #[test]
    fn test_decode_error() {
        let error = CameraError::DecodeError("truncated jpeg".to_string());
        assert!(error.to_string().contains("Photo decode error"));
        assert!(error.to_string().contains("truncated jpeg"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = CameraError::InvalidStateError("Debug test".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("InvalidStateError"));
        assert!(debug_str.contains("Debug test"));
    }

    #[test]
    fn test_error_display_trait() {
        let error = CameraError::ControlError("Display test".to_string());
        let display_str = format!("{}", error);
        assert_eq!(display_str, "Camera control error: Display test");
    }

    #[test]
    fn test_error_implements_error_trait() {
        let error = CameraError::WriterInitError("Error trait test".to_string());
        let _error_trait: &dyn Error = &error;
        assert!(error.source().is_none());
    }

    #[test]
    fn test_all_error_variants() {
        let errors = vec![
            CameraError::WriterInitError("writer".to_string()),
            CameraError::AppendError("append".to_string()),
            CameraError::DecodeError("decode".to_string()),
            CameraError::InvalidStateError("state".to_string()),
            CameraError::ControlError("control".to_string()),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
