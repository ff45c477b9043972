use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    WriterInitError(String),
    AppendError(String),
    DecodeError(String),
    InvalidStateError(String),
    ControlError(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CameraError::WriterInitError(msg) => write!(f, "Writer init error: {}", msg),
            CameraError::AppendError(msg) => write!(f, "Append error: {}", msg),
            CameraError::DecodeError(msg) => write!(f, "Photo decode error: {}", msg),
            CameraError::InvalidStateError(msg) => write!(f, "Invalid state error: {}", msg),
            CameraError::ControlError(msg) => write!(f, "Camera control error: {}", msg),
        }
    }
}

impl std::error::Error for CameraError {}
