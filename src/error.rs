use crate::camera::CameraError;

/// Failures that reach the user. Gesture and slider handling never fail; they
/// clamp or ignore instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverlayError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error("could not load the image: {0}")]
    ImageLoad(String),
}
