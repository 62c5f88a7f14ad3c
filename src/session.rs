//! Session: everything the overlay app mutates, owned in one place and handed
//! to event handlers explicitly.

use std::fmt;

use web_sys::MediaStream;

use crate::camera::{
    Acquisition, CameraError, CameraOutcome, CameraSlot, CameraTicket, Facing, MediaHandle,
};
use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::model::TransformState;
use crate::render::OverlayView;
use crate::state::{GestureController, PointerInput};

pub type BrowserSession = Session<MediaStream>;

/// Slider and button inputs, one per TransformState operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlInput {
    Opacity(f64),
    Scale(f64),
    Rotation(f64),
    Reset,
    ToggleLock,
}

/// Short user-facing messages shown as a toast.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Reset,
    Locked,
    Unlocked,
    ImageLoaded,
    Camera(Facing),
    CameraGeneric,
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("Reset"),
            Self::Locked => f.write_str("Overlay locked"),
            Self::Unlocked => f.write_str("Overlay unlocked"),
            Self::ImageLoaded => f.write_str("Image loaded"),
            Self::Camera(Facing::Front) => f.write_str("Front camera"),
            Self::Camera(Facing::Back) => f.write_str("Rear camera"),
            Self::CameraGeneric => f.write_str("Camera started (generic mode)"),
            Self::Error(msg) => f.write_str(msg),
        }
    }
}

#[derive(Debug)]
pub struct Session<S> {
    pub config: OverlayConfig,
    transform: TransformState,
    gestures: GestureController,
    camera: CameraSlot<S>,
    has_image: bool,
}

impl<S: MediaHandle> Session<S> {
    pub fn new(config: OverlayConfig) -> Self {
        let transform = TransformState::new(config.scale_bounds(), config.default_opacity);
        Self {
            config,
            transform,
            gestures: GestureController::default(),
            camera: CameraSlot::default(),
            has_image: false,
        }
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn has_image(&self) -> bool {
        self.has_image
    }

    pub fn camera_live(&self) -> bool {
        self.camera.active().is_some()
    }

    pub fn view(&self) -> OverlayView {
        OverlayView::from(&self.transform)
    }

    pub fn pointer(&mut self, input: PointerInput) -> bool {
        self.gestures.handle(input, &mut self.transform)
    }

    pub fn control(&mut self, input: ControlInput) -> Option<Notice> {
        let t = &mut self.transform;
        match input {
            ControlInput::Opacity(v) => t.set_opacity(v),
            ControlInput::Scale(v) => t.set_scale(v),
            ControlInput::Rotation(v) => t.set_rotation(v),
            ControlInput::Reset => {
                t.reset();
                return Some(Notice::Reset);
            }
            ControlInput::ToggleLock => {
                let locked = !t.locked();
                t.set_locked(locked);
                tracing::debug!(locked, "overlay lock");
                return Some(if locked { Notice::Locked } else { Notice::Unlocked });
            }
        }
        None
    }

    pub fn image_loaded(&mut self) -> Notice {
        self.has_image = true;
        self.transform.reset();
        Notice::ImageLoaded
    }

    pub fn start_camera(&mut self) -> CameraTicket {
        self.camera.begin()
    }

    pub fn flip_camera(&mut self) -> CameraTicket {
        self.camera.flip()
    }

    pub fn stop_camera(&mut self) {
        self.camera.stop();
    }

    /// Settles a camera request. Errors come back for the caller to surface;
    /// neither the transform nor the gesture state is touched.
    pub fn camera_ready(
        &mut self,
        ticket: CameraTicket,
        result: Result<(S, Acquisition), CameraError>,
    ) -> Result<Option<Notice>, OverlayError> {
        let (stream, how) = match result {
            Ok((stream, how)) => (Ok(stream), Some(how)),
            Err(err) => (Err(err), None),
        };
        match self.camera.complete(ticket, stream) {
            CameraOutcome::Attached => {
                tracing::info!(facing = %ticket.facing, ?how, "camera attached");
                Ok(how.map(|how| match how {
                    Acquisition::Facing(facing) => Notice::Camera(facing),
                    Acquisition::Generic => Notice::CameraGeneric,
                }))
            }
            CameraOutcome::Superseded => {
                tracing::debug!(generation = ticket.generation, "camera request superseded");
                Ok(None)
            }
            CameraOutcome::Failed(err) => Err(err.into()),
        }
    }
}
