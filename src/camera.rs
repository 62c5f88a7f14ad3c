//! Camera collaborator.
//!
//! `CameraSlot` owns the active stream and decides which acquisition result
//! wins when requests overlap; `acquire` does the browser side.

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaDevices, MediaStream, MediaStreamConstraints, MediaStreamTrack};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    #[error("this browser has no camera API (getUserMedia)")]
    Unavailable,

    #[error("could not access the camera: {0}")]
    AcquisitionFailed(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Front,
    #[default]
    Back,
}

impl Facing {
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    /// `facingMode` constraint value.
    pub fn mode(self) -> &'static str {
        match self {
            Self::Front => "user",
            Self::Back => "environment",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Front => f.write_str("front"),
            Self::Back => f.write_str("rear"),
        }
    }
}

/// Something that holds camera hardware and can release it.
pub trait MediaHandle {
    fn stop(&self);
}

impl MediaHandle for MediaStream {
    fn stop(&self) {
        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// Issued by `CameraSlot::begin`; hand it back with the acquisition result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraTicket {
    pub generation: u64,
    pub facing: Facing,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CameraOutcome {
    Attached,
    /// A newer request was issued while this one was pending.
    Superseded,
    Failed(CameraError),
}

#[derive(Debug)]
pub struct CameraSlot<S> {
    active: Option<S>,
    facing: Facing,
    generation: u64,
}

impl<S> Default for CameraSlot<S> {
    fn default() -> Self {
        Self {
            active: None,
            facing: Facing::default(),
            generation: 0,
        }
    }
}

impl<S: MediaHandle> CameraSlot<S> {
    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn active(&self) -> Option<&S> {
        self.active.as_ref()
    }

    /// Stops whatever is running and opens a new request.
    pub fn begin(&mut self) -> CameraTicket {
        self.stop();
        self.generation += 1;
        CameraTicket {
            generation: self.generation,
            facing: self.facing,
        }
    }

    pub fn flip(&mut self) -> CameraTicket {
        self.facing = self.facing.toggled();
        self.begin()
    }

    pub fn stop(&mut self) {
        if let Some(stream) = self.active.take() {
            stream.stop();
        }
    }

    pub fn complete(&mut self, ticket: CameraTicket, result: Result<S, CameraError>) -> CameraOutcome {
        if ticket.generation != self.generation {
            if let Ok(stream) = result {
                stream.stop();
            }
            return CameraOutcome::Superseded;
        }
        match result {
            Ok(stream) => {
                self.active = Some(stream);
                CameraOutcome::Attached
            }
            Err(err) => CameraOutcome::Failed(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Facing(Facing),
    /// The facing constraint was rejected; any camera was taken instead.
    Generic,
}

fn js_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

fn media_devices() -> Result<MediaDevices, CameraError> {
    let navigator = web_sys::window().ok_or(CameraError::Unavailable)?.navigator();
    let devices = js_sys::Reflect::get(&navigator, &JsValue::from_str("mediaDevices"))
        .map_err(|_| CameraError::Unavailable)?;
    if devices.is_undefined() || devices.is_null() {
        return Err(CameraError::Unavailable);
    }
    let has_gum = js_sys::Reflect::get(&devices, &JsValue::from_str("getUserMedia"))
        .map(|f| f.is_function())
        .unwrap_or(false);
    if !has_gum {
        return Err(CameraError::Unavailable);
    }
    Ok(devices.unchecked_into())
}

pub fn is_supported() -> bool {
    media_devices().is_ok()
}

async fn request(devices: &MediaDevices, video: &JsValue) -> Result<MediaStream, JsValue> {
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(video);
    constraints.set_audio(&JsValue::FALSE);
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    let stream = JsFuture::from(promise).await?;
    stream.dyn_into::<MediaStream>()
}

/// Asks for the camera facing `facing`, falling back to any camera if the
/// facing constraint is refused.
pub async fn acquire(facing: Facing) -> Result<(MediaStream, Acquisition), CameraError> {
    let devices = media_devices()?;

    let video = js_sys::Object::new();
    js_sys::Reflect::set(
        &video,
        &JsValue::from_str("facingMode"),
        &JsValue::from_str(facing.mode()),
    )
    .map_err(|e| CameraError::AcquisitionFailed(js_message(&e)))?;

    match request(&devices, &video.into()).await {
        Ok(stream) => Ok((stream, Acquisition::Facing(facing))),
        Err(first) => {
            tracing::warn!(%facing, err = %js_message(&first), "facing constraint refused, retrying generic");
            request(&devices, &JsValue::TRUE)
                .await
                .map(|stream| (stream, Acquisition::Generic))
                .map_err(|e| CameraError::AcquisitionFailed(js_message(&e)))
        }
    }
}
