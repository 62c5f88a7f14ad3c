//! Startup configuration read from the host page.
//!
//! `index.html` may carry an inline block
//! `<script type="application/json" id="overlay-config">{ ... }</script>`;
//! every field is optional and anything invalid falls back to the defaults.

use serde::Deserialize;

use crate::model::ScaleBounds;

pub const CONFIG_ELEMENT_ID: &str = "overlay-config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("overlay config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scale bounds [{min}, {max}]")]
    InvalidScaleBounds { min: f64, max: f64 },

    #[error("default opacity {0} is outside [0, 1]")]
    InvalidOpacity(f64),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Opacity applied at startup and on every reset.
    pub default_opacity: f64,
    /// The rotation slider spans `[-rotation_range, rotation_range]` degrees.
    pub rotation_range: f64,
    pub scale_step: f64,
    pub toast_ms: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.25,
            max_scale: 3.0,
            default_opacity: 0.4,
            rotation_range: 180.0,
            scale_step: 0.01,
            toast_ms: 1600,
        }
    }
}

impl OverlayConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(ConfigError::InvalidScaleBounds { min, max });
        }
        if !(0.0..=1.0).contains(&self.default_opacity) {
            return Err(ConfigError::InvalidOpacity(self.default_opacity));
        }
        for (field, value) in [
            ("rotation_range", self.rotation_range),
            ("scale_step", self.scale_step),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn scale_bounds(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    /// Reads the inline config block from the current document. A missing
    /// block means defaults; a broken one is logged and also means defaults.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(cfg) => {
                tracing::info!(?cfg, "loaded overlay config");
                cfg
            }
            Err(err) => {
                tracing::warn!(%err, "falling back to default overlay config");
                Self::default()
            }
        }
    }
}
