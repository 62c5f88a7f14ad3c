// Render step: TransformState -> CSS transform + HUD text. Pure and cheap, so
// it runs after every mutation without dirty tracking.

use crate::model::TransformState;
use crate::util::round_half_up;

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayView {
    /// Value for the overlay's `transform` style.
    pub transform: String,
    pub opacity: String,
    pub hud: Hud,
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub opacity: String,
    pub scale: String,
    pub rotation: String,
}

impl From<&TransformState> for OverlayView {
    fn from(s: &TransformState) -> Self {
        // Centering first, then offset, rotation and scale about the center.
        let transform = format!(
            "translate(-50%, -50%) translate({}px, {}px) rotate({}deg) scale({})",
            s.x(),
            s.y(),
            s.rotation(),
            s.scale()
        );
        Self {
            transform,
            opacity: s.opacity().to_string(),
            hud: Hud {
                opacity: percent(s.opacity()),
                scale: percent(s.scale()),
                rotation: format!("{}°", round_half_up(s.rotation())),
            },
            locked: s.locked(),
        }
    }
}

impl OverlayView {
    pub fn lock_icon(&self) -> &'static str {
        if self.locked { "🔒" } else { "🔓" }
    }

    pub fn class(&self, has_image: bool) -> String {
        let mut classes = vec!["overlay"];
        if self.locked {
            classes.push("is-locked");
        }
        if !has_image {
            classes.push("is-hidden");
        }
        classes.join(" ")
    }

    pub fn style(&self) -> String {
        format!("opacity:{}; transform:{};", self.opacity, self.transform)
    }
}

fn percent(v: f64) -> String {
    format!("{}%", round_half_up(v * 100.0))
}
