use serde::{Deserialize, Serialize};

/// What a tap landed on, as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapTarget {
    /// The scene's call-to-action: begin, continue, the gift box or replay.
    Primary,
    Photo(usize),
    Milestone(usize),
    Next,
    Previous,
    Close,
    Background,
}

/// Logical input after the renderer has normalised touch and mouse events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Tap {
        target: TapTarget,
    },
    DoubleTap {
        x: f64,
        y: f64,
    },
    PressStart,
    PressEnd,
    /// Device orientation in degrees. Either reading may be unavailable.
    Orientation {
        #[serde(default)]
        beta: Option<f64>,
        #[serde(default)]
        gamma: Option<f64>,
    },
}

impl InputEvent {
    pub fn tap(target: TapTarget) -> Self {
        Self::Tap { target }
    }

    pub fn is_tap(&self) -> bool {
        matches!(self, Self::Tap { .. })
    }
}

/// Perspective tilt applied to the intro photo, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub const NEUTRAL: Self = Self {
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Maps an orientation reading to a tilt. Falls back to neutral when the
    /// device cannot report both axes.
    pub fn from_orientation(beta: Option<f64>, gamma: Option<f64>, factor: f64) -> Self {
        match (beta, gamma) {
            (Some(beta), Some(gamma)) if beta.is_finite() && gamma.is_finite() => Self {
                rotate_x: beta * factor,
                rotate_y: gamma * factor,
            },
            _ => Self::NEUTRAL,
        }
    }
}
