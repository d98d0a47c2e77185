use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{KeepsakeError, Result};

/// Top-level configuration structure for the presentation.
///
/// Loaded once at startup. Every field has a default, so a config file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
}

impl AppConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.timing.validate()?;
        self.layout.validate()
    }
}

/// Fixed delays driving the scenes, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub scene_transition_ms: u64,
    pub intro_reveal_ms: u64,
    pub carousel_interval_ms: u64,
    pub gift_ribbon_ms: u64,
    pub gift_burst_ms: u64,
    pub finale_lantern_ms: u64,
    pub long_press_ms: u64,
    pub easter_egg_dismiss_ms: u64,
    pub heart_burst_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scene_transition_ms: 800,
            intro_reveal_ms: 5_000,
            carousel_interval_ms: 3_000,
            gift_ribbon_ms: 2_000,
            gift_burst_ms: 2_000,
            finale_lantern_ms: 2_000,
            long_press_ms: 3_000,
            easter_egg_dismiss_ms: 5_000,
            heart_burst_ms: 1_000,
        }
    }
}

impl TimingConfig {
    pub fn scene_transition(&self) -> Duration {
        Duration::from_millis(self.scene_transition_ms)
    }

    pub fn intro_reveal(&self) -> Duration {
        Duration::from_millis(self.intro_reveal_ms)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn gift_ribbon(&self) -> Duration {
        Duration::from_millis(self.gift_ribbon_ms)
    }

    pub fn gift_burst(&self) -> Duration {
        Duration::from_millis(self.gift_burst_ms)
    }

    pub fn finale_lantern(&self) -> Duration {
        Duration::from_millis(self.finale_lantern_ms)
    }

    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn easter_egg_dismiss(&self) -> Duration {
        Duration::from_millis(self.easter_egg_dismiss_ms)
    }

    pub fn heart_burst(&self) -> Duration {
        Duration::from_millis(self.heart_burst_ms)
    }

    fn validate(&self) -> Result<()> {
        let checks = [
            (self.intro_reveal_ms, "timing.intro_reveal_ms must be non-zero"),
            (
                self.carousel_interval_ms,
                "timing.carousel_interval_ms must be non-zero",
            ),
            (self.gift_ribbon_ms, "timing.gift_ribbon_ms must be non-zero"),
            (self.gift_burst_ms, "timing.gift_burst_ms must be non-zero"),
            (
                self.finale_lantern_ms,
                "timing.finale_lantern_ms must be non-zero",
            ),
            (self.long_press_ms, "timing.long_press_ms must be non-zero"),
            (
                self.easter_egg_dismiss_ms,
                "timing.easter_egg_dismiss_ms must be non-zero",
            ),
            (self.heart_burst_ms, "timing.heart_burst_ms must be non-zero"),
        ];

        for (value, message) in checks {
            if value == 0 {
                return Err(KeepsakeError::InvalidInput(message));
            }
        }
        Ok(())
    }
}

/// Geometry and decoration parameters consumed by the layout functions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub orbit_radius: f64,
    pub burst_particles: usize,
    pub burst_distance: f64,
    /// Maximum absolute rotation jitter, in degrees, applied to heart photos.
    pub heart_jitter_degrees: f64,
    /// Multiplier from device orientation degrees to scene tilt degrees.
    pub tilt_factor: f64,
    pub mini_hearts_per_tap: usize,
    pub mini_heart_spread: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 150.0,
            burst_particles: 30,
            burst_distance: 200.0,
            heart_jitter_degrees: 15.0,
            tilt_factor: 0.1,
            mini_hearts_per_tap: 10,
            mini_heart_spread: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Upper bound on particles spawned by one gift burst or one double tap.
    pub const MAX_PARTICLES: usize = 500;

    fn validate(&self) -> Result<()> {
        let reals = [
            self.orbit_radius,
            self.burst_distance,
            self.heart_jitter_degrees,
            self.tilt_factor,
            self.mini_heart_spread,
        ];
        if reals.iter().any(|value| !value.is_finite()) {
            return Err(KeepsakeError::InvalidInput(
                "layout values must be finite numbers",
            ));
        }
        if self.burst_particles > Self::MAX_PARTICLES
            || self.mini_hearts_per_tap > Self::MAX_PARTICLES
        {
            return Err(KeepsakeError::InvalidInput(
                "layout particle counts must not exceed 500",
            ));
        }
        if !(self.orbit_radius > 0.0) {
            return Err(KeepsakeError::InvalidInput(
                "layout.orbit_radius must be positive",
            ));
        }
        if !(self.burst_distance > 0.0) {
            return Err(KeepsakeError::InvalidInput(
                "layout.burst_distance must be positive",
            ));
        }
        if !(self.heart_jitter_degrees >= 0.0) || !(self.mini_heart_spread >= 0.0) {
            return Err(KeepsakeError::InvalidInput(
                "layout jitter ranges must not be negative",
            ));
        }
        Ok(())
    }
}
