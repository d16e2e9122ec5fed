//! Launch and bounce tuning
//!
//! Supplied once at startup and immutable afterwards; components keep a copy.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning for the launch controller and the bounce arbiter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Launch ===
    /// Multiplier from drag length to launch speed
    pub launch_power: f32,
    /// Extra input scaling (per-device feel)
    pub drag_sensitivity: f32,
    /// Hard speed cap applied at launch and every step while moving
    pub max_speed: f32,

    // === Bounces ===
    /// Wall reflections granted per gesture
    pub max_bounce_count: u32,
    /// Distance from the goal center that counts as reaching it
    pub goal_radius: f32,

    /// Where the avatar sits after a reset
    pub start_position: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            launch_power: DEFAULT_LAUNCH_POWER,
            drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
            max_speed: DEFAULT_MAX_SPEED,

            max_bounce_count: DEFAULT_MAX_BOUNCE_COUNT,
            goal_radius: DEFAULT_GOAL_RADIUS,

            start_position: DEFAULT_START_POSITION,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp every scalar into a usable range.
    ///
    /// Non-finite values revert to their default, negative values become 0.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.launch_power = non_negative(self.launch_power, defaults.launch_power);
        self.drag_sensitivity = non_negative(self.drag_sensitivity, defaults.drag_sensitivity);
        self.max_speed = non_negative(self.max_speed, defaults.max_speed);
        self.goal_radius = non_negative(self.goal_radius, defaults.goal_radius);
        if !self.start_position.is_finite() {
            self.start_position = defaults.start_position;
        }
        self
    }

    /// Scale applied to drag length before the speed cap
    pub fn launch_scale(&self) -> f32 {
        self.launch_power * self.drag_sensitivity
    }
}

fn non_negative(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { fallback }
}
