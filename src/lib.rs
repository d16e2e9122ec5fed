//! Bank Shot - a drag-to-launch bounce puzzle core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (launch, bounce budget, contacts, game loop)
//! - `settings`: Data-driven launch and bounce tuning

pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (50 Hz physics)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Squared speed below which the avatar is considered at rest
    pub const MOTION_EPSILON_SQ: f32 = 0.001;

    /// Launch defaults
    pub const DEFAULT_LAUNCH_POWER: f32 = 2.0;
    pub const DEFAULT_DRAG_SENSITIVITY: f32 = 1.0;
    /// Speed cap, also keeps the swept collision step short
    pub const DEFAULT_MAX_SPEED: f32 = 10.0;

    /// Bounce budget granted per gesture
    pub const DEFAULT_MAX_BOUNCE_COUNT: u32 = 3;
    pub const DEFAULT_GOAL_RADIUS: f32 = 0.5;
    pub const DEFAULT_START_POSITION: Vec2 = Vec2::new(-0.01, -4.6);

    /// Avatar collision radius used by the reference arena
    pub const AVATAR_RADIUS: f32 = 0.25;
}
