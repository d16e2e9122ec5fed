//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable contact order (as reported by the physics backend)
//! - No rendering or platform dependencies

pub mod arbiter;
pub mod collision;
pub mod launch;
pub mod state;
pub mod tick;

pub use arbiter::{BounceArbiter, Contact, ContactOutcome, LogNotifier, OutcomeNotifier, SurfaceTag};
pub use collision::{Arena, CollisionResult, PhysicsBackend, Segment, reflect_velocity, sweep_circle_segment};
pub use launch::{LaunchController, launch_velocity};
pub use state::{Avatar, AvatarPhase, DragGesture, Outcome};
pub use tick::{Game, TickInput};
