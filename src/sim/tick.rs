//! Fixed timestep simulation tick
//!
//! One tick is strictly ordered: input, reset, integration, contacts, then
//! speed clamp and goal proximity.

use glam::Vec2;

use super::arbiter::{BounceArbiter, Contact, ContactOutcome, OutcomeNotifier};
use super::collision::PhysicsBackend;
use super::launch::LaunchController;
use super::state::{Avatar, Outcome};
use crate::Settings;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer pressed this tick (world space)
    pub pointer_down: Option<Vec2>,
    /// Pointer released this tick (world space)
    pub pointer_up: Option<Vec2>,
    /// Reset key pressed this tick
    pub reset: bool,
}

/// A launch-and-bounce course: avatar, rules and physics
pub struct Game<N, P> {
    avatar: Avatar,
    goal: Option<Vec2>,
    launcher: LaunchController,
    arbiter: BounceArbiter<N>,
    physics: P,
    /// Simulation tick counter
    time_ticks: u64,
    /// Scratch buffer reused across ticks
    contacts: Vec<Contact>,
}

impl<N: OutcomeNotifier, P: PhysicsBackend> Game<N, P> {
    pub fn new(settings: Settings, notifier: N, physics: P, goal: Option<Vec2>) -> Self {
        let launcher = LaunchController::new(settings);
        let mut avatar = Avatar::new(settings.start_position, settings.max_bounce_count);
        launcher.reset(&mut avatar);
        Self {
            avatar,
            goal,
            launcher,
            arbiter: BounceArbiter::new(settings.goal_radius, notifier),
            physics,
            time_ticks: 0,
            contacts: Vec::new(),
        }
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn settings(&self) -> &Settings {
        self.launcher.settings()
    }

    pub fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn notifier(&self) -> &N {
        self.arbiter.notifier()
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.avatar.outcome()
    }

    /// Abort any drag or motion and return to the start
    pub fn reset(&mut self) {
        self.launcher.reset(&mut self.avatar);
        self.physics.clear_contacts();
        log::info!("Avatar reset");
    }

    /// Advance the game by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.time_ticks += 1;

        if let Some(pointer) = input.pointer_down {
            self.launcher.begin_drag(&mut self.avatar, pointer);
        }
        if let Some(pointer) = input.pointer_up {
            self.launcher.end_drag(&mut self.avatar, pointer);
        }
        if input.reset {
            self.reset();
        }

        if !self.avatar.is_moving() {
            return;
        }

        self.contacts.clear();
        self.physics
            .integrate(&mut self.avatar.pos, self.avatar.vel, dt, &mut self.contacts);

        for contact in &self.contacts {
            // Later contacts are moot once one ends the episode
            if let ContactOutcome::Finished(_) = self.arbiter.on_contact(&mut self.avatar, contact) {
                break;
            }
        }

        self.launcher.limit_speed(&mut self.avatar);
        self.arbiter.check_goal(&mut self.avatar, self.goal);
    }
}
