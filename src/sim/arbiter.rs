//! Contact resolution against the bounce budget
//!
//! Every contact is judged on the surface it hit and on whether any
//! reflections remain. Once the budget is spent the next wall, invisible
//! wall or goal ends the episode.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::reflect_velocity;
use super::state::{Avatar, Outcome};

/// Classification of static geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SurfaceTag {
    /// Solid boundary: reflects while bounces remain
    Wall,
    /// Passable boundary that only matters once the budget is spent
    InvisibleWall,
    /// Target zone
    Goal,
    /// Anything the arbiter has no rule for
    #[default]
    Other,
}

/// A contact reported by the physics backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub surface: SurfaceTag,
    /// Unit normal pointing away from the surface, toward the avatar
    pub normal: Vec2,
    /// Contact point in world space
    pub point: Vec2,
}

/// What a contact or proximity check did to the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Velocity mirrored about the normal; `remaining` bounces left
    Reflected { remaining: u32 },
    /// Contact noted, motion continues unchanged
    PassedThrough,
    /// Episode ended
    Finished(Outcome),
    /// Contact had no effect (avatar not moving, or untagged surface)
    Ignored,
}

/// Receives terminal episode results
pub trait OutcomeNotifier {
    fn on_win(&mut self);
    fn on_lose(&mut self);
}

impl<N: OutcomeNotifier + ?Sized> OutcomeNotifier for &mut N {
    fn on_win(&mut self) {
        (**self).on_win();
    }

    fn on_lose(&mut self) {
        (**self).on_lose();
    }
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl OutcomeNotifier for LogNotifier {
    fn on_win(&mut self) {
        log::info!("Stage clear!");
    }

    fn on_lose(&mut self) {
        log::info!("Game over!");
    }
}

/// Resolves contacts and goal proximity against the avatar's bounce budget
#[derive(Debug)]
pub struct BounceArbiter<N> {
    goal_radius: f32,
    notifier: N,
}

impl<N: OutcomeNotifier> BounceArbiter<N> {
    pub fn new(goal_radius: f32, notifier: N) -> Self {
        Self {
            goal_radius,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Apply one contact to a moving avatar
    pub fn on_contact(&mut self, avatar: &mut Avatar, contact: &Contact) -> ContactOutcome {
        if !avatar.is_moving() {
            return ContactOutcome::Ignored;
        }
        let exhausted = avatar.bounces_left == 0;

        match contact.surface {
            SurfaceTag::Wall if exhausted => self.finish(avatar, Outcome::Lost),
            SurfaceTag::Wall => {
                let normal = contact.normal.normalize_or_zero();
                avatar.vel = reflect_velocity(avatar.vel, normal);
                avatar.bounces_left -= 1;
                log::debug!("Wall bounce, {} left", avatar.bounces_left);
                ContactOutcome::Reflected {
                    remaining: avatar.bounces_left,
                }
            }
            SurfaceTag::InvisibleWall if exhausted => self.finish(avatar, Outcome::Lost),
            SurfaceTag::InvisibleWall => ContactOutcome::PassedThrough,
            SurfaceTag::Goal if exhausted => self.finish(avatar, Outcome::Won),
            SurfaceTag::Goal => {
                log::debug!(
                    "Goal touched with {} bounces left, passing through",
                    avatar.bounces_left
                );
                ContactOutcome::PassedThrough
            }
            SurfaceTag::Other => ContactOutcome::Ignored,
        }
    }

    /// Distance-based goal check, run every step while moving.
    ///
    /// Wins only with the budget spent; a missing goal skips the check.
    pub fn check_goal(&mut self, avatar: &mut Avatar, goal: Option<Vec2>) -> ContactOutcome {
        let Some(goal) = goal else {
            return ContactOutcome::Ignored;
        };
        if !avatar.is_moving() || avatar.pos.distance(goal) >= self.goal_radius {
            return ContactOutcome::Ignored;
        }
        if avatar.bounces_left > 0 {
            return ContactOutcome::PassedThrough;
        }
        self.finish(avatar, Outcome::Won)
    }

    fn finish(&mut self, avatar: &mut Avatar, outcome: Outcome) -> ContactOutcome {
        avatar.stop(outcome);
        match outcome {
            Outcome::Won => self.notifier.on_win(),
            Outcome::Lost => self.notifier.on_lose(),
        }
        ContactOutcome::Finished(outcome)
    }
}
