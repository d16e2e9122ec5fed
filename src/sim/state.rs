//! Avatar state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where the avatar is in its launch/bounce episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvatarPhase {
    /// At rest, accepting drag input
    #[default]
    Idle,
    /// Launched and travelling
    Moving,
    /// Reached the goal with the budget spent (absorbing until reset)
    Won,
    /// Hit a wall with the budget spent (absorbing until reset)
    Lost,
}

impl AvatarPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, AvatarPhase::Won | AvatarPhase::Lost)
    }
}

/// Terminal result of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for AvatarPhase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => AvatarPhase::Won,
            Outcome::Lost => AvatarPhase::Lost,
        }
    }
}

/// An in-progress pointer drag (world space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    pub start: Vec2,
}

/// The launched avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub pos: Vec2,
    pub vel: Vec2,
    pub phase: AvatarPhase,
    /// Present only between pointer-down and pointer-up while idle
    pub drag: Option<DragGesture>,
    /// Remaining wall reflections, never above the configured maximum
    pub bounces_left: u32,
}

impl Avatar {
    /// A resting avatar at `pos` with a full bounce budget
    pub fn new(pos: Vec2, max_bounces: u32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            phase: AvatarPhase::Idle,
            drag: None,
            bounces_left: max_bounces,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.phase == AvatarPhase::Moving
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == AvatarPhase::Idle
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            AvatarPhase::Won => Some(Outcome::Won),
            AvatarPhase::Lost => Some(Outcome::Lost),
            AvatarPhase::Idle | AvatarPhase::Moving => None,
        }
    }

    /// Zero the velocity and enter a terminal phase
    pub(crate) fn stop(&mut self, outcome: Outcome) {
        self.vel = Vec2::ZERO;
        self.phase = outcome.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_avatar_is_idle_with_full_budget() {
        let avatar = Avatar::new(Vec2::new(1.0, 2.0), 3);
        assert!(avatar.is_idle());
        assert!(!avatar.is_moving());
        assert!(!avatar.is_dragging());
        assert_eq!(avatar.bounces_left, 3);
        assert_eq!(avatar.vel, Vec2::ZERO);
        assert_eq!(avatar.outcome(), None);
    }

    #[test]
    fn test_stop_enters_terminal_phase() {
        let mut avatar = Avatar::new(Vec2::ZERO, 0);
        avatar.phase = AvatarPhase::Moving;
        avatar.vel = Vec2::new(3.0, -1.0);

        avatar.stop(Outcome::Lost);
        assert_eq!(avatar.vel, Vec2::ZERO);
        assert_eq!(avatar.phase, AvatarPhase::Lost);
        assert!(avatar.phase.is_terminal());
        assert_eq!(avatar.outcome(), Some(Outcome::Lost));
    }
}
