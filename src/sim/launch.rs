//! Drag-to-launch input handling
//!
//! Pulling back from the press point launches the avatar the opposite way,
//! with speed proportional to the drag length and capped at `max_speed`.

use glam::Vec2;

use super::state::{Avatar, AvatarPhase, DragGesture};
use crate::Settings;
use crate::consts::MOTION_EPSILON_SQ;

/// Compute the launch velocity for a drag from `start` to `end`.
///
/// Returns `None` for a degenerate drag (zero length) or when the applied
/// speed would be too small to count as motion.
pub fn launch_velocity(start: Vec2, end: Vec2, settings: &Settings) -> Option<Vec2> {
    let pull = start - end;
    let direction = pull.try_normalize()?;
    let raw = pull.length();

    // Not f32::clamp: it panics on NaN bounds
    let speed = (raw * settings.launch_scale()).max(0.0).min(settings.max_speed);
    if speed * speed <= MOTION_EPSILON_SQ {
        return None;
    }
    Some(direction * speed)
}

/// Owns the avatar's launch and reset transitions
#[derive(Debug, Clone)]
pub struct LaunchController {
    settings: Settings,
}

impl LaunchController {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Pointer pressed. Ignored unless the avatar is idle.
    ///
    /// A fresh gesture restores the full bounce budget.
    pub fn begin_drag(&self, avatar: &mut Avatar, pointer: Vec2) -> bool {
        if !avatar.is_idle() {
            return false;
        }
        avatar.drag = Some(DragGesture { start: pointer });
        avatar.bounces_left = self.settings.max_bounce_count;
        log::debug!("Drag started at ({:.2}, {:.2})", pointer.x, pointer.y);
        true
    }

    /// Pointer released. Launches if a drag is in progress and idle.
    ///
    /// Returns the launch velocity. The drag is consumed even when the
    /// gesture is too short to launch.
    pub fn end_drag(&self, avatar: &mut Avatar, pointer: Vec2) -> Option<Vec2> {
        if !avatar.is_idle() {
            return None;
        }
        let drag = avatar.drag.take()?;

        match launch_velocity(drag.start, pointer, &self.settings) {
            Some(vel) => {
                avatar.vel = vel;
                avatar.phase = AvatarPhase::Moving;
                log::info!(
                    "Launched at speed {:.2} with {} bounces",
                    vel.length(),
                    avatar.bounces_left
                );
                Some(vel)
            }
            None => {
                log::debug!("Drag too short, no launch");
                None
            }
        }
    }

    /// Return the avatar to its start position, at rest, with a full budget.
    ///
    /// Aborts any drag or motion and clears a terminal outcome.
    pub fn reset(&self, avatar: &mut Avatar) {
        *avatar = Avatar::new(self.settings.start_position, self.settings.max_bounce_count);
    }

    /// Rescale the velocity down to `max_speed` while moving
    pub fn limit_speed(&self, avatar: &mut Avatar) {
        if !avatar.is_moving() {
            return;
        }
        let max = self.settings.max_speed;
        if avatar.vel.length_squared() > max * max {
            avatar.vel = avatar.vel.clamp_length_max(max);
            log::debug!("Speed clamped to {:.2}", max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings() -> Settings {
        Settings {
            launch_power: 2.0,
            drag_sensitivity: 1.0,
            max_speed: 10.0,
            max_bounce_count: 3,
            ..Default::default()
        }
    }

    fn idle_avatar(s: &Settings) -> Avatar {
        Avatar::new(s.start_position, s.max_bounce_count)
    }

    #[test]
    fn test_drag_back_launches_forward() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);

        assert!(ctl.begin_drag(&mut avatar, Vec2::new(0.0, 0.0)));
        let vel = ctl.end_drag(&mut avatar, Vec2::new(-1.0, 0.0));

        assert_eq!(vel, Some(Vec2::new(2.0, 0.0)));
        assert_eq!(avatar.vel, Vec2::new(2.0, 0.0));
        assert!(avatar.is_moving());
        assert!(!avatar.is_dragging());
    }

    #[test]
    fn test_long_drag_is_capped() {
        let s = settings();
        let vel = launch_velocity(Vec2::ZERO, Vec2::new(0.0, -100.0), &s).unwrap();
        assert!((vel.length() - 10.0).abs() < 1e-5);
        assert!(vel.y > 0.0);
    }

    #[test]
    fn test_zero_length_drag_does_not_launch() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);

        ctl.begin_drag(&mut avatar, Vec2::new(1.0, 1.0));
        assert_eq!(ctl.end_drag(&mut avatar, Vec2::new(1.0, 1.0)), None);
        assert!(avatar.is_idle());
        assert_eq!(avatar.vel, Vec2::ZERO);
        assert!(!avatar.is_dragging());
    }

    #[test]
    fn test_zero_power_does_not_launch() {
        let s = Settings {
            launch_power: 0.0,
            ..settings()
        };
        assert_eq!(launch_velocity(Vec2::ZERO, Vec2::new(-5.0, 0.0), &s), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);

        assert_eq!(ctl.end_drag(&mut avatar, Vec2::new(-1.0, 0.0)), None);
        assert!(avatar.is_idle());
    }

    #[test]
    fn test_input_ignored_while_moving() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);
        avatar.phase = AvatarPhase::Moving;
        avatar.vel = Vec2::new(1.0, 0.0);
        avatar.bounces_left = 1;

        assert!(!ctl.begin_drag(&mut avatar, Vec2::ZERO));
        assert_eq!(avatar.bounces_left, 1);
        assert_eq!(ctl.end_drag(&mut avatar, Vec2::new(-3.0, 0.0)), None);
        assert_eq!(avatar.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_input_ignored_after_outcome() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);
        avatar.phase = AvatarPhase::Won;

        assert!(!ctl.begin_drag(&mut avatar, Vec2::ZERO));
        assert!(!avatar.is_dragging());
    }

    #[test]
    fn test_begin_drag_restores_budget() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);
        avatar.bounces_left = 0;

        ctl.begin_drag(&mut avatar, Vec2::ZERO);
        assert_eq!(avatar.bounces_left, 3);
    }

    #[test]
    fn test_limit_speed_only_while_moving() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);
        avatar.vel = Vec2::new(30.0, 40.0);

        ctl.limit_speed(&mut avatar);
        assert_eq!(avatar.vel, Vec2::new(30.0, 40.0));

        avatar.phase = AvatarPhase::Moving;
        ctl.limit_speed(&mut avatar);
        assert!((avatar.vel.length() - 10.0).abs() < 1e-4);
        assert!((avatar.vel.x - 6.0).abs() < 1e-4);
        assert!((avatar.vel.y - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let s = settings();
        let ctl = LaunchController::new(s);
        let mut avatar = idle_avatar(&s);
        avatar.pos = Vec2::new(3.0, 3.0);
        avatar.phase = AvatarPhase::Lost;

        ctl.reset(&mut avatar);
        let once = avatar.clone();
        ctl.reset(&mut avatar);
        assert_eq!(avatar, once);
    }

    fn arb_phase() -> impl Strategy<Value = AvatarPhase> {
        prop_oneof![
            Just(AvatarPhase::Idle),
            Just(AvatarPhase::Moving),
            Just(AvatarPhase::Won),
            Just(AvatarPhase::Lost),
        ]
    }

    proptest! {
        #[test]
        fn prop_launch_speed_never_exceeds_cap(
            sx in -50.0f32..50.0, sy in -50.0f32..50.0,
            ex in -50.0f32..50.0, ey in -50.0f32..50.0,
            power in 0.0f32..20.0,
            sensitivity in 0.0f32..5.0,
            max_speed in 0.0f32..30.0,
        ) {
            let s = Settings {
                launch_power: power,
                drag_sensitivity: sensitivity,
                max_speed,
                ..Default::default()
            };
            if let Some(vel) = launch_velocity(Vec2::new(sx, sy), Vec2::new(ex, ey), &s) {
                prop_assert!(vel.length() <= max_speed * (1.0 + 1e-5));
            }
        }

        #[test]
        fn prop_reset_restores_start_state(
            px in -10.0f32..10.0, py in -10.0f32..10.0,
            vx in -10.0f32..10.0, vy in -10.0f32..10.0,
            bounces in 0u32..=3,
            dragging in any::<bool>(),
            phase in arb_phase(),
        ) {
            let s = settings();
            let ctl = LaunchController::new(s);
            let mut avatar = Avatar {
                pos: Vec2::new(px, py),
                vel: Vec2::new(vx, vy),
                phase,
                drag: dragging.then_some(DragGesture { start: Vec2::ZERO }),
                bounces_left: bounces,
            };

            ctl.reset(&mut avatar);
            prop_assert_eq!(avatar.pos, s.start_position);
            prop_assert_eq!(avatar.vel, Vec2::ZERO);
            prop_assert_eq!(avatar.bounces_left, s.max_bounce_count);
            prop_assert!(avatar.is_idle());
            prop_assert!(!avatar.is_dragging());
        }
    }
}
