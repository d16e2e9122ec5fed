//! Collision detection for the reference arena
//!
//! The gameplay rules never integrate motion themselves; they go through
//! `PhysicsBackend`. `Arena` is a small zero-gravity backend built from
//! tagged line segments, swept so fast shots cannot tunnel through thin walls.

use glam::Vec2;

use super::arbiter::{Contact, SurfaceTag};

/// Gap kept between the avatar and a surface after a hit
const SKIN: f32 = 1e-3;
/// Hits this close in time are reported together
const SIMULTANEOUS_T: f32 = 1e-4;
/// Minimum cosine between the entry direction and the current one for a
/// contact to still count as the same pass-through
const SAME_DIRECTION_COS: f32 = 1.0 - 1e-4;

/// Motion integration and contact detection
pub trait PhysicsBackend {
    /// Advance `pos` by `vel * dt`, pushing any contacts entered on the way
    /// in arrival order.
    fn integrate(&mut self, pos: &mut Vec2, vel: Vec2, dt: f32, contacts: &mut Vec<Contact>);

    /// Forget any persistent contact state (called on reset)
    fn clear_contacts(&mut self) {}
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Fraction of the motion travelled before impact (0..=1)
    pub toi: f32,
    /// Avatar center at impact
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            toi: 1.0,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
        }
    }

    /// Keep whichever of two results hits first
    fn earliest(self, other: Self) -> Self {
        match (self.hit, other.hit) {
            (true, true) if other.toi < self.toi => other,
            (false, true) => other,
            _ => self,
        }
    }
}

/// A static, two-sided line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub surface: SurfaceTag,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, surface: SurfaceTag) -> Self {
        Self { a, b, surface }
    }

    /// Distance from `p` to the closest point on the segment
    pub fn distance_to(&self, p: Vec2) -> f32 {
        let line = self.b - self.a;
        let len_sq = line.length_squared();
        if len_sq < 1e-8 {
            return p.distance(self.a);
        }
        let t = ((p - self.a).dot(line) / len_sq).clamp(0.0, 1.0);
        p.distance(self.a + line * t)
    }
}

/// Sweep a circle moving by `motion` against a segment.
///
/// The face and both end caps are swept; the earliest hit wins.
pub fn sweep_circle_segment(pos: Vec2, radius: f32, motion: Vec2, seg: &Segment) -> CollisionResult {
    let face = sweep_circle_face(pos, radius, motion, seg);
    let start = sweep_circle_point(pos, radius, motion, seg.a);
    let end = sweep_circle_point(pos, radius, motion, seg.b);
    face.earliest(start).earliest(end)
}

/// Sweep against the flat face only (hits whose center projects inside the segment)
fn sweep_circle_face(pos: Vec2, radius: f32, motion: Vec2, seg: &Segment) -> CollisionResult {
    let line = seg.b - seg.a;
    let len_sq = line.length_squared();
    if len_sq < 1e-8 {
        return CollisionResult::miss(); // Degenerate segment, caps cover it
    }

    // Face normal on the avatar's side
    let mut normal = line.perp().normalize();
    let mut side = (pos - seg.a).dot(normal);
    if side < 0.0 {
        normal = -normal;
        side = -side;
    }

    let approach = -motion.dot(normal);
    if approach <= 0.0 {
        return CollisionResult::miss(); // Parallel or moving away
    }

    let toi = ((side - radius) / approach).max(0.0);
    if toi > 1.0 {
        return CollisionResult::miss();
    }

    let center = pos + motion * toi;
    let u = (center - seg.a).dot(line) / len_sq;
    if !(0.0..=1.0).contains(&u) {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        toi,
        point: center,
        normal,
    }
}

/// Sweep a circle against a single point (a segment end cap)
fn sweep_circle_point(pos: Vec2, radius: f32, motion: Vec2, point: Vec2) -> CollisionResult {
    let offset = pos - point;
    let a = motion.length_squared();
    let b = offset.dot(motion);
    let c = offset.length_squared() - radius * radius;

    if a < 1e-12 || b >= 0.0 {
        return CollisionResult::miss(); // Not moving, or moving away
    }

    let toi = if c <= 0.0 {
        0.0 // Already overlapping
    } else {
        let disc = b * b - a * c;
        if disc < 0.0 {
            return CollisionResult::miss();
        }
        (-b - disc.sqrt()) / a
    };
    if toi > 1.0 {
        return CollisionResult::miss();
    }

    let center = pos + motion * toi;
    let normal = (center - point).normalize_or_zero();
    if normal == Vec2::ZERO {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        toi,
        point: center,
        normal,
    }
}

/// A segment the avatar is currently in contact with
#[derive(Debug, Clone, Copy)]
struct Touch {
    index: usize,
    /// Contact normal when the touch began
    normal: Vec2,
    /// Travel direction when the touch began
    entry_dir: Vec2,
    /// Still travelling into the segment unchanged (a pass-through)
    crossing: bool,
}

/// Zero-gravity course of tagged segments with continuous detection.
///
/// A segment is reported once when the avatar reaches it. While the avatar
/// keeps moving through it unchanged it is not reported again; once the
/// contact turned the avatar around, the segment is swept like any other.
#[derive(Debug, Clone)]
pub struct Arena {
    pub segments: Vec<Segment>,
    pub avatar_radius: f32,
    touching: Vec<Touch>,
}

impl Arena {
    pub fn new(avatar_radius: f32) -> Self {
        Self {
            segments: Vec::new(),
            avatar_radius,
            touching: Vec::new(),
        }
    }

    pub fn with_segment(mut self, a: Vec2, b: Vec2, surface: SurfaceTag) -> Self {
        self.segments.push(Segment::new(a, b, surface));
        self
    }

    /// Rectangular course centered on the origin, walled with `surface`
    pub fn boxed(half_extents: Vec2, avatar_radius: f32, surface: SurfaceTag) -> Self {
        let (w, h) = (half_extents.x, half_extents.y);
        let corners = [
            Vec2::new(-w, -h),
            Vec2::new(w, -h),
            Vec2::new(w, h),
            Vec2::new(-w, h),
        ];
        let mut arena = Self::new(avatar_radius);
        for i in 0..corners.len() {
            let next = corners[(i + 1) % corners.len()];
            arena.segments.push(Segment::new(corners[i], next, surface));
        }
        arena
    }

    pub fn is_touching(&self, index: usize) -> bool {
        self.touching.iter().any(|t| t.index == index)
    }

    fn is_crossing(&self, index: usize) -> bool {
        self.touching.iter().any(|t| t.index == index && t.crossing)
    }

    fn begin_touch(&mut self, index: usize, normal: Vec2, dir: Vec2) {
        let touch = Touch {
            index,
            normal,
            entry_dir: dir,
            crossing: true,
        };
        match self.touching.iter_mut().find(|t| t.index == index) {
            Some(existing) => *existing = touch,
            None => self.touching.push(touch),
        }
    }
}

impl PhysicsBackend for Arena {
    fn integrate(&mut self, pos: &mut Vec2, vel: Vec2, dt: f32, contacts: &mut Vec<Contact>) {
        // Separation ends a contact
        let release = self.avatar_radius + 2.0 * SKIN;
        let segments = &self.segments;
        self.touching
            .retain(|t| segments.get(t.index).is_some_and(|s| s.distance_to(*pos) <= release));

        let motion = vel * dt;
        if motion.length_squared() == 0.0 {
            return;
        }

        // A touch stays a pass-through only while the avatar keeps its entry
        // direction and still heads into the surface
        let dir = motion.normalize();
        for touch in &mut self.touching {
            if dir.dot(touch.entry_dir) < SAME_DIRECTION_COS || motion.dot(touch.normal) >= 0.0 {
                touch.crossing = false;
            }
        }

        let hits: Vec<(usize, CollisionResult)> = self
            .segments
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_crossing(*i))
            .map(|(i, seg)| (i, sweep_circle_segment(*pos, self.avatar_radius, motion, seg)))
            .filter(|(_, result)| result.hit)
            .collect();

        let Some(first) = hits.iter().map(|(_, r)| r.toi).reduce(f32::min) else {
            *pos += motion;
            return;
        };

        // Stop just short of the surface
        let back_off = SKIN / motion.length();
        *pos += motion * (first - back_off).max(0.0);

        for (i, result) in hits {
            if result.toi <= first + SIMULTANEOUS_T {
                contacts.push(Contact {
                    surface: self.segments[i].surface,
                    normal: result.normal,
                    point: result.point - result.normal * self.avatar_radius,
                });
                self.begin_touch(i, result.normal, dir);
            }
        }
    }

    fn clear_contacts(&mut self) {
        self.touching.clear();
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
