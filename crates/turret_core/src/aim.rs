//! Shared aim angle and aim-slider handle geometry.
//!
//! One angle drives both the turret and the aim slider. Angles are in degrees
//! in screen space (y grows downward), so -90 points straight up and 0 points
//! right. The turret sprite is authored at an angle and needs a constant
//! offset added before rotating; the slider sprite uses the raw angle.

use glam::Vec2;

pub const AIM_MIN_DEG: f32 = -90.0;
pub const AIM_MAX_DEG: f32 = 0.0;

/// Rotation compensating for the turret sprite's drawn orientation.
pub const TURRET_SPRITE_OFFSET_DEG: f32 = 42.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AimAngle {
    degrees: f32,
}

impl AimAngle {
    pub fn from_degrees(degrees: f32) -> Self {
        let mut angle = Self::default();
        angle.set_degrees(degrees);
        angle
    }

    /// Store `degrees` clamped to the aim range. NaN input is ignored.
    pub fn set_degrees(&mut self, degrees: f32) {
        if degrees.is_nan() {
            return;
        }
        self.degrees = degrees.clamp(AIM_MIN_DEG, AIM_MAX_DEG);
    }

    pub fn degrees(self) -> f32 {
        self.degrees
    }

    /// Rotation for the aim-slider sprite.
    pub fn slider_radians(self) -> f32 {
        self.degrees.to_radians()
    }

    /// Rotation for the turret sprite and turret-fire frames.
    pub fn turret_radians(self) -> f32 {
        (self.degrees + TURRET_SPRITE_OFFSET_DEG).to_radians()
    }
}

/// Unclamped angle in degrees of `pointer` as seen from `center`.
pub fn pointer_angle_deg(center: Vec2, pointer: Vec2) -> f32 {
    let d = pointer - center;
    d.y.atan2(d.x).to_degrees()
}

/// Ring-shaped grab area around the slider's pivot.
///
/// The radius is fixed at construction from the handle's static offset, so
/// it does not follow the slider while it rotates.
#[derive(Debug, Clone, Copy)]
pub struct HandleHitArea {
    pub center: Vec2,
    pub radius: f32,
    pub tolerance: f32,
}

impl HandleHitArea {
    /// `hit_offset` shifts the ring center relative to the rotation center to
    /// line up with the drawn handle.
    pub fn new(rotation_center: Vec2, handle: Vec2, hit_offset: Vec2, tolerance: f32) -> Self {
        Self {
            center: rotation_center + hit_offset,
            radius: handle.distance(rotation_center),
            tolerance,
        }
    }

    pub fn contains(&self, pointer: Vec2) -> bool {
        (pointer.distance(self.center) - self.radius).abs() < self.tolerance
    }
}
