use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Camera sits on the +Z axis looking back at the origin.
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 9.0);
