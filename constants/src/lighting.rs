use bevy::color::Color;
use bevy::math::Vec3;

/// Ambient fill, equivalent to 0x666666.
pub const AMBIENT_COLOUR: Color = Color::srgb(0.4, 0.4, 0.4);
pub const AMBIENT_BRIGHTNESS: f32 = 500.0;

/// Lux emitted per unit of relative light intensity in the rig table.
pub const ILLUMINANCE_PER_INTENSITY: f32 = 2_500.0;

/// Half extent of the orthographic shadow frustum on every axis.
pub const SHADOW_FRUSTUM_EXTENT: f32 = 50.0;

/// Shadow map resolution shared by all shadow casting lights.
pub const SHADOW_MAP_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLightSpec {
    pub position: Vec3,
    pub intensity: f32,
    pub casts_shadows: bool,
}

/// Five white key/fill lights aimed at the origin.
pub const LIGHT_RIG: [DirectionalLightSpec; 5] = [
    DirectionalLightSpec {
        position: Vec3::new(0.0, 5.0, 0.0),
        intensity: 2.0,
        casts_shadows: true,
    },
    DirectionalLightSpec {
        position: Vec3::new(-5.0, 3.0, 2.0),
        intensity: 2.0,
        casts_shadows: false,
    },
    DirectionalLightSpec {
        position: Vec3::new(5.0, 3.0, 2.0),
        intensity: 2.0,
        casts_shadows: true,
    },
    DirectionalLightSpec {
        position: Vec3::new(0.0, 3.0, 5.0),
        intensity: 1.0,
        casts_shadows: true,
    },
    DirectionalLightSpec {
        position: Vec3::new(0.0, 3.0, -5.0),
        intensity: 2.0,
        casts_shadows: false,
    },
];
