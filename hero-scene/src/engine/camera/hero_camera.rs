use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;
use bevy::render::camera::ClearColorConfig;
use bevy::render::view::Msaa;
use constants::camera::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION};

use crate::engine::viewport::state::ViewportState;

#[derive(Component)]
pub struct HeroCamera;

pub fn hero_projection(aspect_ratio: f32) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        aspect_ratio,
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
    }
}

/// Perspective camera with a transparent clear, 4x MSAA, soft shadows and no
/// tone mapping. Inactive until the first model is in the scene.
pub fn spawn_hero_camera(mut commands: Commands, viewport: Res<ViewportState>) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            is_active: false,
            clear_color: ClearColorConfig::Custom(Color::NONE),
            ..default()
        },
        Projection::Perspective(hero_projection(viewport.aspect_ratio())),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        Msaa::Sample4,
        Tonemapping::None,
        ShadowFilteringMethod::Gaussian,
        HeroCamera,
    ));
}

/// Recompute the projection for a new viewport.
pub fn update_camera_aspect(projection: &mut Projection, viewport: &ViewportState) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = viewport.aspect_ratio();
    }
}

pub fn activate_hero_camera(mut cameras: Query<&mut Camera, With<HeroCamera>>) {
    for mut camera in &mut cameras {
        camera.is_active = true;
    }
}
