use bevy::pbr::{CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS, AMBIENT_COLOUR, DirectionalLightSpec, ILLUMINANCE_PER_INTENSITY,
    LIGHT_RIG, SHADOW_FRUSTUM_EXTENT, SHADOW_MAP_SIZE,
};

/// Index of a light in the rig table.
#[derive(Component, Debug, Clone, Copy)]
pub struct HeroLight(pub usize);

/// Ambient fill plus the five directional lights of the rig.
pub fn spawn_lighting(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });
    commands.insert_resource(DirectionalLightShadowMap {
        size: SHADOW_MAP_SIZE,
    });

    for (index, spec) in LIGHT_RIG.iter().enumerate() {
        spawn_directional_light(&mut commands, index, spec);
    }
    info!("Lighting rig spawned ({} directional lights)", LIGHT_RIG.len());
}

fn spawn_directional_light(commands: &mut Commands, index: usize, spec: &DirectionalLightSpec) {
    let mut light = commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: spec.intensity * ILLUMINANCE_PER_INTENSITY,
            shadows_enabled: spec.casts_shadows,
            ..default()
        },
        Transform::from_translation(spec.position).looking_at(Vec3::ZERO, Vec3::Y),
        HeroLight(index),
    ));

    // Single cascade covering the ±50 box around the models.
    if spec.casts_shadows {
        light.insert(
            CascadeShadowConfigBuilder {
                num_cascades: 1,
                minimum_distance: 0.1,
                maximum_distance: SHADOW_FRUSTUM_EXTENT * 2.0,
                first_cascade_far_bound: SHADOW_FRUSTUM_EXTENT * 2.0,
                overlap_proportion: 0.0,
            }
            .build(),
        );
    }
}
