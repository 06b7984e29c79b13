use bevy::math::EulerRot;
use bevy::prelude::*;

use crate::engine::assets::hero_manifest::ModelTransform;

/// A model resolved for the current device class, ready to load and place.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSpec {
    /// Position in the manifest.
    pub index: usize,
    pub id: String,
    pub path: String,
    pub transform: ModelTransform,
}

impl AssetSpec {
    /// Transform applied to the loaded scene root.
    pub fn to_transform(&self) -> Transform {
        let [sx, sy, sz] = self.transform.scale;
        let [px, py, pz] = self.transform.position;
        let [rx, ry, rz] = self.transform.rotation;

        Transform {
            translation: Vec3::new(px, py, pz),
            rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            scale: Vec3::new(sx, sy, sz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_carries_scale_position_rotation() {
        let spec = AssetSpec {
            index: 0,
            id: "ice".to_string(),
            path: "obj/ice.glb".to_string(),
            transform: ModelTransform {
                scale: [0.7, 0.7, 0.7],
                position: [5.0, 2.0, 1.0],
                rotation: [0.0, std::f32::consts::FRAC_PI_2, 0.0],
            },
        };

        let transform = spec.to_transform();
        assert_eq!(transform.scale, Vec3::splat(0.7));
        assert_eq!(transform.translation, Vec3::new(5.0, 2.0, 1.0));
        let rotated = transform.rotation * Vec3::X;
        assert!((rotated - Vec3::NEG_Z).length() < 1e-5);
    }
}
