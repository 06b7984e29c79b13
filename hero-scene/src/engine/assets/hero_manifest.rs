use std::collections::HashSet;

use bevy::prelude::*;
use constants::models::{BUILTIN_MODELS, TransformTable};
use serde::{Deserialize, Serialize};

use crate::engine::assets::asset_spec::AssetSpec;
use crate::engine::viewport::state::DeviceClass;
use crate::error::HeroError;

/// Scale, position and rotation (radians, XYZ order) of a model root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelTransform {
    pub scale: [f32; 3],
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
}

impl From<TransformTable> for ModelTransform {
    fn from(table: TransformTable) -> Self {
        Self {
            scale: table.scale,
            position: table.position,
            rotation: table.rotation,
        }
    }
}

impl ModelTransform {
    fn non_finite_field(&self) -> Option<&'static str> {
        let finite = |values: &[f32; 3]| values.iter().all(|v| v.is_finite());
        if !finite(&self.scale) {
            Some("scale")
        } else if !finite(&self.position) {
            Some("position")
        } else if !finite(&self.rotation) {
            Some("rotation")
        } else {
            None
        }
    }
}

/// One manifest row: a glTF file and its placement per device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub path: String,
    pub mobile: ModelTransform,
    pub desktop: ModelTransform,
}

impl ModelEntry {
    /// Placement for the given device class. Never mixes the two sets.
    pub fn transform_for(&self, class: DeviceClass) -> ModelTransform {
        match class {
            DeviceClass::Mobile => self.mobile,
            DeviceClass::Desktop => self.desktop,
        }
    }
}

/// Hero model manifest as a Bevy asset. Mirrors the JSON structure.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroManifest {
    pub models: Vec<ModelEntry>,
}

impl HeroManifest {
    /// The six ice models shipped with the page.
    pub fn builtin() -> Self {
        Self {
            models: BUILTIN_MODELS
                .iter()
                .map(|model| ModelEntry {
                    id: model.id.to_string(),
                    path: model.path.to_string(),
                    mobile: model.mobile.into(),
                    desktop: model.desktop.into(),
                })
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), HeroError> {
        if self.models.is_empty() {
            return Err(HeroError::EmptyManifest);
        }

        let mut seen = HashSet::new();
        for entry in &self.models {
            if !seen.insert(entry.id.as_str()) {
                return Err(HeroError::DuplicateModelId(entry.id.clone()));
            }
            if entry.path.trim().is_empty() {
                return Err(HeroError::EmptyModelPath(entry.id.clone()));
            }
            for transform in [&entry.mobile, &entry.desktop] {
                if let Some(field) = transform.non_finite_field() {
                    return Err(HeroError::NonFiniteTransform {
                        id: entry.id.clone(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate, then pick every model's placement for one device class.
    pub fn resolve(&self, class: DeviceClass) -> Result<Vec<AssetSpec>, HeroError> {
        self.validate()?;
        Ok(self
            .models
            .iter()
            .enumerate()
            .map(|(index, entry)| AssetSpec {
                index,
                id: entry.id.clone(),
                path: entry.path.clone(),
                transform: entry.transform_for(class),
            })
            .collect())
    }
}
