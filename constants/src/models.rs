/// Scale, position and rotation (radians, XYZ order) for one device class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformTable {
    pub scale: [f32; 3],
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

/// Built-in hero model with its mobile and desktop placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinModel {
    pub id: &'static str,
    pub path: &'static str,
    pub mobile: TransformTable,
    pub desktop: TransformTable,
}

const fn placement(scale: f32, position: [f32; 3]) -> TransformTable {
    TransformTable {
        scale: [scale, scale, scale],
        position,
        rotation: [0.0, 0.0, 0.0],
    }
}

/// Default model set. Used when no manifest file is configured or it fails to load.
pub const BUILTIN_MODELS: [BuiltinModel; 6] = [
    BuiltinModel {
        id: "ice",
        path: "obj/ice.glb",
        mobile: placement(0.4, [1.3, 2.0, 1.0]),
        desktop: placement(0.7, [5.0, 2.0, 1.0]),
    },
    BuiltinModel {
        id: "ice_chips",
        path: "obj/ice_chips.glb",
        mobile: placement(0.5, [1.4, 0.0, 0.0]),
        desktop: placement(0.7, [6.0, 0.0, 0.0]),
    },
    BuiltinModel {
        id: "ice_chocolate",
        path: "obj/ice_chocolate.glb",
        mobile: placement(0.5, [1.3, -2.4, 1.0]),
        desktop: placement(0.7, [5.0, -3.0, 1.0]),
    },
    BuiltinModel {
        id: "ice_macha",
        path: "obj/ice_macha.glb",
        mobile: placement(0.5, [-1.3, 2.4, 1.0]),
        desktop: placement(0.7, [-5.0, 2.0, 1.0]),
    },
    BuiltinModel {
        id: "ice_spoon",
        path: "obj/ice_spoon.glb",
        mobile: placement(0.5, [-1.4, 0.0, 0.0]),
        desktop: placement(0.7, [-6.0, 0.0, 0.0]),
    },
    BuiltinModel {
        id: "ice_double",
        path: "obj/ice_double.glb",
        mobile: placement(0.5, [-1.3, -2.4, 1.0]),
        desktop: placement(0.7, [-5.0, -3.0, 1.0]),
    },
];
