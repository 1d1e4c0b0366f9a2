//! Factory functions for test catalogs and cameras.

use glam::Vec3;
use shared::{Category, MaterialSpec, PartSpec, ProductCatalog, Shape};

use crate::viewport::camera::PerspectiveCamera;

/// Unit box part at a position
pub fn box_part(id: &str, name: &str, position: [f32; 3]) -> PartSpec {
    PartSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} used in tests"),
        category: Category::Other,
        shape: Shape::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        },
        material: MaterialSpec::new([0.6, 0.6, 0.6]),
        position,
    }
}

/// One unit box at the world origin
pub fn single_box_catalog() -> ProductCatalog {
    ProductCatalog {
        name: "Single box".to_string(),
        description: String::new(),
        parts: vec![box_part("box", "Box", [0.0, 0.0, 0.0])],
    }
}

/// Three unit boxes on the X axis at -2, 0 and 2
pub fn row_catalog() -> ProductCatalog {
    ProductCatalog {
        name: "Row".to_string(),
        description: "Three boxes".to_string(),
        parts: vec![
            box_part("box_left", "Left box", [-2.0, 0.0, 0.0]),
            box_part("box_center", "Center box", [0.0, 0.0, 0.0]),
            box_part("box_right", "Right box", [2.0, 0.0, 0.0]),
        ],
    }
}

/// Camera on +Z looking at the origin
pub fn camera_facing_origin() -> PerspectiveCamera {
    PerspectiveCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
}
