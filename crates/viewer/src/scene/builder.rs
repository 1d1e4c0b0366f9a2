use glam::Vec3;
use shared::ProductCatalog;

use super::{Part, Renderable, Scene};
use crate::error::ViewerError;
use crate::material::{Material, MaterialStore};
use crate::viewport::mesh;

/// Output of [`build_scene`]: the arena plus parts in catalog order
pub struct BuiltScene {
    pub scene: Scene,
    pub parts: Vec<Part>,
}

/// Generate one renderable and one material per catalog part
pub fn build_scene(
    catalog: &ProductCatalog,
    materials: &mut MaterialStore,
) -> Result<BuiltScene, ViewerError> {
    catalog
        .validate()
        .map_err(|e| ViewerError::InvalidCatalog(e.to_string()))?;

    let mut scene = Scene::new();
    let mut parts = Vec::with_capacity(catalog.parts.len());

    for spec in &catalog.parts {
        let material = materials.insert(Material::from_spec(&spec.id, &spec.material));
        let renderable = scene.add(Renderable::new(
            mesh::from_shape(&spec.shape),
            Vec3::from(spec.position),
            material,
        ));
        parts.push(Part {
            id: spec.id.clone(),
            renderable,
            name: spec.name.clone(),
            description: spec.description.clone(),
            category: spec.category,
            shape: spec.shape.kind(),
        });
    }

    tracing::info!("Built scene '{}' ({} parts)", catalog.name, parts.len());

    Ok(BuiltScene { scene, parts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_build_chair() {
        let mut materials = MaterialStore::new();
        let catalog = ProductCatalog::chair();
        let built = build_scene(&catalog, &mut materials).unwrap();
        assert_eq!(built.parts.len(), catalog.parts.len());
        assert_eq!(built.scene.len(), catalog.parts.len());
        assert_eq!(materials.live_count(), catalog.parts.len());
        for (part, spec) in built.parts.iter().zip(&catalog.parts) {
            assert_eq!(part.id, spec.id);
            let r = built.scene.get(part.renderable).unwrap();
            assert_eq!(r.position.to_array(), spec.position);
            assert_eq!(r.scale, 1.0);
            assert_eq!(part.shape, spec.shape.kind());
        }
    }

    #[test]
    fn test_render_states_carry_surface() {
        let mut materials = MaterialStore::new();
        let catalog = ProductCatalog::chair();
        let built = build_scene(&catalog, &mut materials).unwrap();
        let states = crate::scene::render_states(&built.parts, &built.scene, &materials);
        for (state, spec) in states.iter().zip(&catalog.parts) {
            assert_eq!(state.part_id, spec.id);
            assert_eq!(state.roughness, spec.material.roughness);
            assert_eq!(state.metalness, spec.material.metalness);
        }
    }

    #[test]
    fn test_build_rejects_invalid_catalog() {
        let mut catalog = fixtures::single_box_catalog();
        catalog.parts.push(catalog.parts[0].clone());
        let mut materials = MaterialStore::new();
        let err = build_scene(&catalog, &mut materials).err().unwrap();
        assert!(matches!(err, ViewerError::InvalidCatalog(_)));
        assert_eq!(materials.live_count(), 0);
    }
}
