//! Flat scene arena: renderables addressed by index, plus the parts that
//! describe them.

mod builder;

pub use builder::{build_scene, BuiltScene};

use glam::Vec3;
use serde::Serialize;
use shared::{Category, PartId};

use crate::material::{MaterialId, MaterialStore};
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Index of a renderable in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RenderableId(pub usize);

/// A mesh placed in the world with a material and a uniform scale
#[derive(Clone, Debug)]
pub struct Renderable {
    pub mesh: MeshData,
    /// Local-space bounds of `mesh`
    pub bounds: Aabb,
    pub position: Vec3,
    pub scale: f32,
    pub material: MaterialId,
}

impl Renderable {
    pub fn new(mesh: MeshData, position: Vec3, material: MaterialId) -> Self {
        let bounds = Aabb::from_mesh(&mesh);
        Self {
            mesh,
            bounds,
            position,
            scale: 1.0,
            material,
        }
    }
}

#[derive(Default)]
pub struct Scene {
    renderables: Vec<Renderable>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, renderable: Renderable) -> RenderableId {
        self.renderables.push(renderable);
        RenderableId(self.renderables.len() - 1)
    }

    pub fn get(&self, id: RenderableId) -> Option<&Renderable> {
        self.renderables.get(id.0)
    }

    pub fn get_mut(&mut self, id: RenderableId) -> Option<&mut Renderable> {
        self.renderables.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RenderableId, &Renderable)> {
        self.renderables
            .iter()
            .enumerate()
            .map(|(i, r)| (RenderableId(i), r))
    }
}

/// A named, described sub-component bound to one renderable
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub renderable: RenderableId,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Shape kind, e.g. "box"
    pub shape: &'static str,
}

/// Per-frame snapshot of one part for an external renderer
#[derive(Clone, Debug, Serialize)]
pub struct RenderState {
    pub part_id: PartId,
    pub position: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

/// Snapshot every part's renderable, in part order
pub fn render_states(parts: &[Part], scene: &Scene, materials: &MaterialStore) -> Vec<RenderState> {
    parts
        .iter()
        .filter_map(|part| {
            let r = scene.get(part.renderable)?;
            let material = materials.get(r.material);
            let (emissive, emissive_intensity) = material
                .and_then(|m| m.emissive)
                .map(|e| (e.color, e.intensity))
                .unwrap_or(([0.0; 3], 0.0));
            Some(RenderState {
                part_id: part.id.clone(),
                position: r.position.to_array(),
                scale: r.scale,
                color: material.map(|m| m.color).unwrap_or([1.0, 0.0, 1.0]),
                roughness: material.map_or(0.5, |m| m.roughness),
                metalness: material.map_or(0.0, |m| m.metalness),
                emissive,
                emissive_intensity,
            })
        })
        .collect()
}
