//! Material handles.
//!
//! Materials live in a [`MaterialStore`] arena and are referred to by
//! [`MaterialId`]. A slot is freed by [`MaterialStore::dispose`], which is
//! idempotent: releasing the same id twice is a no-op.

use serde::Serialize;
use shared::MaterialSpec;

/// Index of a material slot in a [`MaterialStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MaterialId(pub usize);

/// Glow added on top of the lit color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emissive {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// `None` for materials that cannot glow
    pub emissive: Option<Emissive>,
}

impl Material {
    pub fn from_spec(name: impl Into<String>, spec: &MaterialSpec) -> Self {
        Self {
            name: name.into(),
            color: spec.color,
            roughness: spec.roughness,
            metalness: spec.metalness,
            emissive: spec.emissive.map(|color| Emissive {
                color,
                intensity: 0.0,
            }),
        }
    }

    /// Emissive-capable feedback material
    pub fn feedback(name: impl Into<String>, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            color,
            roughness: 0.5,
            metalness: 0.0,
            emissive: Some(Emissive {
                color,
                intensity: 0.1,
            }),
        }
    }

    pub fn is_emissive(&self) -> bool {
        self.emissive.is_some()
    }
}

/// Arena owning every material referenced by the scene
#[derive(Default)]
pub struct MaterialStore {
    slots: Vec<Option<Material>>,
}

impl MaterialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: Material) -> MaterialId {
        self.slots.push(Some(material));
        MaterialId(self.slots.len() - 1)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.slots.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.slots.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Copy a live material into a fresh slot
    pub fn clone_material(&mut self, id: MaterialId) -> Option<MaterialId> {
        let copy = self.get(id)?.clone();
        Some(self.insert(copy))
    }

    /// Release a slot. Returns `false` if it was already released.
    pub fn dispose(&mut self, id: MaterialId) -> bool {
        match self.slots.get_mut(id.0) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    pub fn is_live(&self, id: MaterialId) -> bool {
        self.get(id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spec_copies_emissive_capability() {
        let plain = Material::from_spec("wood", &MaterialSpec::new([0.5, 0.3, 0.2]));
        assert!(!plain.is_emissive());
        let glowing = Material::from_spec(
            "lamp",
            &MaterialSpec::new([1.0, 1.0, 1.0]).with_emissive([1.0, 0.9, 0.7]),
        );
        assert!(glowing.is_emissive());
    }

    #[test]
    fn test_clone_gets_distinct_slot() {
        let mut store = MaterialStore::new();
        let a = store.insert(Material::feedback("hover", [0.3, 0.6, 1.0]));
        let b = store.clone_material(a).unwrap();
        assert_ne!(a, b);
        store.get_mut(b).unwrap().color = [1.0, 0.0, 0.0];
        assert_eq!(store.get(a).unwrap().color, [0.3, 0.6, 1.0]);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut store = MaterialStore::new();
        let a = store.insert(Material::feedback("hover", [0.3, 0.6, 1.0]));
        assert!(store.dispose(a));
        assert!(!store.dispose(a));
        assert!(!store.is_live(a));
        assert!(store.clone_material(a).is_none());
        assert!(!store.dispose(MaterialId(42)));
        assert_eq!(store.live_count(), 0);
    }
}
