//! Product catalog: the static description of a product's sub-parts.
//!
//! Pure data consumed by the viewer's scene builder. Everything here is
//! serde-serializable so a catalog can be loaded from a JSON file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

mod chair;

/// Unique identifier of a part within a catalog
pub type PartId = String;

/// Primitive shape of a part, centered on its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        radius: f32,
        height: f32,
    },
    Sphere {
        radius: f32,
    },
    Cone {
        radius: f32,
        height: f32,
    },
}

impl Shape {
    /// Dimensions that must be strictly positive
    fn dimensions(&self) -> Vec<f32> {
        match self {
            Shape::Box {
                width,
                height,
                depth,
            } => vec![*width, *height, *depth],
            Shape::Cylinder { radius, height } | Shape::Cone { radius, height } => {
                vec![*radius, *height]
            }
            Shape::Sphere { radius } => vec![*radius],
        }
    }

    /// Short lowercase name, used in the info panel
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Cylinder { .. } => "cylinder",
            Shape::Sphere { .. } => "sphere",
            Shape::Cone { .. } => "cone",
        }
    }
}

/// Surface description of a part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Base color, linear RGB 0..1
    pub color: [f32; 3],
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    #[serde(default)]
    pub metalness: f32,
    /// Emissive color; `None` means the material cannot glow
    #[serde(default)]
    pub emissive: Option<[f32; 3]>,
}

fn default_roughness() -> f32 {
    0.8
}

impl MaterialSpec {
    pub fn new(color: [f32; 3]) -> Self {
        Self {
            color,
            roughness: default_roughness(),
            metalness: 0.0,
            emissive: None,
        }
    }

    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness;
        self
    }

    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_emissive(mut self, emissive: [f32; 3]) -> Self {
        self.emissive = Some(emissive);
        self
    }
}

/// Category tag shown next to a part's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Seat,
    Backrest,
    Leg,
    Armrest,
    Frame,
    #[default]
    Other,
}

impl Category {
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Seat => "Seat",
            Category::Backrest => "Backrest",
            Category::Leg => "Leg",
            Category::Armrest => "Armrest",
            Category::Frame => "Frame",
            Category::Other => "Other",
        }
    }
}

/// One sub-part of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartSpec {
    pub id: PartId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    pub shape: Shape,
    pub material: MaterialSpec,
    /// World position of the shape's center
    #[serde(default)]
    pub position: [f32; 3],
}

/// A product assembled from primitive parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub parts: Vec<PartSpec>,
}

/// Reasons a catalog is rejected
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A part has an empty id
    EmptyId,
    /// Two parts share the same id
    DuplicateId(PartId),
    /// A shape dimension is zero, negative or not finite
    InvalidDimension(PartId),
    /// The JSON could not be parsed
    Parse(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::EmptyId => write!(f, "Part with empty id"),
            CatalogError::DuplicateId(id) => write!(f, "Duplicate part id '{}'", id),
            CatalogError::InvalidDimension(id) => {
                write!(f, "Part '{}' has a non-positive dimension", id)
            }
            CatalogError::Parse(msg) => write!(f, "Catalog parse error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl ProductCatalog {
    /// Parse and validate a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: ProductCatalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check ids are unique and non-empty and every dimension is positive
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for part in &self.parts {
            if part.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(part.id.as_str()) {
                return Err(CatalogError::DuplicateId(part.id.clone()));
            }
            if part
                .shape
                .dimensions()
                .iter()
                .any(|d| !d.is_finite() || *d <= 0.0)
            {
                return Err(CatalogError::InvalidDimension(part.id.clone()));
            }
        }
        Ok(())
    }

    pub fn part(&self, id: &str) -> Option<&PartSpec> {
        self.parts.iter().find(|p| p.id == id)
    }
}
