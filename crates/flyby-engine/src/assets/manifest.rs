use serde::{Deserialize, Serialize};
use crate::error::EngineResult;

/// Asset manifest listing the textures and shader programs the page has
/// loaded. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Textures in upload order; a texture's handle is its index here.
    pub textures: Vec<TextureDescriptor>,
    /// Linked shader programs; a program's handle is its index here.
    #[serde(default)]
    pub programs: Vec<ShaderDescriptor>,
}

/// A single texture image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup name used by game code (e.g., "earth").
    pub name: String,
    /// Relative path to the image file (e.g., "earth.jpg").
    pub path: String,
}

/// A vertex/fragment shader pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderDescriptor {
    pub vertex: String,
    pub fragment: String,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn texture_index(&self, name: &str) -> Option<usize> {
        self.textures.iter().position(|t| t.name == name)
    }

    pub fn program_index(&self, vertex: &str, fragment: &str) -> Option<usize> {
        self.programs
            .iter()
            .position(|p| p.vertex == vertex && p.fragment == fragment)
    }
}
