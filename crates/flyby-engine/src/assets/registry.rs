use std::collections::HashMap;
use crate::api::types::{ProgramHandle, TextureHandle};
use crate::assets::manifest::AssetManifest;
use crate::error::{EngineError, EngineResult};

/// Resolves asset names to host-side handles.
pub trait AssetLoader {
    fn load_texture(&self, name: &str) -> EngineResult<TextureHandle>;
    fn load_shader_program(&self, vertex: &str, fragment: &str) -> EngineResult<ProgramHandle>;
}

/// `AssetLoader` backed by a parsed manifest. Handles are manifest indices,
/// matching the order in which the page uploaded the assets.
#[derive(Debug, Clone, Default)]
pub struct ManifestLoader {
    manifest: AssetManifest,
}

impl ManifestLoader {
    pub fn new(manifest: AssetManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &AssetManifest {
        &self.manifest
    }
}

impl AssetLoader for ManifestLoader {
    fn load_texture(&self, name: &str) -> EngineResult<TextureHandle> {
        self.manifest
            .texture_index(name)
            .map(|i| TextureHandle(i as u32))
            .ok_or_else(|| EngineError::MissingTexture(name.to_string()))
    }

    fn load_shader_program(&self, vertex: &str, fragment: &str) -> EngineResult<ProgramHandle> {
        self.manifest
            .program_index(vertex, fragment)
            .map(|i| ProgramHandle(i as u32))
            .ok_or_else(|| EngineError::ShaderProgram(format!("{vertex} + {fragment}")))
    }
}

/// Named texture handles resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    handles: HashMap<String, TextureHandle>,
}

impl TextureSet {
    /// Resolve every name, failing on the first one the loader lacks.
    pub fn load(loader: &dyn AssetLoader, names: &[&str]) -> EngineResult<Self> {
        let mut handles = HashMap::with_capacity(names.len());
        for name in names {
            handles.insert(name.to_string(), loader.load_texture(name)?);
        }
        log::debug!("resolved {} textures", handles.len());
        Ok(Self { handles })
    }

    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.handles.get(name).copied()
    }

    /// Like `get`, but a miss is an error.
    pub fn require(&self, name: &str) -> EngineResult<TextureHandle> {
        self.get(name)
            .ok_or_else(|| EngineError::MissingTexture(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
