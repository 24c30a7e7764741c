pub mod api;
pub mod core;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, SetupContext, RenderContext};
pub use api::types::{GameEvent, GeometryHandle, ProgramHandle, TextureHandle};
pub use core::time::FrameClock;
pub use error::{EngineError, EngineResult};
pub use renderer::camera::{look_at, overhead_view, ProjectionKind, ProjectionState, Viewport};
pub use renderer::commands::{CommandBuffer, DrawCommand};
pub use renderer::traits::{GeometryData, Renderer};
pub use renderer::mesh;
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{AssetLoader, ManifestLoader, TextureSet};
pub use bridge::protocol::ProtocolLayout;

pub use extensions::{Easing, lerp, lerp_vec3, smoothstep, Transform};
