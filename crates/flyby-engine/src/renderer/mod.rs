pub mod camera;
pub mod commands;
pub mod mesh;
pub mod traits;

pub use camera::{look_at, overhead_view, ProjectionKind, ProjectionState, Viewport};
pub use commands::{CommandBuffer, DrawCommand};
pub use traits::{GeometryData, Renderer};
