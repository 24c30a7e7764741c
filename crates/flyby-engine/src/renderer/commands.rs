use glam::Mat4;
use crate::api::types::{GeometryHandle, ProgramHandle, TextureHandle};
use crate::bridge::protocol::{self, Opcode};
use super::traits::{GeometryData, Renderer};

/// One recorded draw-call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Viewport { width: u32, height: u32 },
    UseProgram(ProgramHandle),
    BindTexture(TextureHandle),
    Transform { model_view: Mat4, projection: Mat4 },
    Triangles(GeometryHandle),
    LineLoop(GeometryHandle),
    Blend(bool),
    DepthWrite(bool),
    FaceCulling(bool),
}

impl DrawCommand {
    pub fn opcode(&self) -> Opcode {
        match self {
            DrawCommand::Viewport { .. } => Opcode::Viewport,
            DrawCommand::UseProgram(_) => Opcode::UseProgram,
            DrawCommand::BindTexture(_) => Opcode::BindTexture,
            DrawCommand::Transform { .. } => Opcode::Transform,
            DrawCommand::Triangles(_) => Opcode::Triangles,
            DrawCommand::LineLoop(_) => Opcode::LineLoop,
            DrawCommand::Blend(_) => Opcode::Blend,
            DrawCommand::DepthWrite(_) => Opcode::DepthWrite,
            DrawCommand::FaceCulling(_) => Opcode::FaceCulling,
        }
    }

    /// Append `[opcode, payload_len, payload...]` to `out`.
    pub fn encode_into(&self, out: &mut Vec<f32>) {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        out.push(self.opcode() as u32 as f32);
        match *self {
            DrawCommand::Viewport { width, height } => {
                out.extend_from_slice(&[2.0, width as f32, height as f32]);
            }
            DrawCommand::UseProgram(p) => out.extend_from_slice(&[1.0, p.0 as f32]),
            DrawCommand::BindTexture(t) => out.extend_from_slice(&[1.0, t.0 as f32]),
            DrawCommand::Transform { model_view, projection } => {
                out.push(protocol::TRANSFORM_PAYLOAD_FLOATS as f32);
                out.extend_from_slice(&model_view.to_cols_array());
                out.extend_from_slice(&projection.to_cols_array());
            }
            DrawCommand::Triangles(g) | DrawCommand::LineLoop(g) => {
                out.extend_from_slice(&[1.0, g.0 as f32]);
            }
            DrawCommand::Blend(on) | DrawCommand::DepthWrite(on) | DrawCommand::FaceCulling(on) => {
                out.extend_from_slice(&[1.0, flag(on)]);
            }
        }
    }
}

/// A `Renderer` that records draw-calls instead of executing them.
///
/// The web bridge hands the encoded stream to the page each frame; tests use
/// the structured `commands()` view to assert on draw order.
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    uploads: Vec<GeometryData>,
    encoded: Vec<f32>,
    max_commands: usize,
    dropped: usize,
}

impl CommandBuffer {
    pub fn with_capacity(max_commands: usize) -> Self {
        Self {
            commands: Vec::with_capacity(max_commands),
            uploads: Vec::new(),
            encoded: Vec::new(),
            max_commands,
            dropped: 0,
        }
    }

    /// Start a new frame. Uploaded geometry is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.encoded.clear();
        self.dropped = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn uploads(&self) -> &[GeometryData] {
        &self.uploads
    }

    /// Commands refused this frame because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Encode the recorded frame into the flat wire format. The returned
    /// slice starts with the frame header.
    pub fn encode(&mut self) -> &mut [f32] {
        self.encoded.clear();
        protocol::write_header(&mut self.encoded, self.commands.len(), self.uploads.len());
        for cmd in &self.commands {
            cmd.encode_into(&mut self.encoded);
        }
        &mut self.encoded
    }

    pub fn encoded_ptr(&self) -> *const f32 {
        self.encoded.as_ptr()
    }

    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    fn record(&mut self, cmd: DrawCommand) {
        if self.commands.len() < self.max_commands {
            self.commands.push(cmd);
        } else {
            if self.dropped == 0 {
                log::warn!("command buffer full ({} commands), dropping draws", self.max_commands);
            }
            self.dropped += 1;
        }
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

impl Renderer for CommandBuffer {
    fn upload_geometry(&mut self, geometry: &GeometryData) -> GeometryHandle {
        self.uploads.push(geometry.clone());
        GeometryHandle(self.uploads.len() as u32 - 1)
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.record(DrawCommand::UseProgram(program));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.record(DrawCommand::BindTexture(texture));
    }

    fn set_transform(&mut self, model_view: Mat4, projection: Mat4) {
        self.record(DrawCommand::Transform { model_view, projection });
    }

    fn draw_triangles(&mut self, geometry: GeometryHandle) {
        self.record(DrawCommand::Triangles(geometry));
    }

    fn draw_line_loop(&mut self, geometry: GeometryHandle) {
        self.record(DrawCommand::LineLoop(geometry));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.record(DrawCommand::Viewport { width, height });
    }

    fn set_blend(&mut self, enabled: bool) {
        self.record(DrawCommand::Blend(enabled));
    }

    fn set_depth_write(&mut self, enabled: bool) {
        self.record(DrawCommand::DepthWrite(enabled));
    }

    fn set_face_culling(&mut self, enabled: bool) {
        self.record(DrawCommand::FaceCulling(enabled));
    }
}
