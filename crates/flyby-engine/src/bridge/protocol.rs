/// Flat f32 wire format shared with the page-side WebGL player.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Frame stream layout (all values f32):
/// ```text
/// [Header: 8 floats]
/// [Commands: opcode, payload_len, payload... repeated]
/// ```
///
/// Geometry uploads travel separately as interleaved `x, y, z, u, v`
/// vertices and are addressed by their upload index. Game events use a
/// fixed-size section of `max_events × 4` floats.

use crate::api::game::GameConfig;

/// Number of floats in the frame header.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_COMMAND_COUNT: usize = 1;
pub const HEADER_GEOMETRY_COUNT: usize = 2;
pub const HEADER_MAX_COMMANDS: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per geometry vertex: x, y, z, u, v.
pub const VERTEX_FLOATS: usize = 5;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Payload of a transform command: model-view then projection, column-major.
pub const TRANSFORM_PAYLOAD_FLOATS: usize = 32;

/// Command opcodes. Values are part of the wire format.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Viewport = 1,
    UseProgram = 2,
    BindTexture = 3,
    Transform = 4,
    Triangles = 5,
    LineLoop = 6,
    Blend = 7,
    DepthWrite = 8,
    FaceCulling = 9,
}

impl Opcode {
    pub fn from_f32(value: f32) -> Option<Self> {
        Some(match value as u32 {
            1 => Opcode::Viewport,
            2 => Opcode::UseProgram,
            3 => Opcode::BindTexture,
            4 => Opcode::Transform,
            5 => Opcode::Triangles,
            6 => Opcode::LineLoop,
            7 => Opcode::Blend,
            8 => Opcode::DepthWrite,
            9 => Opcode::FaceCulling,
            _ => return None,
        })
    }
}

/// Append a frame header. Capacity slots are left at zero; the runner
/// fills them from its `ProtocolLayout`.
pub fn write_header(out: &mut Vec<f32>, command_count: usize, geometry_count: usize) {
    let start = out.len();
    out.resize(start + HEADER_FLOATS, 0.0);
    out[start + HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[start + HEADER_COMMAND_COUNT] = command_count as f32;
    out[start + HEADER_GEOMETRY_COUNT] = geometry_count as f32;
}

/// Runtime buffer capacities derived from a `GameConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_commands: usize,
    pub max_events: usize,
    /// Size of the event section in floats.
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_commands: usize, max_events: usize) -> Self {
        Self {
            max_commands,
            max_events,
            event_data_floats: max_events * EVENT_FLOATS,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_commands, config.max_events)
    }

    /// Stamp the capacity fields into an encoded frame header.
    pub fn stamp(&self, header: &mut [f32]) {
        if header.len() >= HEADER_FLOATS {
            header[HEADER_MAX_COMMANDS] = self.max_commands as f32;
            header[HEADER_MAX_EVENTS] = self.max_events as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_from_default_config() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_commands, config.max_commands);
        assert_eq!(layout.event_data_floats, config.max_events * EVENT_FLOATS);
    }

    #[test]
    fn header_carries_version_and_counts() {
        let mut out = vec![42.0];
        write_header(&mut out, 7, 3);
        assert_eq!(out.len(), 1 + HEADER_FLOATS);
        assert_eq!(out[1 + HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(out[1 + HEADER_COMMAND_COUNT], 7.0);
        assert_eq!(out[1 + HEADER_GEOMETRY_COUNT], 3.0);

        ProtocolLayout::new(64, 8).stamp(&mut out[1..]);
        assert_eq!(out[1 + HEADER_MAX_COMMANDS], 64.0);
        assert_eq!(out[1 + HEADER_MAX_EVENTS], 8.0);
    }

    #[test]
    fn opcodes_round_trip_through_f32() {
        for op in [Opcode::Viewport, Opcode::Transform, Opcode::FaceCulling] {
            assert_eq!(Opcode::from_f32(op as u32 as f32), Some(op));
        }
        assert_eq!(Opcode::from_f32(0.0), None);
    }
}
