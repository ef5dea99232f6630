use crate::{foundation::core::Rgba8, mesh::settings::ColorFormat};

/// Per-vertex colors in the precision selected by [`ColorFormat`].
#[derive(Clone, Debug, PartialEq)]
pub enum VertexColors {
    Unorm8(Vec<[u8; 4]>),
    Float32(Vec<[f32; 4]>),
}

impl VertexColors {
    pub fn new(format: ColorFormat) -> Self {
        match format {
            ColorFormat::Unorm8 => Self::Unorm8(Vec::new()),
            ColorFormat::Float32 => Self::Float32(Vec::new()),
        }
    }

    pub fn format(&self) -> ColorFormat {
        match self {
            Self::Unorm8(_) => ColorFormat::Unorm8,
            Self::Float32(_) => ColorFormat::Float32,
        }
    }

    pub fn push(&mut self, color: Rgba8) {
        match self {
            Self::Unorm8(v) => v.push(color.to_array()),
            Self::Float32(v) => v.push(color.to_f32_array()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Unorm8(v) => v.len(),
            Self::Float32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Unorm8(v) => bytemuck::cast_slice(v),
            Self::Float32(v) => bytemuck::cast_slice(v),
        }
    }
}

/// One host-uploadable mesh: parallel vertex streams plus a triangle index list.
///
/// `gradient_coords` is empty unless the paired material is a gradient material; otherwise it
/// holds `[t, ramp]` per vertex, where `ramp` indexes the material's gradient list. `t` is
/// clamped for pad gradients and left unwrapped for reflect/repeat gradients.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<[f32; 2]>,
    pub colors: VertexColors,
    pub gradient_coords: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    /// Vertex addressing limit of a single buffer (16-bit index hosts).
    pub const MAX_VERTICES: usize = u16::MAX as usize;

    pub fn new(format: ColorFormat) -> Self {
        Self {
            positions: Vec::new(),
            colors: VertexColors::new(format),
            gradient_coords: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether this buffer holds more than [`MeshBuffer::MAX_VERTICES`] vertices. Only a single
    /// oversized shape produces such a buffer; hosts limited to 16-bit indices must split or
    /// skip it.
    pub fn exceeds_u16_indices(&self) -> bool {
        self.vertex_count() > Self::MAX_VERTICES
    }

    /// Push a vertex and return its index.
    pub(crate) fn push_vertex(
        &mut self,
        position: [f32; 2],
        color: Rgba8,
        gradient: Option<[f32; 2]>,
    ) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.colors.push(color);
        if let Some(coord) = gradient {
            self.gradient_coords.push(coord);
        }
        index
    }

    /// Upload bytes: positions, colors, gradient coordinates, then indices, each tightly packed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let positions: &[u8] = bytemuck::cast_slice(&self.positions);
        let colors = self.colors.as_bytes();
        let gradients: &[u8] = bytemuck::cast_slice(&self.gradient_coords);
        let indices: &[u8] = bytemuck::cast_slice(&self.indices);

        let mut out =
            Vec::with_capacity(positions.len() + colors.len() + gradients.len() + indices.len());
        out.extend_from_slice(positions);
        out.extend_from_slice(colors);
        out.extend_from_slice(gradients);
        out.extend_from_slice(indices);
        out
    }
}
