use crate::mesh::{combine::CombinedMesh, material::MaterialKey};

/// Serializable overview of a [`CombinedMesh`], used by tooling and the CLI.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshSummary {
    pub buffers: Vec<BufferSummary>,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Hex-encoded [`CombinedMesh::fingerprint`].
    pub fingerprint: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BufferSummary {
    pub material: MaterialKey,
    pub label: String,
    pub vertices: usize,
    pub triangles: usize,
    pub gradient_ramps: usize,
    pub bytes: usize,
    /// Set when the buffer cannot be addressed with 16-bit indices.
    pub exceeds_u16_indices: bool,
}

impl CombinedMesh {
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            buffers: self
                .iter()
                .map(|(buffer, material)| BufferSummary {
                    material: material.key,
                    label: material.key.label(),
                    vertices: buffer.vertex_count(),
                    triangles: buffer.triangle_count(),
                    gradient_ramps: material.gradients.len(),
                    bytes: buffer.to_bytes().len(),
                    exceeds_u16_indices: buffer.exceeds_u16_indices(),
                })
                .collect(),
            vertex_count: self.vertex_count(),
            triangle_count: self.triangle_count(),
            fingerprint: format!("{:016x}", self.fingerprint()),
        }
    }
}
