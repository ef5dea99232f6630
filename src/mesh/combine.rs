use std::sync::Arc;

use crate::{
    foundation::{
        core::Rgba8,
        math::{Fnv1a64, snap_to_bits},
    },
    mesh::{
        antialias::{FRINGE_WIDTH, Fringe, silhouette_fringe},
        buffer::MeshBuffer,
        material::{BlendKind, FillKind, MaterialDescriptor, MaterialKey},
        settings::MeshSettings,
    },
    model::{
        layer::Layer,
        shape::{Gradient, GradientKind, Paint, Shape, SpreadMethod},
    },
};

/// Output of [`combine`]: mesh buffers and the material each one is drawn with.
///
/// `buffers[i]` is always drawn with `materials[i]`; both lists have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CombinedMesh {
    buffers: Vec<MeshBuffer>,
    materials: Vec<MaterialDescriptor>,
}

impl CombinedMesh {
    pub fn buffers(&self) -> &[MeshBuffer] {
        &self.buffers
    }

    pub fn materials(&self) -> &[MaterialDescriptor] {
        &self.materials
    }

    /// Number of sub-meshes.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MeshBuffer, &MaterialDescriptor)> {
        self.buffers.iter().zip(self.materials.iter())
    }

    pub fn into_parts(self) -> (Vec<MeshBuffer>, Vec<MaterialDescriptor>) {
        (self.buffers, self.materials)
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.iter().map(MeshBuffer::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.buffers.iter().map(MeshBuffer::triangle_count).sum()
    }

    /// Stable hash over every buffer byte and material field.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(self.buffers.len() as u64);
        for (buffer, material) in self.iter() {
            let bytes = buffer.to_bytes();
            h.write_u64(bytes.len() as u64);
            h.write_bytes(&bytes);
            h.write_bytes(material.key.label().as_bytes());
            h.write_u64(material.gradients.len() as u64);
            for g in &material.gradients {
                hash_gradient(&mut h, g);
            }
        }
        h.finish()
    }
}

fn hash_gradient(h: &mut Fnv1a64, g: &Gradient) {
    match g.kind {
        GradientKind::Linear { start, end } => {
            h.write_u8(0);
            for v in [start.x, start.y, end.x, end.y] {
                h.write_u64(v.to_bits());
            }
        }
        GradientKind::Radial { center, radius } => {
            h.write_u8(1);
            for v in [center.x, center.y, radius] {
                h.write_u64(v.to_bits());
            }
        }
    }
    for c in g.transform.as_coeffs() {
        h.write_u64(c.to_bits());
    }
    for stop in &g.stops {
        h.write_f32(stop.offset);
        h.write_bytes(&stop.color.to_array());
    }
    h.write_u8(g.spread as u8);
}

/// Merge every shape of `layers` (layer order, then shape order) into mesh buffers.
///
/// Consecutive shapes with equal material keys share a buffer until it reaches
/// [`MeshBuffer::MAX_VERTICES`]; any key change starts a new buffer so painter's order holds
/// across buffers. Pure and deterministic; an empty input yields an empty mesh.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn combine(layers: &[Layer], settings: &MeshSettings) -> CombinedMesh {
    let mut out = CombinedMesh::default();

    for shape in layers.iter().flat_map(|l| l.shapes.iter()) {
        let geometry = shape.geometry();
        if geometry.is_empty() {
            continue;
        }

        let key = material_key(shape.paint(), settings);
        let fringe = settings
            .antialiasing
            .then(|| silhouette_fringe(geometry, FRINGE_WIDTH));
        let needed = geometry.vertex_count() + fringe.as_ref().map_or(0, |f| f.outer.len());

        let fits = out.materials.last().is_some_and(|m| m.key == key)
            && out
                .buffers
                .last()
                .is_some_and(|b| b.vertex_count() + needed <= MeshBuffer::MAX_VERTICES);
        if !fits {
            if needed > MeshBuffer::MAX_VERTICES {
                tracing::warn!(
                    vertices = needed,
                    limit = MeshBuffer::MAX_VERTICES,
                    "shape exceeds buffer vertex limit; kept whole in its own buffer"
                );
            }
            out.buffers.push(MeshBuffer::new(settings.color_format));
            out.materials.push(MaterialDescriptor::new(key));
        }

        if let (Some(buffer), Some(material)) = (out.buffers.last_mut(), out.materials.last_mut())
        {
            append_shape(buffer, material, shape, fringe.as_ref(), settings);
        }
    }

    tracing::debug!(
        buffers = out.len(),
        vertices = out.vertex_count(),
        triangles = out.triangle_count(),
        "combined mesh"
    );
    out
}

fn material_key(paint: &Paint, settings: &MeshSettings) -> MaterialKey {
    let (fill, opaque) = match paint {
        Paint::Solid(c) => (FillKind::Solid, c.is_opaque()),
        Paint::Gradient(g) if settings.use_gradients => (FillKind::Gradient, g.is_opaque()),
        Paint::Gradient(g) => (FillKind::Solid, g.flattened().is_opaque()),
    };
    let blend = if opaque && !settings.antialiasing {
        BlendKind::Opaque
    } else {
        BlendKind::Transparent
    };
    MaterialKey {
        fill,
        blend,
        antialiased: settings.antialiasing,
        color_format: settings.color_format,
    }
}

fn append_shape(
    buffer: &mut MeshBuffer,
    material: &mut MaterialDescriptor,
    shape: &Shape,
    fringe: Option<&Fringe>,
    settings: &MeshSettings,
) {
    let geometry = shape.geometry();
    let (color, ramp): (Rgba8, Option<(&Arc<Gradient>, f32)>) = match shape.paint() {
        Paint::Solid(c) => (*c, None),
        Paint::Gradient(g) if settings.use_gradients => {
            (Rgba8::WHITE, Some((g, material.ramp_index(g) as f32)))
        }
        Paint::Gradient(g) => (g.flattened(), None),
    };
    let depth = settings.compression_depth;
    let push = |buffer: &mut MeshBuffer, v: [f32; 2], color: Rgba8| {
        let coord = ramp.map(|(g, index)| [gradient_coord(g, v), index]);
        let snapped = [snap_to_bits(v[0], depth), snap_to_bits(v[1], depth)];
        buffer.push_vertex(snapped, color, coord)
    };

    let base = buffer.vertex_count() as u32;
    for &v in &geometry.vertices {
        push(buffer, v, color);
    }
    let count = geometry.vertex_count() as u32;
    for tri in geometry.triangles() {
        if tri.iter().any(|&i| i >= count) {
            tracing::trace!(?tri, "skipping triangle with out-of-range index");
            continue;
        }
        buffer.indices.extend(tri.iter().map(|&i| base + i));
    }

    if let Some(fringe) = fringe {
        let feather = color.with_opacity(0.0);
        for &v in &fringe.outer {
            push(buffer, v, feather);
        }
        for tri in &fringe.triangles {
            buffer.indices.extend(tri.iter().map(|&i| base + i));
        }
    }
}

/// Pad gradients are clamped per vertex. Reflect and repeat coordinates stay unwrapped so the
/// host can wrap them per fragment; wrapping at vertices would break interpolation.
fn gradient_coord(g: &Gradient, v: [f32; 2]) -> f32 {
    match g.spread {
        SpreadMethod::Pad => g.param_at(v),
        SpreadMethod::Reflect | SpreadMethod::Repeat => {
            let t = g.raw_param_at(v) as f32;
            if t.is_finite() { t } else { 0.0 }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/combine.rs"]
mod tests;
