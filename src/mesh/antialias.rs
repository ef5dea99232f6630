use std::collections::HashMap;

use crate::model::shape::Geometry;

/// Fringe width in document units.
pub(crate) const FRINGE_WIDTH: f32 = 0.5;

/// Feather geometry for one shape.
///
/// Triangle indices below the shape's vertex count refer to the shape's own vertices; indices
/// at or above it refer to `outer[index - vertex_count]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Fringe {
    pub(crate) outer: Vec<[f32; 2]>,
    pub(crate) triangles: Vec<[u32; 3]>,
}

/// Extrude every boundary edge (an edge used by exactly one triangle) outward by `width`.
///
/// Each boundary edge yields two outer vertices and two triangles; edges are visited in
/// triangle order so the output is deterministic.
pub(crate) fn silhouette_fringe(geometry: &Geometry, width: f32) -> Fringe {
    let verts = &geometry.vertices;
    let n = verts.len() as u32;

    let mut edges = Vec::new();
    let mut uses: HashMap<(u32, u32), u32> = HashMap::new();
    for [i0, i1, i2] in geometry.triangles() {
        if i0.max(i1).max(i2) >= n {
            continue;
        }
        for (a, b, c) in [(i0, i1, i2), (i1, i2, i0), (i2, i0, i1)] {
            if a == b {
                continue;
            }
            *uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            edges.push((a, b, c));
        }
    }

    let mut fringe = Fringe::default();
    for (a, b, c) in edges {
        if uses.get(&(a.min(b), a.max(b))) != Some(&1) {
            continue;
        }
        let (pa, pb, pc) = (verts[a as usize], verts[b as usize], verts[c as usize]);
        let (dx, dy) = (pb[0] - pa[0], pb[1] - pa[1]);
        let len = (dx * dx + dy * dy).sqrt();
        if len <= f32::EPSILON {
            continue;
        }

        // Point the normal away from the triangle's third vertex.
        let (mut nx, mut ny) = (-dy / len, dx / len);
        if nx * (pc[0] - pa[0]) + ny * (pc[1] - pa[1]) > 0.0 {
            nx = -nx;
            ny = -ny;
        }

        let oa = n + fringe.outer.len() as u32;
        let ob = oa + 1;
        fringe.outer.push([pa[0] + nx * width, pa[1] + ny * width]);
        fringe.outer.push([pb[0] + nx * width, pb[1] + ny * width]);
        fringe.triangles.push([a, b, ob]);
        fringe.triangles.push([a, ob, oa]);
    }
    fringe
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/antialias.rs"]
mod tests;
