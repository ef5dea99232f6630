use lyon::{
    math::point,
    path::Path,
    tessellation::{
        BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, LineCap, LineJoin,
        StrokeOptions, StrokeTessellator, StrokeVertex, VertexBuffers,
    },
};

use crate::{
    foundation::{
        core::{Affine, transform_vertex},
        error::{VecmeshError, VecmeshResult},
    },
    model::shape::Geometry,
};

/// Stroke parameters in path-local units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StrokeStyle {
    pub(crate) width: f32,
    pub(crate) join: LineJoin,
    pub(crate) cap: LineCap,
    pub(crate) miter_limit: f32,
}

/// Reusable lyon fill/stroke tessellators.
///
/// Paths are tessellated in their local space and the output vertices are mapped through the
/// path's transform, so stroke widths scale with it.
pub(crate) struct PathTessellator {
    fill: FillTessellator,
    stroke: StrokeTessellator,
    tolerance: f32,
}

impl PathTessellator {
    pub(crate) fn new(tolerance: f32) -> Self {
        Self {
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
            tolerance,
        }
    }

    pub(crate) fn fill(
        &mut self,
        path: &Path,
        rule: FillRule,
        xf: Affine,
    ) -> VecmeshResult<Geometry> {
        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        let options = FillOptions::tolerance(local_tolerance(self.tolerance, xf)).with_fill_rule(rule);
        self.fill
            .tessellate_path(
                path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| v.position().to_array()),
            )
            .map_err(|e| VecmeshError::tessellation(format!("fill: {e:?}")))?;
        Ok(into_geometry(buffers, xf))
    }

    pub(crate) fn stroke(
        &mut self,
        path: &Path,
        style: &StrokeStyle,
        xf: Affine,
    ) -> VecmeshResult<Geometry> {
        let mut buffers: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
        let options = StrokeOptions::tolerance(local_tolerance(self.tolerance, xf))
            .with_line_width(style.width)
            .with_line_join(style.join)
            .with_line_cap(style.cap)
            .with_miter_limit(style.miter_limit.max(StrokeOptions::MINIMUM_MITER_LIMIT));
        self.stroke
            .tessellate_path(
                path,
                &options,
                &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v.position().to_array()),
            )
            .map_err(|e| VecmeshError::tessellation(format!("stroke: {e:?}")))?;
        Ok(into_geometry(buffers, xf))
    }
}

/// Tolerance in local units that keeps the canvas-space error at `tolerance`.
fn local_tolerance(tolerance: f32, xf: Affine) -> f32 {
    let scale = xf.determinant().abs().sqrt() as f32;
    if scale.is_finite() && scale > f32::EPSILON {
        tolerance / scale
    } else {
        tolerance
    }
}

fn into_geometry(buffers: VertexBuffers<[f32; 2], u32>, xf: Affine) -> Geometry {
    let vertices = buffers
        .vertices
        .into_iter()
        .map(|v| transform_vertex(xf, v))
        .collect();
    Geometry::new(vertices, buffers.indices)
}

/// Build a lyon path from usvg path data.
pub(crate) fn lyon_path(data: &usvg::tiny_skia_path::Path) -> Path {
    use usvg::tiny_skia_path::PathSegment;

    let mut b = Path::builder();
    let mut open = false;
    let mut start = point(0.0, 0.0);
    let mut last = start;
    for segment in data.segments() {
        let to = match segment {
            PathSegment::MoveTo(p) => {
                if open {
                    b.end(false);
                }
                start = point(p.x, p.y);
                b.begin(start);
                open = true;
                start
            }
            PathSegment::LineTo(p) => {
                ensure_open(&mut b, &mut open, last);
                b.line_to(point(p.x, p.y));
                point(p.x, p.y)
            }
            PathSegment::QuadTo(c, p) => {
                ensure_open(&mut b, &mut open, last);
                b.quadratic_bezier_to(point(c.x, c.y), point(p.x, p.y));
                point(p.x, p.y)
            }
            PathSegment::CubicTo(c1, c2, p) => {
                ensure_open(&mut b, &mut open, last);
                b.cubic_bezier_to(point(c1.x, c1.y), point(c2.x, c2.y), point(p.x, p.y));
                point(p.x, p.y)
            }
            PathSegment::Close => {
                if open {
                    b.end(true);
                    open = false;
                }
                start
            }
        };
        last = to;
    }
    if open {
        b.end(false);
    }
    b.build()
}

fn ensure_open(b: &mut lyon::path::path::Builder, open: &mut bool, at: lyon::math::Point) {
    if !*open {
        b.begin(at);
        *open = true;
    }
}
