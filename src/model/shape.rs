use std::sync::Arc;

use crate::foundation::core::{Affine, Point, Rgba8};

/// Triangle-list geometry in document (canvas) space.
///
/// `indices` holds three entries per triangle, each indexing into `vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new(vertices: Vec<[f32; 2]>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.len() < 3
    }

    /// Iterate complete triangles, skipping a trailing partial one.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// A gradient color stop. `offset` is in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba8,
}

/// Gradient geometry expressed in gradient space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GradientKind {
    Linear { start: Point, end: Point },
    Radial { center: Point, radius: f64 },
}

/// How a gradient continues outside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpreadMethod {
    /// Clamp to the end stops.
    #[default]
    Pad,
    /// Mirror every other period.
    Reflect,
    /// Restart every period.
    Repeat,
}

impl SpreadMethod {
    /// Map an unbounded ramp parameter into `[0, 1]`.
    pub fn apply(self, t: f64) -> f32 {
        if !t.is_finite() {
            return 0.0;
        }
        let t = match self {
            SpreadMethod::Pad => t.clamp(0.0, 1.0),
            SpreadMethod::Repeat => t.rem_euclid(1.0),
            SpreadMethod::Reflect => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 { 2.0 - m } else { m }
            }
        };
        t as f32
    }
}

/// A color ramp plus the geometry that maps canvas positions onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    /// Gradient space to canvas space.
    pub transform: Affine,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
    pub spread: SpreadMethod,
}

impl Gradient {
    pub fn new(kind: GradientKind, transform: Affine, mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Self {
            kind,
            transform,
            stops,
            spread: SpreadMethod::Pad,
        }
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn is_opaque(&self) -> bool {
        self.stops.iter().all(|s| s.color.is_opaque())
    }

    /// Ramp parameter for a canvas-space position, mapped into `[0, 1]` by [`Gradient::spread`].
    pub fn param_at(&self, p: [f32; 2]) -> f32 {
        self.spread.apply(self.raw_param_at(p))
    }

    /// Ramp parameter before spreading; `0` at the gradient start, `1` at its end.
    pub fn raw_param_at(&self, p: [f32; 2]) -> f64 {
        let inv = self.transform.inverse();
        let local = inv * Point::new(f64::from(p[0]), f64::from(p[1]));
        match self.kind {
            GradientKind::Linear { start, end } => {
                let axis = end - start;
                let len2 = axis.hypot2();
                if len2 <= f64::EPSILON {
                    0.0
                } else {
                    (local - start).dot(axis) / len2
                }
            }
            GradientKind::Radial { center, radius } => {
                if radius <= f64::EPSILON {
                    1.0
                } else {
                    (local - center).hypot() / radius
                }
            }
        }
    }

    /// Ramp color at parameter `t`.
    pub fn sample(&self, t: f32) -> Rgba8 {
        let Some(first) = self.stops.first() else {
            return Rgba8::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// Single color used when gradients are disabled.
    pub fn flattened(&self) -> Rgba8 {
        self.sample(0.5)
    }
}

/// Paint state a shape is filled with.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8),
    Gradient(Arc<Gradient>),
}

impl Paint {
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Solid(c) => c.is_opaque(),
            Paint::Gradient(g) => g.is_opaque(),
        }
    }
}

/// Tessellated geometry plus its paint. Immutable once produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    geometry: Arc<Geometry>,
    paint: Paint,
}

impl Shape {
    pub fn new(geometry: impl Into<Arc<Geometry>>, paint: Paint) -> Self {
        Self {
            geometry: geometry.into(),
            paint,
        }
    }

    /// Solid-colored shape, mostly useful for tests and tooling.
    pub fn solid(geometry: Geometry, color: Rgba8) -> Self {
        Self::new(geometry, Paint::Solid(color))
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/shape.rs"]
mod tests;
