use std::sync::Arc;

use crate::{
    foundation::core::{Affine, Point, Rgba8},
    model::shape::{Gradient, GradientKind, GradientStop, Paint, SpreadMethod},
};

/// Pattern paint has no mesh representation and degrades to this solid color.
pub(crate) const PATTERN_FALLBACK: Rgba8 = Rgba8::opaque(128, 128, 128);

pub(crate) fn affine_from_usvg(t: usvg::Transform) -> Affine {
    Affine::new([
        t.sx as f64,
        t.ky as f64,
        t.kx as f64,
        t.sy as f64,
        t.tx as f64,
        t.ty as f64,
    ])
}

fn color_from_usvg(color: usvg::Color, opacity: f32) -> Rgba8 {
    Rgba8::opaque(color.red, color.green, color.blue).with_opacity(opacity)
}

/// Convert a usvg paint. `xf` maps the path's local space onto the canvas.
pub(crate) fn paint_from_usvg(paint: &usvg::Paint, opacity: f32, xf: Affine) -> Paint {
    match paint {
        usvg::Paint::Color(c) => Paint::Solid(color_from_usvg(*c, opacity)),
        usvg::Paint::LinearGradient(lg) => Paint::Gradient(Arc::new(Gradient::new(
            GradientKind::Linear {
                start: Point::new(lg.x1() as f64, lg.y1() as f64),
                end: Point::new(lg.x2() as f64, lg.y2() as f64),
            },
            xf * affine_from_usvg(lg.transform()),
            stops_from_usvg(lg.stops(), opacity),
        )
        .with_spread(spread_from_usvg(lg.spread_method())))),
        usvg::Paint::RadialGradient(rg) => Paint::Gradient(Arc::new(Gradient::new(
            GradientKind::Radial {
                center: Point::new(rg.cx() as f64, rg.cy() as f64),
                radius: rg.r().get() as f64,
            },
            xf * affine_from_usvg(rg.transform()),
            stops_from_usvg(rg.stops(), opacity),
        )
        .with_spread(spread_from_usvg(rg.spread_method())))),
        usvg::Paint::Pattern(_) => {
            tracing::debug!("pattern paint replaced by solid fallback");
            Paint::Solid(PATTERN_FALLBACK.with_opacity(opacity))
        }
    }
}

fn spread_from_usvg(spread: usvg::SpreadMethod) -> SpreadMethod {
    match spread {
        usvg::SpreadMethod::Pad => SpreadMethod::Pad,
        usvg::SpreadMethod::Reflect => SpreadMethod::Reflect,
        usvg::SpreadMethod::Repeat => SpreadMethod::Repeat,
    }
}

fn stops_from_usvg(stops: &[usvg::Stop], opacity: f32) -> Vec<GradientStop> {
    stops
        .iter()
        .map(|s| GradientStop {
            offset: s.offset().get(),
            color: color_from_usvg(s.color(), s.opacity().get() * opacity),
        })
        .collect()
}
