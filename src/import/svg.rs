use std::path::Path;

use anyhow::Context;

use crate::{
    document::{
        element::{Element, OtherElement, ShapeElement, non_empty},
        group::GroupElement,
        tree::Document,
    },
    foundation::error::{VecmeshError, VecmeshResult},
    import::{
        options::ImportOptions,
        paint::{affine_from_usvg, paint_from_usvg},
        tessellate::{PathTessellator, StrokeStyle, lyon_path},
    },
    model::shape::{Geometry, Paint, Shape},
};

/// Parse SVG bytes and convert them into a [`Document`].
#[tracing::instrument(skip(bytes, opts), fields(bytes = bytes.len()))]
pub fn parse_svg(bytes: &[u8], opts: &ImportOptions) -> VecmeshResult<Document> {
    opts.validate()?;
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| VecmeshError::import(format!("parse svg tree: {e}")))?;
    document_from_tree(&tree, opts)
}

/// Read and parse an SVG file.
pub fn load_svg(path: impl AsRef<Path>, opts: &ImportOptions) -> VecmeshResult<Document> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read svg '{}'", path.display()))?;
    parse_svg(&bytes, opts)
}

/// Convert an already parsed usvg tree.
///
/// Every usvg group becomes a [`GroupElement`] named by its `id`, every visible path becomes a
/// [`ShapeElement`] holding its tessellated fill and stroke, and images and text become
/// non-drawable elements.
pub fn document_from_tree(tree: &usvg::Tree, opts: &ImportOptions) -> VecmeshResult<Document> {
    opts.validate()?;
    let mut tess = PathTessellator::new(opts.tolerance);
    let elements = convert_children(tree.root(), 1.0, opts, &mut tess)?;
    let size = tree.size();
    Ok(Document::new(elements).with_size(kurbo::Size::new(
        size.width() as f64,
        size.height() as f64,
    )))
}

/// `opacity` is the product of every ancestor group's opacity, applied to descendant paints.
fn convert_children(
    group: &usvg::Group,
    opacity: f32,
    opts: &ImportOptions,
    tess: &mut PathTessellator,
) -> VecmeshResult<Vec<Element>> {
    group
        .children()
        .iter()
        .map(|node| convert_node(node, opacity, opts, tess))
        .collect()
}

fn convert_node(
    node: &usvg::Node,
    opacity: f32,
    opts: &ImportOptions,
    tess: &mut PathTessellator,
) -> VecmeshResult<Element> {
    Ok(match node {
        usvg::Node::Group(g) => {
            let opacity = opacity * g.opacity().get();
            GroupElement::new(node_id(g.id()), convert_children(g, opacity, opts, tess)?).into()
        }
        usvg::Node::Path(p) => convert_path(p, opacity, opts, tess)?,
        usvg::Node::Image(i) => OtherElement::new("image", node_id(i.id())).into(),
        usvg::Node::Text(t) => OtherElement::new("text", node_id(t.id())).into(),
    })
}

fn node_id(id: &str) -> Option<String> {
    non_empty(Some(id.to_owned()))
}

fn convert_path(
    path: &usvg::Path,
    opacity: f32,
    opts: &ImportOptions,
    tess: &mut PathTessellator,
) -> VecmeshResult<Element> {
    if !path.is_visible() {
        return Ok(OtherElement::new("path", node_id(path.id())).into());
    }

    let xf = affine_from_usvg(path.abs_transform());
    let outline = lyon_path(path.data());

    let mut fill = None;
    if let Some(f) = path.fill() {
        let geometry = tess.fill(&outline, fill_rule(f.rule()), xf)?;
        fill = shape_of(geometry, paint_from_usvg(f.paint(), f.opacity().get() * opacity, xf));
    }

    let mut stroke = None;
    if opts.strokes
        && let Some(s) = path.stroke()
    {
        let style = StrokeStyle {
            width: s.width().get(),
            join: line_join(s.linejoin()),
            cap: line_cap(s.linecap()),
            miter_limit: s.miterlimit().get(),
        };
        let geometry = tess.stroke(&outline, &style, xf)?;
        stroke = shape_of(geometry, paint_from_usvg(s.paint(), s.opacity().get() * opacity, xf));
    }

    let shapes = match path.paint_order() {
        usvg::PaintOrder::FillAndStroke => [fill, stroke],
        usvg::PaintOrder::StrokeAndFill => [stroke, fill],
    };
    Ok(ShapeElement::new(node_id(path.id()), shapes.into_iter().flatten().collect()).into())
}

fn shape_of(geometry: Geometry, paint: Paint) -> Option<Shape> {
    if geometry.is_empty() {
        tracing::trace!("empty tessellation skipped");
        return None;
    }
    Some(Shape::new(geometry, paint))
}

fn fill_rule(rule: usvg::FillRule) -> lyon::tessellation::FillRule {
    match rule {
        usvg::FillRule::NonZero => lyon::tessellation::FillRule::NonZero,
        usvg::FillRule::EvenOdd => lyon::tessellation::FillRule::EvenOdd,
    }
}

fn line_join(join: usvg::LineJoin) -> lyon::tessellation::LineJoin {
    match join {
        usvg::LineJoin::Miter => lyon::tessellation::LineJoin::Miter,
        usvg::LineJoin::MiterClip => lyon::tessellation::LineJoin::MiterClip,
        usvg::LineJoin::Round => lyon::tessellation::LineJoin::Round,
        usvg::LineJoin::Bevel => lyon::tessellation::LineJoin::Bevel,
    }
}

fn line_cap(cap: usvg::LineCap) -> lyon::tessellation::LineCap {
    match cap {
        usvg::LineCap::Butt => lyon::tessellation::LineCap::Butt,
        usvg::LineCap::Round => lyon::tessellation::LineCap::Round,
        usvg::LineCap::Square => lyon::tessellation::LineCap::Square,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/import/svg.rs"]
mod tests;
