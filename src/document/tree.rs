use crate::{
    document::{element::Element, traversal::TraversalContext},
    model::layer::Layer,
};

/// A parsed vector document: top-level elements plus the canvas size, if known.
///
/// Top-level elements render with no layer open, so shapes outside any named group are
/// dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
    size: Option<kurbo::Size>,
}

impl Document {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            size: None,
        }
    }

    pub fn with_size(mut self, size: kurbo::Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn size(&self) -> Option<kurbo::Size> {
        self.size
    }

    /// Flatten the tree into its ordered list of committed layers.
    #[tracing::instrument(skip_all, fields(elements = self.elements.len()))]
    pub fn render(&self) -> Vec<Layer> {
        let mut ctx = TraversalContext::new();
        self.render_into(&mut ctx);
        if ctx.dropped_shapes() > 0 {
            tracing::debug!(
                dropped = ctx.dropped_shapes(),
                "shapes outside any named group were dropped"
            );
        }
        let layers = ctx.finish();
        tracing::debug!(layers = layers.len(), "document flattened");
        layers
    }

    /// Render every drawable top-level element into a caller-owned context.
    pub fn render_into(&self, ctx: &mut TraversalContext) {
        let scope = ctx.current();
        for element in self.elements.iter().filter(|e| e.is_drawable()) {
            element.render(ctx);
            ctx.restore(scope);
        }
    }
}
