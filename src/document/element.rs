use crate::{
    document::{group::GroupElement, traversal::TraversalContext},
    model::shape::Shape,
};

/// A node of the document tree, dispatched per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Scopes a layer and contains child elements.
    Group(GroupElement),
    /// Drawable leaf holding already-tessellated shapes.
    Shape(ShapeElement),
    /// Non-drawable node (images, text, metadata). Skipped during rendering.
    Other(OtherElement),
}

impl Element {
    /// Layer/frame identity name, if the element declares a non-empty one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Element::Group(g) => g.name(),
            Element::Shape(s) => s.name(),
            Element::Other(o) => o.id.as_deref(),
        }
    }

    pub fn is_drawable(&self) -> bool {
        !matches!(self, Element::Other(_))
    }

    /// Render into the traversal context.
    pub fn render(&self, ctx: &mut TraversalContext) {
        match self {
            Element::Group(g) => g.render(ctx),
            Element::Shape(s) => s.render(ctx),
            Element::Other(_) => {}
        }
    }
}

impl From<GroupElement> for Element {
    fn from(g: GroupElement) -> Self {
        Element::Group(g)
    }
}

impl From<ShapeElement> for Element {
    fn from(s: ShapeElement) -> Self {
        Element::Shape(s)
    }
}

impl From<OtherElement> for Element {
    fn from(o: OtherElement) -> Self {
        Element::Other(o)
    }
}

/// Leaf element whose shapes go to whichever layer is open when it renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeElement {
    id: Option<String>,
    shapes: Vec<Shape>,
}

impl ShapeElement {
    pub fn new(id: Option<String>, shapes: Vec<Shape>) -> Self {
        Self {
            id: non_empty(id),
            shapes,
        }
    }

    pub fn anonymous(shapes: Vec<Shape>) -> Self {
        Self::new(None, shapes)
    }

    pub fn name(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn render(&self, ctx: &mut TraversalContext) {
        if self.shapes.is_empty() {
            return;
        }
        ctx.append_shapes(self.shapes.iter().cloned());
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OtherElement {
    pub tag: String,
    pub id: Option<String>,
}

impl OtherElement {
    pub fn new(tag: impl Into<String>, id: Option<String>) -> Self {
        Self {
            tag: tag.into(),
            id: non_empty(id),
        }
    }
}

pub(crate) fn non_empty(name: Option<String>) -> Option<String> {
    name.filter(|n| !n.is_empty())
}
