use crate::document::{
    element::{Element, non_empty},
    traversal::TraversalContext,
};

/// Composite node that scopes a layer.
///
/// A named group opens its own layer for the duration of its render; an unnamed group is a
/// pass-through whose children append to the nearest open ancestor layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupElement {
    name: Option<String>,
    children: Vec<Element>,
}

impl GroupElement {
    pub fn new(name: Option<String>, children: Vec<Element>) -> Self {
        Self {
            name: non_empty(name),
            children,
        }
    }

    pub fn named(name: impl Into<String>, children: Vec<Element>) -> Self {
        Self::new(Some(name.into()), children)
    }

    pub fn unnamed(children: Vec<Element>) -> Self {
        Self::new(None, children)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push(&mut self, child: impl Into<Element>) {
        self.children.push(child.into());
    }

    /// Render children in document order into this group's scope.
    ///
    /// After every drawable child the scope this group renders into is made current again, so
    /// siblings that follow a nested named group still land in this group's layer.
    pub fn render(&self, ctx: &mut TraversalContext) {
        let own = self.name.as_deref().map(|name| ctx.open_group(name));
        let scope = own.or(ctx.current());

        for child in self.children.iter().filter(|c| c.is_drawable()) {
            child.render(ctx);
            ctx.restore(scope);
        }

        if let Some(own) = own {
            ctx.close_group(own);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/group.rs"]
mod tests;
