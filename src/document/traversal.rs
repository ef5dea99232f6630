use crate::model::{layer::Layer, shape::Shape};

/// Handle for a layer scope opened by a named group during one traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

#[derive(Debug)]
struct OpenScope {
    id: ScopeId,
    layer: Layer,
}

/// Mutable state for one render traversal: the scope currently accepting shapes and the
/// layers committed so far.
///
/// A context is threaded by `&mut` through every element render. It is owned by the
/// traversal driver ([`crate::Document::render`]) and lives exactly as long as one pass, so
/// traversals of different documents never share state.
#[derive(Debug, Default)]
pub struct TraversalContext {
    current: Option<ScopeId>,
    open: Vec<OpenScope>,
    committed: Vec<Layer>,
    next_scope: u32,
    dropped_shapes: usize,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope currently accepting shapes, if any.
    pub fn current(&self) -> Option<ScopeId> {
        self.current
    }

    /// Open a fresh empty layer named `name` and make it the current scope.
    pub fn open_group(&mut self, name: &str) -> ScopeId {
        let id = ScopeId(self.next_scope);
        self.next_scope += 1;
        self.open.push(OpenScope {
            id,
            layer: Layer::new(name),
        });
        self.current = Some(id);
        tracing::trace!(?id, name, "open group");
        id
    }

    /// Make `scope` the current scope again. Used by a group after each child render.
    pub fn restore(&mut self, scope: Option<ScopeId>) {
        self.current = scope;
    }

    /// Append shapes to the current scope's layer, in order.
    ///
    /// Returns `false` when no scope is open; the shapes are then dropped.
    pub fn append_shapes(&mut self, shapes: impl IntoIterator<Item = Shape>) -> bool {
        let target = self
            .current
            .and_then(|id| self.open.iter_mut().rev().find(|s| s.id == id));
        match target {
            Some(scope) => {
                scope.layer.append_shapes(shapes);
                true
            }
            None => {
                let dropped = shapes.into_iter().count();
                self.dropped_shapes += dropped;
                tracing::trace!(dropped, "no open layer; shapes dropped");
                false
            }
        }
    }

    /// Close `scope`: commit its layer if it holds at least one shape, then clear the current
    /// scope if it still refers to `scope`.
    ///
    /// Closing a scope that is no longer open is a no-op. Returns whether a layer was committed.
    pub fn close_group(&mut self, scope: ScopeId) -> bool {
        let mut committed = false;
        if let Some(pos) = self.open.iter().rposition(|s| s.id == scope) {
            let OpenScope { layer, .. } = self.open.remove(pos);
            if !layer.is_empty() {
                tracing::trace!(name = %layer.name, shapes = layer.len(), "commit layer");
                self.committed.push(layer);
                committed = true;
            }
        }
        if self.current == Some(scope) {
            self.current = None;
        }
        committed
    }

    /// Layers committed so far, in commit order.
    pub fn committed_layers(&self) -> &[Layer] {
        &self.committed
    }

    /// Number of shapes rendered while no layer was open.
    pub fn dropped_shapes(&self) -> usize {
        self.dropped_shapes
    }

    /// Consume the context and return the committed layers.
    pub fn finish(self) -> Vec<Layer> {
        self.committed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/traversal.rs"]
mod tests;
