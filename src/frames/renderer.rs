use std::sync::Arc;

use crate::{
    document::tree::Document,
    frames::index::{FrameIndex, select_frame},
    mesh::{
        combine::{CombinedMesh, combine},
        settings::MeshSettings,
    },
    model::layer::Layer,
};

/// Stateful sprite-frame renderer for one document instance.
///
/// Caches the flattened layers and the frame index per document identity (`Arc` pointer), and
/// the last combined mesh per frame value. Not meant to be shared across threads while
/// rendering; give each thread its own renderer.
#[derive(Debug)]
pub struct FrameRenderer {
    document: Option<Arc<Document>>,
    settings: MeshSettings,
    frame: f32,
    last_frame: f32,
    rendered_document: Option<Arc<Document>>,
    layers: Vec<Layer>,
    index: Option<FrameIndex>,
    matched: Option<i32>,
    mesh: Option<CombinedMesh>,
    settings_dirty: bool,
}

impl FrameRenderer {
    pub fn new(settings: MeshSettings) -> Self {
        Self {
            document: None,
            settings,
            frame: 0.0,
            last_frame: 0.0,
            rendered_document: None,
            layers: Vec::new(),
            index: None,
            matched: None,
            mesh: None,
            settings_dirty: false,
        }
    }

    pub fn with_document(mut self, document: Arc<Document>) -> Self {
        self.set_document(document);
        self
    }

    pub fn set_document(&mut self, document: Arc<Document>) {
        self.document = Some(document);
    }

    pub fn clear_document(&mut self) {
        self.document = None;
    }

    pub fn document(&self) -> Option<&Arc<Document>> {
        self.document.as_ref()
    }

    pub fn set_frame(&mut self, frame: f32) {
        self.frame = frame;
    }

    pub fn frame(&self) -> f32 {
        self.frame
    }

    pub fn set_settings(&mut self, settings: MeshSettings) {
        if settings != self.settings {
            self.settings = settings;
            self.settings_dirty = true;
        }
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    /// Number of flattened layers of the last rendered document.
    pub fn length(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn frame_index(&self) -> Option<&FrameIndex> {
        self.index.as_ref()
    }

    /// Frame number selected by the last regeneration, `None` if all layers were rendered.
    pub fn matched_frame(&self) -> Option<i32> {
        self.matched
    }

    pub fn mesh(&self) -> Option<&CombinedMesh> {
        self.mesh.as_ref()
    }

    /// Regenerate the mesh if anything it depends on changed; returns whether it did.
    ///
    /// A changed frame value always regenerates, even when it maps to the same frame key. The
    /// document is re-flattened and the frame index rebuilt only when the document identity
    /// changed.
    pub fn refresh(&mut self, force: bool) -> bool {
        let frame_changed = self.frame.to_bits() != self.last_frame.to_bits();
        let document_changed = !same_document(&self.document, &self.rendered_document);
        let regenerate = force
            || frame_changed
            || document_changed
            || self.settings_dirty
            || self.mesh.is_none();

        if regenerate {
            self.regenerate(document_changed);
        }
        self.last_frame = self.frame;
        regenerate
    }

    /// Refresh without forcing and return the current mesh.
    pub fn render(&mut self) -> &CombinedMesh {
        self.refresh(false);
        self.mesh.get_or_insert_with(CombinedMesh::default)
    }

    #[tracing::instrument(skip(self), fields(frame = self.frame))]
    fn regenerate(&mut self, document_changed: bool) {
        if document_changed {
            self.layers = self
                .document
                .as_deref()
                .map(Document::render)
                .unwrap_or_default();
            self.rendered_document = self.document.clone();
        }

        let selection = select_frame(
            &self.layers,
            self.frame,
            self.index.take(),
            document_changed,
        );
        self.mesh = Some(combine(selection.layers, &self.settings));
        self.matched = selection.matched;
        self.index = Some(selection.index);
        self.settings_dirty = false;
        tracing::debug!(matched = ?self.matched, length = self.layers.len(), "frame mesh regenerated");
    }
}

fn same_document(a: &Option<Arc<Document>>, b: &Option<Arc<Document>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/renderer.rs"]
mod tests;
