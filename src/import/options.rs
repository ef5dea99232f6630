use crate::foundation::error::{VecmeshError, VecmeshResult};

/// Options for converting an SVG file into a [`crate::Document`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    /// Maximum curve flattening error, in canvas units.
    pub tolerance: f32,
    /// Tessellate strokes in addition to fills.
    pub strokes: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            strokes: true,
        }
    }
}

impl ImportOptions {
    pub fn validate(&self) -> VecmeshResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(VecmeshError::validation(format!(
                "tolerance must be finite and > 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
