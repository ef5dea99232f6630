use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{VecmeshError, VecmeshResult};

/// Vertex color precision of combined mesh buffers.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    /// Four normalized bytes per vertex.
    #[default]
    Unorm8,
    /// Four `f32` channels per vertex.
    Float32,
}

/// Per-render policy consumed by [`crate::combine`].
///
/// Supplied by the host for every render; the combiner never stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MeshSettings {
    /// Emit per-vertex gradient coordinates instead of flattening gradients to a solid color.
    pub use_gradients: bool,
    /// Vertex color precision.
    pub color_format: ColorFormat,
    /// Fractional bits kept when snapping vertex positions. `0` disables snapping.
    pub compression_depth: u8,
    /// Add a feathered fringe along shape silhouettes.
    pub antialiasing: bool,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            use_gradients: true,
            color_format: ColorFormat::Unorm8,
            compression_depth: 0,
            antialiasing: false,
        }
    }
}

impl MeshSettings {
    /// Largest accepted [`MeshSettings::compression_depth`] (the `f32` mantissa width).
    pub const MAX_COMPRESSION_DEPTH: u8 = 23;

    pub fn validate(&self) -> VecmeshResult<()> {
        if self.compression_depth > Self::MAX_COMPRESSION_DEPTH {
            return Err(VecmeshError::validation(format!(
                "compression_depth must be <= {}, got {}",
                Self::MAX_COMPRESSION_DEPTH,
                self.compression_depth
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VecmeshResult<Self> {
        let settings: Self = serde_json::from_reader(r)
            .map_err(|e| VecmeshError::serde(format!("parse mesh settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_str(s: &str) -> VecmeshResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and validate settings from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VecmeshResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VecmeshError::validation(format!("open mesh settings '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/settings.rs"]
mod tests;
