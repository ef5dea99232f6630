/// Convenience result type used across vecmesh.
pub type VecmeshResult<T> = Result<T, VecmeshError>;

/// Top-level error taxonomy for the fallible outer surfaces (settings, import, CLI).
///
/// The flattening, frame selection and combine stages never fail; they degrade to defined
/// fallbacks instead.
#[derive(thiserror::Error, Debug)]
pub enum VecmeshError {
    /// Invalid user-provided settings or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while converting a parsed vector document into elements.
    #[error("import error: {0}")]
    Import(String),

    /// Errors reported by the path tessellator.
    #[error("tessellation error: {0}")]
    Tessellation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VecmeshError {
    /// Build a [`VecmeshError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VecmeshError::Import`] value.
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`VecmeshError::Tessellation`] value.
    pub fn tessellation(msg: impl Into<String>) -> Self {
        Self::Tessellation(msg.into())
    }

    /// Build a [`VecmeshError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
