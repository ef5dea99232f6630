//! SVG import: usvg parsing and lyon tessellation into a [`crate::Document`].

pub(crate) mod options;
pub(crate) mod paint;
pub(crate) mod svg;
pub(crate) mod tessellate;
