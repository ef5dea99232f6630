//! Frame-indexed layer selection for sprite-sheet style animation.

pub(crate) mod index;
pub(crate) mod name;
pub(crate) mod renderer;
