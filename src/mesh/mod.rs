//! Mesh combination: layers in, host-ready buffers and material descriptors out.

pub(crate) mod antialias;
pub(crate) mod buffer;
pub(crate) mod combine;
pub(crate) mod material;
pub(crate) mod settings;
pub(crate) mod summary;
