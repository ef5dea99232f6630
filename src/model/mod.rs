//! Passive data: shapes and the layers that bundle them.

pub(crate) mod layer;
pub(crate) mod shape;
