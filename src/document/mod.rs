//! Document tree and the traversal that flattens it into layers.

pub(crate) mod element;
pub(crate) mod group;
pub(crate) mod traversal;
pub(crate) mod tree;
