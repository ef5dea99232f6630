//! Shared primitives: colors, transforms, hashing and the error taxonomy.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
