//! vecmesh flattens hierarchical vector-graphics documents into renderable triangle meshes.
//!
//! The pipeline has three stages:
//!
//! - Traverse a [`Document`] into ordered [`Layer`]s, one per named group
//!   ([`Document::render`])
//! - Optionally pick the layer tagged `f:<n>` for a sprite frame ([`select_frame`],
//!   [`FrameRenderer`])
//! - Merge the selected layers into per-material vertex buffers ([`combine`])
//!
//! Documents are usually produced from SVG with [`parse_svg`] or [`load_svg`].
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod document;
pub(crate) mod frames;
pub(crate) mod import;
pub(crate) mod mesh;
pub(crate) mod model;

pub use crate::foundation::core::{Affine, Point, Rgba8, transform_vertex};
pub use crate::foundation::error::{VecmeshError, VecmeshResult};

pub use crate::document::element::{Element, OtherElement, ShapeElement};
pub use crate::document::group::GroupElement;
pub use crate::document::traversal::{ScopeId, TraversalContext};
pub use crate::document::tree::Document;
pub use crate::frames::index::{FrameIndex, FrameSelection, frame_key, select_frame};
pub use crate::frames::name::{FRAME_PREFIX, FRAME_SEPARATOR, frame_layer_name, parse_frame_name};
pub use crate::frames::renderer::FrameRenderer;
pub use crate::import::options::ImportOptions;
pub use crate::import::svg::{document_from_tree, load_svg, parse_svg};
pub use crate::mesh::buffer::{MeshBuffer, VertexColors};
pub use crate::mesh::combine::{CombinedMesh, combine};
pub use crate::mesh::material::{BlendKind, FillKind, MaterialDescriptor, MaterialKey};
pub use crate::mesh::settings::{ColorFormat, MeshSettings};
pub use crate::mesh::summary::{BufferSummary, MeshSummary};
pub use crate::model::layer::Layer;
pub use crate::model::shape::{
    Geometry, Gradient, GradientKind, GradientStop, Paint, Shape, SpreadMethod,
};
