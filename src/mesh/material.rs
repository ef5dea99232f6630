use std::sync::Arc;

use crate::{mesh::settings::ColorFormat, model::shape::Gradient};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillKind {
    Solid,
    Gradient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendKind {
    Opaque,
    Transparent,
}

/// Everything that decides whether two shapes can share a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MaterialKey {
    pub fill: FillKind,
    pub blend: BlendKind,
    pub antialiased: bool,
    pub color_format: ColorFormat,
}

impl MaterialKey {
    /// Stable shader-style label, e.g. `gradient_transparent_aa`.
    pub fn label(&self) -> String {
        let fill = match self.fill {
            FillKind::Solid => "solid",
            FillKind::Gradient => "gradient",
        };
        let blend = match self.blend {
            BlendKind::Opaque => "opaque",
            BlendKind::Transparent => "transparent",
        };
        if self.antialiased {
            format!("{fill}_{blend}_aa")
        } else {
            format!("{fill}_{blend}")
        }
    }
}

/// Material state the host binds for one mesh buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialDescriptor {
    pub key: MaterialKey,
    /// Gradient ramps addressed by the buffer's `gradient_coords[..][1]`.
    pub gradients: Vec<Arc<Gradient>>,
}

impl MaterialDescriptor {
    pub fn new(key: MaterialKey) -> Self {
        Self {
            key,
            gradients: Vec::new(),
        }
    }

    /// Index of `gradient` in this material's ramp list, appending it if new.
    pub(crate) fn ramp_index(&mut self, gradient: &Arc<Gradient>) -> usize {
        if let Some(i) = self
            .gradients
            .iter()
            .position(|g| Arc::ptr_eq(g, gradient) || **g == **gradient)
        {
            return i;
        }
        self.gradients.push(Arc::clone(gradient));
        self.gradients.len() - 1
    }
}
