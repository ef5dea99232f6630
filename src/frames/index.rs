use std::collections::BTreeMap;

use crate::{frames::name::parse_frame_name, model::layer::Layer};

/// Frame number to layer position, derived from layer names.
///
/// Values are positions into the layer list the index was built from. Rebuilding from the same
/// layers always yields the same index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameIndex {
    frames: BTreeMap<i32, usize>,
}

impl FrameIndex {
    /// Scan `layers` in order; when two layers carry the same frame number the later one wins.
    #[tracing::instrument(skip_all, fields(layers = layers.len()))]
    pub fn build(layers: &[Layer]) -> Self {
        let mut frames = BTreeMap::new();
        for (pos, layer) in layers.iter().enumerate() {
            let Some(key) = parse_frame_name(&layer.name) else {
                continue;
            };
            if let Some(prev) = frames.insert(key, pos) {
                tracing::debug!(key, prev, pos, "duplicate frame key; later layer wins");
            }
        }
        tracing::debug!(frames = frames.len(), "frame index rebuilt");
        Self { frames }
    }

    /// Layer position for frame `key`.
    pub fn get(&self, key: i32) -> Option<usize> {
        self.frames.get(&key).copied()
    }

    pub fn contains(&self, key: i32) -> bool {
        self.frames.contains_key(&key)
    }

    /// Number of distinct frame keys.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `(frame, layer position)` pairs in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.frames.iter().map(|(&k, &v)| (k, v))
    }
}

/// Lookup key for a continuous frame value: `floor(frame)`.
///
/// Non-finite values and values outside the `i32` range have no key.
pub fn frame_key(frame: f32) -> Option<i32> {
    let floored = f64::from(frame).floor();
    if floored.is_finite() && floored >= f64::from(i32::MIN) && floored <= f64::from(i32::MAX) {
        Some(floored as i32)
    } else {
        None
    }
}

/// Result of [`select_frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSelection<'a> {
    /// Layers to hand to [`crate::combine`].
    pub layers: &'a [Layer],
    /// Frame number that matched, or `None` when falling back to all layers.
    pub matched: Option<i32>,
    /// Index to cache for the next selection.
    pub index: FrameIndex,
    /// Count of all layers (not distinct frame keys); a nominal animation length.
    pub length: usize,
}

/// Pick the layers to render for `frame`.
///
/// The index is rebuilt from `layers` when `document_changed` is set or no cached index is
/// given; otherwise `cached` is reused. If `floor(frame)` names a tagged layer, exactly that
/// layer is selected; otherwise every layer is.
pub fn select_frame(
    layers: &[Layer],
    frame: f32,
    cached: Option<FrameIndex>,
    document_changed: bool,
) -> FrameSelection<'_> {
    let index = match cached {
        Some(index) if !document_changed => index,
        _ => FrameIndex::build(layers),
    };

    let hit = frame_key(frame).and_then(|key| {
        let pos = index.get(key)?;
        layers.get(pos).map(|layer| (key, layer))
    });

    let (selected, matched) = match hit {
        Some((key, layer)) => (std::slice::from_ref(layer), Some(key)),
        None => (layers, None),
    };

    FrameSelection {
        layers: selected,
        matched,
        index,
        length: layers.len(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/index.rs"]
mod tests;
