//! The `f:<n>` layer-name convention used by authoring tools to tag sprite frames.
//!
//! This is the only place layer names are interpreted.

/// Literal first segment of a frame-tagged name.
pub const FRAME_PREFIX: &str = "f";
/// Segment separator of a frame-tagged name.
pub const FRAME_SEPARATOR: char = ':';

/// Frame number encoded in a layer name, if any.
///
/// The name is split on `:`; the first segment must be exactly `f` and the second must parse as
/// a base-10 `i32` (optional sign, no whitespace). Segments after the second are ignored.
pub fn parse_frame_name(name: &str) -> Option<i32> {
    let mut parts = name.split(FRAME_SEPARATOR);
    if parts.next()? != FRAME_PREFIX {
        return None;
    }
    parts.next()?.parse().ok()
}

/// Canonical layer name for frame `n`.
pub fn frame_layer_name(n: i32) -> String {
    format!("{FRAME_PREFIX}{FRAME_SEPARATOR}{n}")
}
