use super::*;
use crate::{
    foundation::core::{Affine, Point},
    mesh::settings::ColorFormat,
    model::shape::{Geometry, GradientStop},
};

fn quad(x: f32) -> Geometry {
    Geometry::new(
        vec![[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0]],
        vec![0, 1, 2, 0, 2, 3],
    )
}

fn solid(x: f32, color: Rgba8) -> Shape {
    Shape::solid(quad(x), color)
}

fn gradient() -> Arc<Gradient> {
    Arc::new(Gradient::new(
        GradientKind::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 0.0),
        },
        Affine::IDENTITY,
        vec![
            GradientStop {
                offset: 0.0,
                color: Rgba8::opaque(255, 0, 0),
            },
            GradientStop {
                offset: 1.0,
                color: Rgba8::opaque(0, 0, 255),
            },
        ],
    ))
}

fn settings() -> MeshSettings {
    MeshSettings::default()
}

#[test]
fn empty_input_yields_empty_mesh() {
    let out = combine(&[], &settings());
    assert!(out.is_empty());
    assert_eq!(out.buffers().len(), out.materials().len());
    assert_eq!(out.buffers().len(), 0);
}

#[test]
fn layers_without_geometry_yield_empty_mesh() {
    let layers = vec![Layer::with_shapes(
        "a",
        vec![Shape::solid(Geometry::default(), Rgba8::WHITE)],
    )];
    assert!(combine(&layers, &settings()).is_empty());
}

#[test]
fn same_material_shapes_share_a_buffer_in_layer_then_shape_order() {
    let red = Rgba8::opaque(255, 0, 0);
    let layers = vec![
        Layer::with_shapes("a", vec![solid(0.0, red), solid(2.0, red)]),
        Layer::with_shapes("b", vec![solid(4.0, red)]),
    ];
    let out = combine(&layers, &settings());
    assert_eq!(out.len(), 1);

    let buffer = &out.buffers()[0];
    assert_eq!(buffer.vertex_count(), 12);
    assert_eq!(buffer.triangle_count(), 6);
    assert_eq!(buffer.positions[0], [0.0, 0.0]);
    assert_eq!(buffer.positions[4], [2.0, 0.0]);
    assert_eq!(buffer.positions[8], [4.0, 0.0]);
    assert_eq!(&buffer.indices[6..12], &[4, 5, 6, 4, 6, 7]);
    assert_eq!(out.materials()[0].key.label(), "solid_opaque");
}

#[test]
fn material_change_splits_buffers_and_preserves_order() {
    let opaque = Rgba8::opaque(1, 2, 3);
    let translucent = Rgba8::new(1, 2, 3, 128);
    let layers = vec![Layer::with_shapes(
        "a",
        vec![
            solid(0.0, opaque),
            solid(1.0, translucent),
            solid(2.0, opaque),
        ],
    )];
    let out = combine(&layers, &settings());
    let labels: Vec<_> = out.materials().iter().map(|m| m.key.label()).collect();
    assert_eq!(
        labels,
        vec!["solid_opaque", "solid_transparent", "solid_opaque"]
    );
    assert_eq!(out.buffers().len(), out.materials().len());
}

#[test]
fn gradients_emit_coordinates_and_share_ramps() {
    let g = gradient();
    let layers = vec![Layer::with_shapes(
        "a",
        vec![
            Shape::new(quad(0.0), Paint::Gradient(Arc::clone(&g))),
            Shape::new(quad(0.0), Paint::Gradient(Arc::clone(&g))),
        ],
    )];
    let out = combine(&layers, &settings());
    assert_eq!(out.len(), 1);

    let (buffer, material) = out.iter().next().unwrap();
    assert_eq!(material.key.fill, FillKind::Gradient);
    assert_eq!(material.gradients.len(), 1);
    assert_eq!(buffer.gradient_coords.len(), buffer.vertex_count());
    assert_eq!(buffer.gradient_coords[0], [0.0, 0.0]);
    assert_eq!(buffer.gradient_coords[1], [1.0, 0.0]);
    assert_eq!(
        buffer.colors,
        crate::mesh::buffer::VertexColors::Unorm8(vec![[255; 4]; 8])
    );
}

#[test]
fn disabled_gradients_flatten_to_solid() {
    let layers = vec![Layer::with_shapes(
        "a",
        vec![Shape::new(quad(0.0), Paint::Gradient(gradient()))],
    )];
    let s = MeshSettings {
        use_gradients: false,
        ..settings()
    };
    let out = combine(&layers, &s);
    let (buffer, material) = out.iter().next().unwrap();
    assert_eq!(material.key.fill, FillKind::Solid);
    assert!(material.gradients.is_empty());
    assert!(buffer.gradient_coords.is_empty());
    assert_eq!(
        buffer.colors,
        crate::mesh::buffer::VertexColors::Unorm8(vec![[128, 0, 128, 255]; 4])
    );
}

#[test]
fn float_color_format_and_quantization() {
    let layers = vec![Layer::with_shapes(
        "a",
        vec![Shape::solid(
            Geometry::new(vec![[0.3, 0.0], [1.0, 0.0], [0.0, 1.0]], vec![0, 1, 2]),
            Rgba8::opaque(255, 0, 0),
        )],
    )];
    let s = MeshSettings {
        color_format: ColorFormat::Float32,
        compression_depth: 1,
        ..settings()
    };
    let out = combine(&layers, &s);
    let buffer = &out.buffers()[0];
    assert_eq!(buffer.positions[0], [0.5, 0.0]);
    assert_eq!(buffer.colors.format(), ColorFormat::Float32);
    assert_eq!(out.materials()[0].key.color_format, ColorFormat::Float32);
    assert_eq!(buffer.to_bytes().len(), 3 * 8 + 3 * 16 + 3 * 4);
}

#[test]
fn antialiasing_adds_transparent_fringe() {
    let layers = vec![Layer::with_shapes(
        "a",
        vec![solid(0.0, Rgba8::opaque(9, 9, 9))],
    )];
    let s = MeshSettings {
        antialiasing: true,
        ..settings()
    };
    let out = combine(&layers, &s);
    let (buffer, material) = out.iter().next().unwrap();
    assert_eq!(material.key.label(), "solid_transparent_aa");
    assert_eq!(buffer.vertex_count(), 4 + 8);
    assert_eq!(buffer.triangle_count(), 2 + 8);
    let crate::mesh::buffer::VertexColors::Unorm8(colors) = &buffer.colors else {
        panic!("expected unorm8 colors");
    };
    assert!(colors[..4].iter().all(|c| c[3] == 255));
    assert!(colors[4..].iter().all(|c| c[3] == 0));
}

#[test]
fn vertex_limit_splits_buffers() {
    let per_shape = 4;
    let shapes = (0..(MeshBuffer::MAX_VERTICES / per_shape + 1))
        .map(|i| solid(i as f32, Rgba8::WHITE))
        .collect();
    let out = combine(&[Layer::with_shapes("big", shapes)], &settings());
    assert_eq!(out.len(), 2);
    assert!(
        out.buffers()
            .iter()
            .all(|b| b.vertex_count() <= MeshBuffer::MAX_VERTICES)
    );
    assert_eq!(out.materials()[0], out.materials()[1]);
}

#[test]
fn combine_is_deterministic() {
    let layers = vec![
        Layer::with_shapes("a", vec![solid(0.0, Rgba8::opaque(1, 1, 1))]),
        Layer::with_shapes(
            "b",
            vec![Shape::new(quad(3.0), Paint::Gradient(gradient()))],
        ),
    ];
    let s = MeshSettings {
        antialiasing: true,
        ..settings()
    };
    let a = combine(&layers, &s);
    let b = combine(&layers, &s);
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
    for (x, y) in a.buffers().iter().zip(b.buffers()) {
        assert_eq!(x.to_bytes(), y.to_bytes());
    }
    assert_ne!(a.fingerprint(), combine(&layers, &settings()).fingerprint());
}

#[test]
fn repeating_gradients_keep_unwrapped_coordinates() {
    let wide = Geometry::new(
        vec![[0.0, 0.0], [3.0, 0.0], [0.0, 1.0]],
        vec![0, 1, 2],
    );
    let repeat = Arc::new(
        Arc::unwrap_or_clone(gradient()).with_spread(crate::model::shape::SpreadMethod::Repeat),
    );
    let layers = vec![Layer::with_shapes(
        "a",
        vec![
            Shape::new(wide.clone(), Paint::Gradient(gradient())),
            Shape::new(wide, Paint::Gradient(Arc::clone(&repeat))),
        ],
    )];
    let out = combine(&layers, &settings());
    assert_eq!(out.len(), 1);

    let (buffer, material) = out.iter().next().unwrap();
    assert_eq!(material.gradients.len(), 2);
    assert_eq!(buffer.gradient_coords[1], [1.0, 0.0], "pad clamps at vertices");
    assert_eq!(buffer.gradient_coords[4], [3.0, 1.0], "repeat is wrapped by the host");
}

#[test]
fn oversized_shape_is_kept_whole_and_flagged() {
    let n = MeshBuffer::MAX_VERTICES + 2;
    let big = Geometry::new(
        (0..n).map(|i| [i as f32, (i % 2) as f32]).collect(),
        vec![0, 1, 2, (n - 3) as u32, (n - 2) as u32, (n - 1) as u32],
    );
    let layers = vec![Layer::with_shapes(
        "a",
        vec![solid(0.0, Rgba8::WHITE), Shape::solid(big, Rgba8::WHITE)],
    )];
    let out = combine(&layers, &settings());
    assert_eq!(out.len(), 2);
    assert!(!out.buffers()[0].exceeds_u16_indices());
    assert!(out.buffers()[1].exceeds_u16_indices());
    assert_eq!(out.buffers()[1].vertex_count(), n);

    let summary = out.summary();
    let flags: Vec<_> = summary.buffers.iter().map(|b| b.exceeds_u16_indices).collect();
    assert_eq!(flags, vec![false, true]);
}
