use super::*;
use crate::{
    document::{
        element::{OtherElement, ShapeElement},
        tree::Document,
    },
    foundation::core::Rgba8,
    model::{
        layer::Layer,
        shape::{Geometry, Shape},
    },
};

fn shape(tag: u8) -> Shape {
    Shape::solid(
        Geometry::new(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], vec![0, 1, 2]),
        Rgba8::opaque(tag, 0, 0),
    )
}

fn leaf(tags: &[u8]) -> Element {
    ShapeElement::anonymous(tags.iter().copied().map(shape).collect()).into()
}

fn tags(layer: &Layer) -> Vec<u8> {
    layer
        .shapes
        .iter()
        .map(|s| match s.paint() {
            crate::model::shape::Paint::Solid(c) => c.r,
            crate::model::shape::Paint::Gradient(_) => panic!("unexpected gradient"),
        })
        .collect()
}

fn names(layers: &[Layer]) -> Vec<&str> {
    layers.iter().map(|l| l.name.as_str()).collect()
}

#[test]
fn unnamed_groups_flatten_into_nearest_named_ancestor_in_document_order() {
    let doc = Document::new(vec![
        GroupElement::named(
            "root",
            vec![
                leaf(&[1]),
                GroupElement::unnamed(vec![
                    leaf(&[2]),
                    GroupElement::unnamed(vec![leaf(&[3, 4])]).into(),
                    leaf(&[5]),
                ])
                .into(),
                leaf(&[6]),
            ],
        )
        .into(),
    ]);

    let layers = doc.render();
    assert_eq!(names(&layers), vec!["root"]);
    assert_eq!(tags(&layers[0]), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn named_group_without_shapes_is_not_committed() {
    let doc = Document::new(vec![
        GroupElement::named("empty", vec![]).into(),
        GroupElement::named(
            "only_other",
            vec![OtherElement::new("image", None).into()],
        )
        .into(),
        GroupElement::named("nested_empty", vec![GroupElement::unnamed(vec![]).into()]).into(),
        GroupElement::named("full", vec![leaf(&[1])]).into(),
    ]);

    let layers = doc.render();
    assert_eq!(names(&layers), vec!["full"]);
}

#[test]
fn siblings_after_nested_named_group_return_to_parent_layer() {
    let doc = Document::new(vec![
        GroupElement::named(
            "parent",
            vec![
                leaf(&[1]),
                GroupElement::named("child", vec![leaf(&[2])]).into(),
                leaf(&[3]),
                GroupElement::named("child2", vec![leaf(&[4])]).into(),
                leaf(&[5]),
            ],
        )
        .into(),
    ]);

    let layers = doc.render();
    assert_eq!(names(&layers), vec!["child", "child2", "parent"]);
    assert_eq!(tags(&layers[0]), vec![2]);
    assert_eq!(tags(&layers[1]), vec![4]);
    assert_eq!(tags(&layers[2]), vec![1, 3, 5]);
}

#[test]
fn unnamed_group_restores_ancestor_scope_after_nested_named_group() {
    let doc = Document::new(vec![
        GroupElement::named(
            "outer",
            vec![
                GroupElement::unnamed(vec![
                    GroupElement::named("inner", vec![leaf(&[1])]).into(),
                    leaf(&[2]),
                ])
                .into(),
            ],
        )
        .into(),
    ]);

    let layers = doc.render();
    assert_eq!(names(&layers), vec!["inner", "outer"]);
    assert_eq!(tags(&layers[1]), vec![2]);
}

#[test]
fn group_leaves_context_cleared_when_it_owned_it() {
    let mut ctx = TraversalContext::new();
    GroupElement::named("a", vec![leaf(&[1])]).render(&mut ctx);
    assert_eq!(ctx.current(), None);
    assert_eq!(ctx.committed_layers().len(), 1);
}

#[test]
fn unnamed_group_inside_open_scope_does_not_close_it() {
    let mut ctx = TraversalContext::new();
    let scope = ctx.open_group("host");
    GroupElement::unnamed(vec![leaf(&[1])]).render(&mut ctx);
    assert_eq!(ctx.current(), Some(scope));
    assert!(ctx.committed_layers().is_empty());
    ctx.close_group(scope);
    assert_eq!(ctx.committed_layers().len(), 1);
}

#[test]
fn frame_tagged_groups_commit_and_orphan_shapes_drop() {
    let doc = Document::new(vec![
        GroupElement::named("f:0", vec![leaf(&[1]), leaf(&[2])]).into(),
        GroupElement::named("f:1", vec![leaf(&[3])]).into(),
        GroupElement::unnamed(vec![leaf(&[9])]).into(),
    ]);

    let mut ctx = TraversalContext::new();
    doc.render_into(&mut ctx);
    assert_eq!(ctx.dropped_shapes(), 1);

    let layers = ctx.finish();
    assert_eq!(names(&layers), vec!["f:0", "f:1"]);
    assert_eq!(tags(&layers[0]), vec![1, 2]);
    assert_eq!(tags(&layers[1]), vec![3]);
}

#[test]
fn empty_names_are_treated_as_unnamed() {
    let g = GroupElement::new(Some(String::new()), vec![leaf(&[1])]);
    assert_eq!(g.name(), None);
    assert!(Document::new(vec![g.into()]).render().is_empty());
}

#[test]
fn element_names_and_drawability() {
    let g: Element = GroupElement::named("g", vec![]).into();
    let s: Element = ShapeElement::new(Some("s".into()), vec![]).into();
    let o: Element = OtherElement::new("text", Some("t".into())).into();
    assert_eq!(g.name(), Some("g"));
    assert_eq!(s.name(), Some("s"));
    assert_eq!(o.name(), Some("t"));
    assert!(g.is_drawable() && s.is_drawable());
    assert!(!o.is_drawable());
}
