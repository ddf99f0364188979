// crates/contract-blueprint-core/src/core/annotation/tests.rs
// ============================================================================
// Module: Annotation Merger Unit Tests
// Description: Unit coverage for annotation overlay semantics.
// Purpose: Ensure merges never clobber and misplaced annotations fail.
// Dependencies: crate::core::{annotation, schema, types}
// ============================================================================

//! ## Overview
//! Exercises [`super::merge_annotation`] against sum, record, and primitive
//! nodes.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use super::AnnotationTable;
use super::merge_annotation;
use crate::core::error::BlueprintError;
use crate::core::schema::Annotation;
use crate::core::schema::SchemaKind;
use crate::core::schema::SchemaNode;
use crate::core::types::TypeKey;

fn key() -> TypeKey {
    TypeKey::new("Test", "Either")
}

fn left_right() -> SchemaNode {
    SchemaNode::one_of(vec![
        SchemaNode::constructor(0, Vec::new()).annotated(&Annotation::titled("Left")),
        SchemaNode::constructor(1, Vec::new()).annotated(&Annotation::titled("Right")),
    ])
}

#[test]
fn title_only_keeps_existing_description_and_comment() {
    let mut base = SchemaNode::integer();
    base.annotation.description = Some(String::from("derived description"));
    base.annotation.comment = Some(String::from("derived comment"));

    let merged =
        merge_annotation(&key(), base, Some(&Annotation::titled("Amount")), None).unwrap();

    assert_eq!(merged.annotation.title.as_deref(), Some("Amount"));
    assert_eq!(merged.annotation.description.as_deref(), Some("derived description"));
    assert_eq!(merged.annotation.comment.as_deref(), Some("derived comment"));
}

#[test]
fn constructor_annotation_targets_matching_index_only() {
    let comment = Annotation::commented("Right redeemer");
    let merged = merge_annotation(&key(), left_right(), None, Some((1, &comment))).unwrap();

    let SchemaKind::OneOf(alternatives) = &merged.kind else {
        panic!("expected oneOf");
    };
    assert_eq!(alternatives[0].annotation.comment, None);
    assert_eq!(alternatives[1].annotation.comment.as_deref(), Some("Right redeemer"));
    assert_eq!(alternatives[1].annotation.title.as_deref(), Some("Right"));
}

#[test]
fn constructor_annotation_on_record_applies_to_node() {
    let record = SchemaNode::constructor(0, vec![SchemaNode::integer()]);
    let merged =
        merge_annotation(&key(), record, None, Some((0, &Annotation::commented("only")))).unwrap();
    assert_eq!(merged.annotation.comment.as_deref(), Some("only"));
}

#[test]
fn constructor_annotation_on_primitive_is_misplaced() {
    let err = merge_annotation(
        &key(),
        SchemaNode::bytes(),
        None,
        Some((0, &Annotation::commented("nope"))),
    )
    .unwrap_err();
    assert!(matches!(err, BlueprintError::MisplacedAnnotation { .. }));
}

#[test]
fn constructor_annotation_with_unknown_index_is_misplaced() {
    let err = merge_annotation(&key(), left_right(), None, Some((7, &Annotation::titled("x"))))
        .unwrap_err();
    let BlueprintError::MisplacedAnnotation {
        reason, ..
    } = err
    else {
        panic!("expected misplaced annotation");
    };
    assert!(reason.contains("index 7"));
}

#[test]
fn table_overlays_repeated_annotations() {
    let mut table = AnnotationTable::new();
    table.annotate_type(key(), Annotation::titled("First"));
    table.annotate_type(key(), Annotation::default().with_description("Second"));

    let annotation = table.for_type(&key()).unwrap();
    assert_eq!(annotation.title.as_deref(), Some("First"));
    assert_eq!(annotation.description.as_deref(), Some("Second"));
}

#[test]
fn table_lists_constructor_annotations_in_index_order() {
    let mut table = AnnotationTable::new();
    table.annotate_constructor(key(), 1, Annotation::commented("b"));
    table.annotate_constructor(key(), 0, Annotation::commented("a"));

    let indices: Vec<u64> = table.for_constructors(&key()).map(|(index, _)| index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(table.for_constructors(&TypeKey::new("Test", "Other")).count(), 0);
}
