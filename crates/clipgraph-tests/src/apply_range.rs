//! Integration tests for ApplyRange.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clipgraph_core::{ArgValue, Clip, ClipRef, GraphError};

use crate::fixtures::{audio_tags, frame_tag, tagged_stream, TaggedClip, TestGraph};

const SOURCE_TAG: u8 = 200;

fn source() -> ClipRef {
    TaggedClip::new(tagged_stream(4, 2, 100), SOURCE_TAG)
        .with_parity(true)
        .into_ref()
}

fn apply(graph: &TestGraph, context: &ClipRef, first: i32, last: i32) -> ClipRef {
    graph
        .invoke_clip(
            "ApplyRange",
            &[
                context.clone().into(),
                ArgValue::Int(first),
                ArgValue::Int(last),
                ArgValue::from("Tag"),
                ArgValue::Int(7),
            ],
        )
        .unwrap()
}

/// Range over frame 1, which is samples 1000..2000 at 1000 samples per
/// frame, plus the context's audio call counter.
fn counted_range(graph: &TestGraph) -> (ClipRef, Arc<AtomicUsize>) {
    let context_calls = Arc::new(AtomicUsize::new(0));
    let context = TaggedClip::new(tagged_stream(4, 2, 100), SOURCE_TAG)
        .with_audio_counter(Arc::clone(&context_calls))
        .into_ref();
    (apply(graph, &context, 1, 1), context_calls)
}

/// Read and reset `(context, filtered)` audio call counts.
fn take_calls(graph: &TestGraph, context_calls: &AtomicUsize) -> (usize, usize) {
    (
        context_calls.swap(0, Ordering::SeqCst),
        graph.filtered_audio_calls.swap(0, Ordering::SeqCst),
    )
}

fn audio(clip: &ClipRef, graph: &TestGraph, start: i64, count: i64) -> Vec<(u8, i64)> {
    let mut buf = vec![0u8; count as usize * 4];
    clip.get_audio(&mut buf, start, count, &graph.env).unwrap();
    audio_tags(&buf)
}

#[test]
fn frames_outside_the_range_are_the_context_frames() {
    let graph = TestGraph::default();
    let context = source();
    let range = apply(&graph, &context, 10, 20);

    for n in [0, 9, 21, 99] {
        let out = range.get_frame(n, &graph.env).unwrap();
        let expected = context.get_frame(n, &graph.env).unwrap();
        assert!(out.same_pixels(&expected), "frame {n} differs from context");
    }
    for n in [10, 15, 20] {
        assert_eq!(frame_tag(&*range, n, &graph.env), (7, n as u8));
    }
}

#[test]
fn filter_is_constructed_once() {
    let graph = TestGraph::default();
    let range = apply(&graph, &source(), 10, 20);
    for n in 0..40 {
        range.get_frame(n, &graph.env).unwrap();
    }
    assert_eq!(graph.constructions.count(), 1);
}

#[test]
fn single_frame_range_is_allowed() {
    let graph = TestGraph::default();
    let range = apply(&graph, &source(), 5, 5);
    assert_eq!(frame_tag(&*range, 4, &graph.env).0, SOURCE_TAG);
    assert_eq!(frame_tag(&*range, 5, &graph.env).0, 7);
    assert_eq!(frame_tag(&*range, 6, &graph.env).0, SOURCE_TAG);
}

#[test]
fn audio_switches_at_the_first_sample_of_the_range() {
    let graph = TestGraph::default();
    let (range, context_calls) = counted_range(&graph);

    let samples = audio(&range, &graph, 900, 200);
    assert_eq!(take_calls(&graph, &context_calls), (1, 1));
    assert_eq!(samples.len(), 200);
    assert!(samples[..100].iter().all(|&(tag, _)| tag == SOURCE_TAG));
    assert!(samples[100..].iter().all(|&(tag, _)| tag == 7));
    assert!(samples.iter().enumerate().all(|(i, &(_, s))| s == 900 + i as i64));
}

#[test]
fn audio_spanning_the_whole_range_has_three_zones() {
    let graph = TestGraph::default();
    let (range, context_calls) = counted_range(&graph);

    let samples = audio(&range, &graph, 500, 2000);
    assert_eq!(take_calls(&graph, &context_calls), (2, 1));
    let tags: Vec<u8> = samples.iter().map(|&(tag, _)| tag).collect();
    assert!(tags[..500].iter().all(|&t| t == SOURCE_TAG));
    assert!(tags[500..1500].iter().all(|&t| t == 7));
    assert!(tags[1500..].iter().all(|&t| t == SOURCE_TAG));
    assert_eq!(samples[1999], (SOURCE_TAG, 2499));
}

#[test]
fn audio_within_one_zone_is_a_single_call() {
    let graph = TestGraph::default();
    let (range, context_calls) = counted_range(&graph);

    assert!(audio(&range, &graph, 0, 1000).iter().all(|&(t, _)| t == SOURCE_TAG));
    assert_eq!(take_calls(&graph, &context_calls), (1, 0));

    assert!(audio(&range, &graph, 1000, 1000).iter().all(|&(t, _)| t == 7));
    assert_eq!(take_calls(&graph, &context_calls), (0, 1));

    assert!(audio(&range, &graph, 1200, 300).iter().all(|&(t, _)| t == 7));
    assert_eq!(take_calls(&graph, &context_calls), (0, 1));

    assert!(audio(&range, &graph, 2000, 50).iter().all(|&(t, _)| t == SOURCE_TAG));
    assert_eq!(take_calls(&graph, &context_calls), (1, 0));
}

#[test]
fn short_audio_buffer_is_an_error() {
    let graph = TestGraph::default();
    let range = apply(&graph, &source(), 1, 1);
    let mut buf = vec![0u8; 16];
    let err = range.get_audio(&mut buf, 900, 200, &graph.env).err().unwrap();
    assert!(matches!(err, GraphError::AudioBuffer { needed: 800, available: 16 }));
}

#[test]
fn parity_follows_the_active_clip() {
    let graph = TestGraph::default();
    let range = apply(&graph, &source(), 10, 20);
    // context parity is inverted relative to the tagged filter
    assert!(range.get_parity(8));
    assert!(!range.get_parity(10));
    assert!(range.get_parity(11));
    assert!(range.get_parity(22));
}

#[test]
fn invalid_ranges_are_rejected() {
    let graph = TestGraph::default();
    let call = |filter: &str, args: Vec<ArgValue>, first: i32, last: i32| {
        let mut all = vec![
            source().into(),
            ArgValue::Int(first),
            ArgValue::Int(last),
            ArgValue::from(filter),
        ];
        all.extend(args);
        graph.invoke_clip("ApplyRange", &all).err().map(|e| e.to_string())
    };

    assert_eq!(
        call("Tag", vec![ArgValue::Int(1)], 20, 10).as_deref(),
        Some("ApplyRange: final frame number must be greater than initial.")
    );
    assert_eq!(
        call("Widen", vec![ArgValue::Int(2)], 0, 10).as_deref(),
        Some("ApplyRange: Filtered and unfiltered video frame sizes must match")
    );
    assert_eq!(
        call("ToYV24", vec![], 0, 10).as_deref(),
        Some("ApplyRange: Filtered and unfiltered video colorspace must match")
    );
}

#[test]
fn range_over_a_stack_keeps_the_stack_layout() {
    let graph = TestGraph::default();
    let stacked = graph
        .invoke_clip("StackVertical", &[source().into(), source().into()])
        .unwrap();
    let range = apply(&graph, &stacked, 0, 3);
    assert_eq!(range.stream().height, 4);
    assert_eq!(frame_tag(&*range, 2, &graph.env), (7, 2));
    assert_eq!(frame_tag(&*range, 4, &graph.env), (SOURCE_TAG, 4));
}
