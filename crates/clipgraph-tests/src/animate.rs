//! Integration tests for Animate built through the function table.

use clipgraph_combine::{Animate, CombineConfig};
use clipgraph_core::{ArgValue, Clip, ClipRef, Environment, GraphError};

use crate::fixtures::{audio_tags, frame_tag, tagged_stream, TaggedClip, TestGraph};

fn source() -> ClipRef {
    TaggedClip::new(tagged_stream(4, 2, 100), 200).into_ref()
}

fn fade(graph: &TestGraph, filter: &str, cache_size: usize) -> Animate {
    Animate::new(
        Some(source()),
        0,
        10,
        filter,
        &[ArgValue::Int(0)],
        &[ArgValue::Int(100)],
        cache_size,
        &graph.env,
    )
    .unwrap()
}

#[test]
fn clip_overload_prepends_context() {
    let graph = TestGraph::default();
    let animated = graph
        .invoke_clip(
            "Animate",
            &[
                source().into(),
                ArgValue::Int(0),
                ArgValue::Int(10),
                ArgValue::from("Tag"),
                ArgValue::Int(0),
                ArgValue::Int(100),
            ],
        )
        .unwrap();

    assert_eq!(frame_tag(&*animated, 0, &graph.env), (0, 0));
    assert_eq!(frame_tag(&*animated, 5, &graph.env), (50, 5));
    assert_eq!(frame_tag(&*animated, 10, &graph.env), (100, 10));
    assert_eq!(animated.stream().num_frames, 100);
}

#[test]
fn plain_overload_passes_arguments_through() {
    let graph = TestGraph::default();
    let clip = source();
    let animated = graph
        .invoke_clip(
            "animate",
            &[
                ArgValue::Int(0),
                ArgValue::Int(10),
                ArgValue::from("Tag"),
                clip.clone().into(),
                ArgValue::Int(0),
                clip.into(),
                ArgValue::Int(100),
            ],
        )
        .unwrap();

    assert_eq!(frame_tag(&*animated, 3, &graph.env), (30, 3));
}

#[test]
fn frames_outside_the_range_clamp_to_the_endpoints() {
    let graph = TestGraph::default();
    let animated = graph
        .invoke_clip(
            "Animate",
            &[
                source().into(),
                ArgValue::Int(20),
                ArgValue::Int(30),
                ArgValue::from("Tag"),
                ArgValue::Int(0),
                ArgValue::Int(100),
            ],
        )
        .unwrap();

    assert_eq!(frame_tag(&*animated, 5, &graph.env), (0, 5));
    assert_eq!(frame_tag(&*animated, 25, &graph.env), (50, 25));
    assert_eq!(frame_tag(&*animated, 99, &graph.env), (100, 99));
}

#[test]
fn range_spanning_most_of_i32_builds_and_interpolates() {
    let graph = TestGraph::default();
    let animated = graph
        .invoke_clip(
            "Animate",
            &[
                source().into(),
                ArgValue::Int(-10),
                ArgValue::Int(i32::MAX),
                ArgValue::from("Tag"),
                ArgValue::Int(0),
                ArgValue::Int(100),
            ],
        )
        .unwrap();

    assert_eq!(frame_tag(&*animated, -10, &graph.env).0, 0);
    assert_eq!(frame_tag(&*animated, i32::MAX, &graph.env).0, 100);
    assert_eq!(frame_tag(&*animated, i32::MAX - 1, &graph.env).0, 99);
    assert_eq!(graph.constructions.tags(), vec![0, 100, 99]);
}

#[test]
fn each_stage_is_constructed_once_while_cached() {
    let graph = TestGraph::default();
    let animated = fade(&graph, "Tag", 3);
    assert_eq!(graph.constructions.tags(), vec![0, 100]);

    for _ in 0..3 {
        frame_tag(&animated, 5, &graph.env);
        frame_tag(&animated, 0, &graph.env);
        frame_tag(&animated, 10, &graph.env);
    }
    assert_eq!(graph.constructions.count(), 3);
    assert_eq!(graph.constructions.tags(), vec![0, 100, 50]);
}

#[test]
fn furthest_stage_is_evicted_first() {
    let graph = TestGraph::with_config(&CombineConfig { animate_cache_size: 2 }, &[]);
    let animated = fade(&graph, "Tag", 2);
    assert_eq!(animated.cached_stages(), vec![Some(0), Some(10)]);

    // distances 3, 7
    frame_tag(&animated, 3, &graph.env);
    assert_eq!(animated.cached_stages(), vec![Some(0), Some(3)]);

    // distances 10, 7
    frame_tag(&animated, 10, &graph.env);
    assert_eq!(animated.cached_stages(), vec![Some(10), Some(3)]);

    // stage 0 was evicted and has to be rebuilt
    assert_eq!(frame_tag(&animated, 0, &graph.env), (0, 0));
    assert_eq!(graph.constructions.tags(), vec![0, 100, 30, 100, 0]);
}

#[test]
fn audio_and_parity_come_from_the_first_instance() {
    let graph = TestGraph::with_config(&CombineConfig { animate_cache_size: 2 }, &[]);
    let animated = fade(&graph, "Tag", 2);

    // push stage 0 out of the cache
    frame_tag(&animated, 3, &graph.env);
    frame_tag(&animated, 10, &graph.env);
    assert!(!animated.cached_stages().contains(&Some(0)));

    let mut buf = vec![0u8; 3 * 4];
    animated.get_audio(&mut buf, 5000, 3, &graph.env).unwrap();
    assert_eq!(audio_tags(&buf), vec![(0, 5000), (0, 5001), (0, 5002)]);

    assert!(!animated.get_parity(4));
    assert!(animated.get_parity(7));
}

#[test]
fn construction_error_during_get_frame_leaves_cache_intact() {
    let graph = TestGraph::with_config(&CombineConfig::default(), &[50]);
    let animated = fade(&graph, "Fail", 3);
    let before = animated.cached_stages();

    let err = animated.get_frame(5, &graph.env).err().unwrap();
    assert_eq!(err.to_string(), "Fail: refusing tag 50");
    assert_eq!(animated.cached_stages(), before);

    // distances 4, 6, 5: the empty slot counts as stage -1
    assert_eq!(frame_tag(&animated, 4, &graph.env), (40, 4));
    assert_eq!(animated.cached_stages(), vec![Some(0), Some(4), None]);
}

#[test]
fn endpoint_must_construct() {
    let graph = TestGraph::with_config(&CombineConfig::default(), &[100]);
    let err = Animate::new(
        Some(source()),
        0,
        10,
        "Fail",
        &[ArgValue::Int(0)],
        &[ArgValue::Int(100)],
        3,
        &graph.env,
    )
    .err()
    .unwrap();
    assert!(matches!(err, GraphError::Filter { ref name, .. } if name == "Fail"));
}

#[test]
fn invalid_constructions_are_rejected() {
    let graph = TestGraph::default();
    let call = |first: i32, last: i32, filter: &str, before: ArgValue, after: ArgValue| {
        graph
            .env
            .invoke(
                "Animate",
                &[
                    source().into(),
                    ArgValue::Int(first),
                    ArgValue::Int(last),
                    ArgValue::from(filter),
                    before,
                    after,
                ],
            )
            .err()
            .map(|e| e.to_string())
    };

    assert_eq!(
        call(10, 0, "Tag", 0.into(), 1.into()).as_deref(),
        Some("Animate: final frame number must be greater than initial.")
    );
    assert_eq!(
        call(4, 4, "Tag", 0.into(), 1.into()).as_deref(),
        Some("Animate: final frame cannot be the same as initial frame.")
    );
    assert_eq!(
        call(0, 10, "Tag", 0.into(), "x".into()).as_deref(),
        Some("Animate: must have two argument lists with matching types")
    );
    assert_eq!(
        call(0, 10, "Widen", 0.into(), 4.into()).as_deref(),
        Some("Animate: initial and final video frame sizes must match")
    );
    assert!(matches!(
        graph.env.invoke(
            "Animate",
            &[ArgValue::Int(0), ArgValue::Int(10), ArgValue::from("NoSuchFilter")],
        ),
        Err(GraphError::UnknownFunction(_))
    ));
}

#[test]
fn concurrent_requests_see_consistent_frames() {
    let graph = TestGraph::default();
    let animated = fade(&graph, "Tag", 3);

    std::thread::scope(|scope| {
        for offset in 0..4 {
            let animated = &animated;
            let env = &graph.env;
            scope.spawn(move || {
                for round in 0..25 {
                    let n = (round * 3 + offset) % 11;
                    assert_eq!(frame_tag(animated, n, env), ((n * 10) as u8, n as u8));
                }
            });
        }
    });

    let stages: Vec<i64> = animated.cached_stages().into_iter().flatten().collect();
    let mut unique = stages.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(stages.len(), unique.len());
}
