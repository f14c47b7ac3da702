//! Timeline building and lookup through the public API

use subcue::captions::load_captions;
use subcue::player::{ManualClock, PollingDriver, Transition};
use subcue::timeline::{
    format_offset, sequencer, DisplayEvent, IndexLayout, Timeline, TimelineError,
};
use subcue::Caption;

use super::helpers::{fixture, XorShift};

/// Reference answer: the latest event whose offset is at or before `query`.
fn linear_floor(events: &[DisplayEvent], query: u64) -> &DisplayEvent {
    events
        .iter()
        .rev()
        .find(|event| event.offset_ms <= query)
        .unwrap_or(&events[0])
}

#[test]
fn scenario_fixture_builds_expected_events() {
    let captions = load_captions(&fixture("scenario.json")).unwrap();
    let timeline = Timeline::build(&captions).unwrap();

    let rendered: Vec<String> = timeline.events().iter().map(|e| e.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "#0 00:00:00,000 <silence>",
            "#1 00:00:01,000 Hello",
            "#2 00:00:04,001 <silence>",
            "#3 00:00:06,000 Bye",
            "#4 00:00:08,501 <silence>",
        ]
    );
}

#[test]
fn scenario_fixture_lookups() {
    let captions = load_captions(&fixture("scenario.json")).unwrap();
    let timeline = Timeline::build(&captions).unwrap();

    let cases = [
        (0, 0),
        (999, 0),
        (1_000, 1),
        (2_500, 1),
        (4_000, 1),
        (4_001, 2),
        (5_999, 2),
        (6_000, 3),
        (8_500, 3),
        (8_501, 4),
        (60_000, 4),
        (999_999_999, 4),
        (u64::MAX, 4),
    ];
    for (query, expected) in cases {
        let event = timeline.lookup(query).unwrap();
        assert_eq!(
            event.sequence,
            expected,
            "lookup at {} returned {}",
            format_offset(query),
            event
        );
    }
}

#[test]
fn touching_captions_are_rejected() {
    let result = Timeline::build(&[
        Caption::new(1_000, 2_000, "first"),
        Caption::new(2_001, 3_000, "second"),
    ]);

    assert!(matches!(
        result,
        Err(TimelineError::Structural { index: 1, .. })
    ));
}

#[test]
fn many_events_in_one_bucket_resolve_exactly() {
    let captions: Vec<Caption> = (0..40)
        .map(|i| Caption::new(10_000 + i * 20, 10_000 + i * 20 + 9, format!("c{i}")))
        .collect();
    let timeline = Timeline::build(&captions).unwrap();

    for query in 9_990..10_900 {
        assert_eq!(
            timeline.lookup(query).unwrap(),
            linear_floor(timeline.events(), query),
            "query {query}"
        );
    }
}

#[test]
fn random_timelines_match_linear_scan() {
    let mut rng = XorShift(0x5eed_cafe_f00d_0001);

    for layout in [
        IndexLayout::default(),
        IndexLayout::new(6, 2).unwrap(),
        IndexLayout::new(5, 0).unwrap(),
    ] {
        for _ in 0..20 {
            let max = layout.max_offset_ms();
            let mut captions = Vec::new();
            let mut cursor = rng.below(2_000);
            for i in 0..rng.below(60) + 1 {
                let start = cursor;
                let end = start + rng.below(3_000);
                if end + 2 >= max {
                    break;
                }
                captions.push(Caption::new(start, end, format!("line {i}")));
                cursor = end + 2 + rng.below(5_000);
            }

            let timeline = Timeline::build_with_layout(&captions, layout).unwrap();
            let events = timeline.events();
            let last = events.last().unwrap().offset_ms;
            for _ in 0..300 {
                let query = rng.below(last + 2_000).min(max);
                assert_eq!(
                    timeline.lookup(query).unwrap(),
                    linear_floor(events, query),
                    "layout {:?}, query {}",
                    layout,
                    query
                );
            }
        }
    }
}

#[test]
fn driver_follows_seeking_clock() {
    let captions = load_captions(&fixture("scenario.json")).unwrap();
    let timeline = Timeline::build(&captions).unwrap();
    let clock = ManualClock::new();
    let mut driver = PollingDriver::new(&timeline, &clock);

    assert_eq!(driver.poll().unwrap(), None);

    clock.set(1_500);
    let shown = driver.poll().unwrap().unwrap();
    assert_eq!(shown.sequence(), 1);
    assert!(matches!(shown, Transition::Caption { ref text, .. } if text == "Hello"));

    clock.set(3_000);
    assert_eq!(driver.poll().unwrap(), None);

    clock.set(7_000);
    assert_eq!(driver.poll().unwrap().map(|t| t.sequence()), Some(3));

    // Seek backwards into the gap
    clock.set(5_000);
    let blank = driver.poll().unwrap().unwrap();
    assert!(blank.is_blank());
    assert_eq!(blank.sequence(), 2);
}

#[test]
fn sequencer_and_timeline_agree() {
    let captions = load_captions(&fixture("short.json")).unwrap();
    let events = sequencer::sequence(&captions).unwrap();
    let timeline = Timeline::build(&captions).unwrap();

    assert_eq!(timeline.events(), events.as_slice());
    assert_eq!(timeline.lookup(6).unwrap().text(), "one\nmore line");
}
