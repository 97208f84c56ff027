//! End-to-end run of the frame-stream driver: a pinch session followed by a
//! pan session in one stream, consumed the way a windowing layer would feed
//! the detector.

use cgmath::{Point2, Vector2};
use transform_gestures::{
    detect_transform_gestures, EventFrame, GestureConfig, PointerContact, PointerId,
};

fn moved(id: u64, from: (f64, f64), to: (f64, f64), t: u64) -> PointerContact {
    PointerContact::moved(
        PointerId(id),
        Point2::new(to.0, to.1),
        Point2::new(from.0, from.1),
        t,
    )
}

/// Both fingers of a pinch moving apart symmetrically, spread scaling by
/// `ratio` around a fixed centroid.
fn pinch(from_spread: f64, ratio: f64, t: u64) -> EventFrame {
    let half_from = from_spread / 2.0;
    let half_to = half_from * ratio;
    EventFrame::new(vec![
        moved(1, (-half_from, 0.0), (-half_to, 0.0), t),
        moved(2, (half_from, 0.0), (half_to, 0.0), t),
    ])
}

#[test]
fn pinch_then_pan_stream() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut frames = Vec::new();

    // Session 1: two fingers land together, spread 100 px, zoom out to
    // double the spread over three frames, lift.
    frames.push(EventFrame::new(vec![
        PointerContact::down(PointerId(1), Point2::new(-50.0, 0.0), 0),
        PointerContact::down(PointerId(2), Point2::new(50.0, 0.0), 0),
    ]));
    let mut spread = 100.0;
    for i in 1..=3u64 {
        frames.push(pinch(spread, 1.26, i * 16));
        spread *= 1.26;
    }
    let half = spread / 2.0;
    frames.push(EventFrame::new(vec![
        PointerContact::released(PointerId(1), Point2::new(-half, 0.0), Point2::new(-half, 0.0), 64),
        PointerContact::released(PointerId(2), Point2::new(half, 0.0), Point2::new(half, 0.0), 64),
    ]));

    // Session 2: one finger drags right at a steady 20 px per frame.
    frames.push(EventFrame::new(vec![PointerContact::down(
        PointerId(3),
        Point2::new(0.0, 0.0),
        200,
    )]));
    for i in 1..=4u64 {
        let from = ((i - 1) as f64 * 20.0, 0.0);
        let to = (i as f64 * 20.0, 0.0);
        frames.push(EventFrame::new(vec![moved(3, from, to, 200 + i * 16)]));
    }
    frames.push(EventFrame::new(vec![PointerContact::released(
        PointerId(3),
        Point2::new(80.0, 0.0),
        Point2::new(80.0, 0.0),
        280,
    )]));

    let mut scale = 1.0;
    let mut pan = Vector2::new(0.0, 0.0);
    let mut multitouch_updates = 0;
    let mut singletouch_updates = 0;
    let mut end_velocities = Vec::new();

    detect_transform_gestures(
        frames,
        GestureConfig::default(),
        |is_multitouch, pan_delta, zoom| {
            if is_multitouch {
                multitouch_updates += 1;
            } else {
                singletouch_updates += 1;
            }
            scale *= zoom;
            pan += pan_delta;
        },
        |velocity| end_velocities.push(velocity),
    )
    .unwrap();

    // Session 1 emitted every zoom frame (suppression off) and scaled by
    // 1.26^3 in total; session 2 emitted every drag frame.
    assert_eq!(multitouch_updates, 3);
    assert_eq!(singletouch_updates, 4);
    assert!(
        (scale - 1.26f64.powi(3)).abs() < 1e-9,
        "accumulated scale was {scale}"
    );
    assert!((pan.x - 80.0).abs() < 1e-9, "accumulated pan was {}", pan.x);

    // One natural end per session; the drag settles at 20 px / 16 ms.
    assert_eq!(end_velocities.len(), 2);
    assert!(
        (end_velocities[1].x - 1250.0).abs() < 100.0,
        "settling velocity was {}",
        end_velocities[1].x
    );
}

#[test]
fn consumed_stream_produces_no_callbacks() {
    // A sibling handler consumed the whole sequence before this detector
    // saw it move.
    let mut start = EventFrame::new(vec![PointerContact::down(
        PointerId(1),
        Point2::new(0.0, 0.0),
        0,
    )]);
    start.contacts_mut()[0].consume();
    let mut movement = EventFrame::new(vec![moved(1, (0.0, 0.0), (40.0, 0.0), 16)]);
    movement.contacts_mut()[0].consume();

    let mut gesture_calls = 0;
    let mut end_calls = 0;
    detect_transform_gestures(
        vec![start, movement],
        GestureConfig::default(),
        |_, _, _| gesture_calls += 1,
        |_| end_calls += 1,
    )
    .unwrap();

    assert_eq!(gesture_calls, 0);
    assert_eq!(end_calls, 0);
}
