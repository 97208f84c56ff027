//! The gesture session state machine.
//!
//! A session spans one down-to-up cycle. While a session is active the
//! detector consumes one [`EventFrame`] per call, accumulates pan and zoom
//! until the motion passes the touch slop, and from then on emits one
//! gesture callback per moving frame. Two heuristics keep the output
//! semantically stable:
//!
//! * motion below the slop threshold is jitter and never reported;
//! * with [`GestureConfig::suppress_first_zoom`] enabled, the first two
//!   zoom-bearing samples of a session are dropped. Placing two fingers is
//!   rarely simultaneous, and the frames right after the second finger
//!   lands tend to report a large spread change unrelated to user intent.
//!   The budget counts zoom-bearing samples, not frames, so legitimate
//!   early pan motion passes through untouched.
//!
//! When the last finger lifts, the session reports a settling velocity
//! estimated by the [`VelocityTracker`].

use cgmath::{InnerSpace, Vector2, Zero};

use crate::{error::ConfigError, pointer::EventFrame, velocity::VelocityTracker};

/// Default touch slop in logical pixels, the Android `ViewConfiguration`
/// convention. Platforms with their own slop constant should supply it via
/// [`GestureConfig::touch_slop`].
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

/// How many zoom-bearing samples to drop at session start when
/// [`GestureConfig::suppress_first_zoom`] is on. Two absorbs the usual
/// settling of a sequentially placed second finger.
const ZOOM_SAMPLES_TO_IGNORE: u32 = 2;

/// Tuning for the gesture detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Minimum accumulated motion, in the same distance unit as the contact
    /// positions, before a gesture is considered deliberate.
    pub touch_slop: f64,
    /// Drop the first two zoom-bearing samples of each session.
    pub suppress_first_zoom: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            touch_slop: DEFAULT_TOUCH_SLOP,
            suppress_first_zoom: false,
        }
    }
}

/// Accumulators for one down-to-up cycle.
struct SessionState {
    zoom_accumulator: f64,
    pan_accumulator: Vector2<f64>,
    past_slop: bool,
    zooms_to_ignore: u32,
}

impl SessionState {
    fn new(suppress_first_zoom: bool) -> Self {
        Self {
            zoom_accumulator: 1.0,
            pan_accumulator: Vector2::zero(),
            past_slop: false,
            zooms_to_ignore: if suppress_first_zoom {
                ZOOM_SAMPLES_TO_IGNORE
            } else {
                0
            },
        }
    }
}

/// Push-driven pan/zoom gesture recognizer.
///
/// The input source calls [`push_frame`](Self::push_frame) with each event
/// frame, in order; the detector invokes the callbacks synchronously from
/// inside that call. `on_gesture(is_multitouch, pan_delta, zoom_factor)`
/// fires once per moving frame past the slop threshold;
/// `on_gesture_end(pan_velocity)` fires at most once per session, only on a
/// natural end. A frame containing a contact consumed by another handler
/// cancels the session silently.
///
/// Single-finger gestures report `is_multitouch == false`; callers that
/// only want pinch gestures filter on it.
pub struct TransformGestureDetector<G, E> {
    config: GestureConfig,
    on_gesture: G,
    on_gesture_end: E,
    velocity_tracker: VelocityTracker,
    session: Option<SessionState>,
}

impl<G, E> TransformGestureDetector<G, E>
where
    G: FnMut(bool, Vector2<f64>, f64),
    E: FnMut(Vector2<f64>),
{
    pub fn new(config: GestureConfig, on_gesture: G, on_gesture_end: E) -> Result<Self, ConfigError> {
        if !config.touch_slop.is_finite() || config.touch_slop <= 0.0 {
            return Err(ConfigError::InvalidTouchSlop(config.touch_slop));
        }
        Ok(Self {
            config,
            on_gesture,
            on_gesture_end,
            velocity_tracker: VelocityTracker::new(),
            session: None,
        })
    }

    /// Whether a session is currently between first contact and release.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Processes one event frame. Contacts that moved are flagged as
    /// consumed once the session is past the slop threshold, so the caller
    /// can hand the same frame to other consumers afterwards.
    pub fn push_frame(&mut self, frame: &mut EventFrame) {
        let Some(session) = self.session.as_mut() else {
            // Awaiting first contact: a contact going down this frame
            // starts a session. Contacts already consumed elsewhere still
            // qualify; cancellation applies from the next frame on.
            let fresh_down = frame
                .contacts()
                .iter()
                .any(|contact| contact.is_pressed() && !contact.was_pressed());
            if fresh_down {
                self.session = Some(SessionState::new(self.config.suppress_first_zoom));
                self.velocity_tracker.reset_tracking();
                log::trace!("gesture session started with {} contact(s)", frame.contact_count());
            }
            return;
        };

        let canceled = frame.any_consumed();
        if !canceled {
            let zoom_change = frame.calculate_zoom();
            let pan_change = frame.calculate_pan();

            if let Some(uptime_ms) = frame.uptime_ms() {
                self.velocity_tracker.add_position(uptime_ms, pan_change);
            }

            if !session.past_slop {
                session.zoom_accumulator *= zoom_change;
                session.pan_accumulator += pan_change;

                let centroid_size = frame.calculate_centroid_size(false);
                let zoom_motion = (1.0 - session.zoom_accumulator).abs() * centroid_size;
                let pan_motion = session.pan_accumulator.magnitude();

                if zoom_motion > self.config.touch_slop || pan_motion > self.config.touch_slop {
                    session.past_slop = true;
                    log::trace!(
                        "past touch slop (zoom motion {zoom_motion:.2}, pan motion {pan_motion:.2})"
                    );
                }
            }

            if session.past_slop {
                // Exact comparison against 1.0 is deliberate: a frame with
                // no spread change computes exactly 1.0.
                if zoom_change != 1.0 || !pan_change.is_zero() {
                    if zoom_change == 1.0 || session.zooms_to_ignore == 0 {
                        (self.on_gesture)(frame.contact_count() > 1, pan_change, zoom_change);
                    } else {
                        session.zooms_to_ignore -= 1;
                        log::trace!(
                            "suppressed zoom sample {zoom_change:.3}, {} left to ignore",
                            session.zooms_to_ignore
                        );
                    }
                }
                for contact in frame.contacts_mut() {
                    if contact.position_changed() {
                        contact.consume();
                    }
                }
            }
        }

        let any_pressed = frame.any_pressed();
        if !canceled && !any_pressed {
            (self.on_gesture_end)(self.velocity_tracker.calculate_velocity());
        }
        if canceled || !any_pressed {
            log::trace!(
                "gesture session {}",
                if canceled { "canceled" } else { "ended" }
            );
            self.session = None;
        }
    }
}

/// Runs gesture detection over a frame stream, one frame fully processed
/// before the next. Sessions restart on every fresh first contact; the
/// stream ending is the caller's way of cancelling the whole detector.
pub fn detect_transform_gestures<I, G, E>(
    frames: I,
    config: GestureConfig,
    on_gesture: G,
    on_gesture_end: E,
) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = EventFrame>,
    G: FnMut(bool, Vector2<f64>, f64),
    E: FnMut(Vector2<f64>),
{
    let mut detector = TransformGestureDetector::new(config, on_gesture, on_gesture_end)?;
    for mut frame in frames {
        detector.push_frame(&mut frame);
    }
    Ok(())
}
