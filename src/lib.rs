//! # transform-gestures
//!
//! Multi-touch pan/zoom gesture recognition over a stream of pointer event
//! frames. The crate turns raw, jittery multi-finger input into a stable
//! sequence of gesture callbacks: it waits until accumulated motion passes
//! the platform touch-slop threshold, optionally drops the spurious zoom
//! samples produced by sequentially placed fingers, emits one incremental
//! pan/zoom update per moving frame, and reports a settling velocity when
//! the last finger lifts.
//!
//! The crate does not capture input itself; a windowing layer feeds it
//! [`EventFrame`] values, either by pushing into a
//! [`TransformGestureDetector`] or through the blocking
//! [`detect_transform_gestures`] driver.
//!
//! ```
//! use cgmath::Point2;
//! use transform_gestures::{
//!     EventFrame, GestureConfig, PointerContact, PointerId, TransformGestureDetector,
//! };
//!
//! let mut scale = 1.0;
//! let mut detector = TransformGestureDetector::new(
//!     GestureConfig {
//!         suppress_first_zoom: true,
//!         ..GestureConfig::default()
//!     },
//!     |_is_multitouch, _pan, zoom| scale *= zoom,
//!     |_velocity| {},
//! )
//! .unwrap();
//!
//! let mut frame = EventFrame::new(vec![PointerContact::down(
//!     PointerId(0),
//!     Point2::new(10.0, 10.0),
//!     0,
//! )]);
//! detector.push_frame(&mut frame);
//! ```

#![deny(unused_imports)]

pub mod detector;
pub mod error;
pub mod pointer;
pub mod velocity;

pub use detector::{
    detect_transform_gestures, GestureConfig, TransformGestureDetector, DEFAULT_TOUCH_SLOP,
};
pub use error::ConfigError;
pub use pointer::{EventFrame, PointerContact, PointerId};
pub use velocity::VelocityTracker;
