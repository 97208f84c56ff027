//! Pointer contacts and event frames, the input side of gesture detection.
//!
//! The input source (a windowing layer, a test harness, ...) owns the
//! contacts and delivers them to the detector one [`EventFrame`] at a time.
//! The detector only reads them and, after the slop threshold is passed,
//! flags moved contacts as consumed so that other consumers of the same
//! pipeline can back off. Consumption is cooperative: the detector sets the
//! flag, it never clears it, and nothing enforces that other consumers
//! honor it.

use cgmath::{EuclideanSpace, InnerSpace, Point2, Vector2, Zero};

/// Identifies one finger across the frames of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u64);

/// One active touch point within a single event frame.
#[derive(Clone, Debug)]
pub struct PointerContact {
    id: PointerId,
    position: Point2<f64>,
    previous_position: Point2<f64>,
    pressed: bool,
    previously_pressed: bool,
    consumed: bool,
    uptime_ms: u64,
}

impl PointerContact {
    /// A contact that touched down this frame.
    pub fn down(id: PointerId, position: Point2<f64>, uptime_ms: u64) -> Self {
        Self {
            id,
            position,
            previous_position: position,
            pressed: true,
            previously_pressed: false,
            consumed: false,
            uptime_ms,
        }
    }

    /// A contact that was already down in the previous frame and is still down.
    pub fn moved(
        id: PointerId,
        position: Point2<f64>,
        previous_position: Point2<f64>,
        uptime_ms: u64,
    ) -> Self {
        Self {
            id,
            position,
            previous_position,
            pressed: true,
            previously_pressed: true,
            consumed: false,
            uptime_ms,
        }
    }

    /// A contact that lifted this frame.
    pub fn released(
        id: PointerId,
        position: Point2<f64>,
        previous_position: Point2<f64>,
        uptime_ms: u64,
    ) -> Self {
        Self {
            id,
            position,
            previous_position,
            pressed: false,
            previously_pressed: true,
            consumed: false,
            uptime_ms,
        }
    }

    pub fn id(&self) -> PointerId {
        self.id
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn previous_position(&self) -> Point2<f64> {
        self.previous_position
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn was_pressed(&self) -> bool {
        self.previously_pressed
    }

    pub fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Flags this contact as consumed. The flag is never cleared within a
    /// frame; a fresh frame from the input source starts unconsumed unless
    /// another consumer got to it first.
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Whether the position moved since the previous frame and the change
    /// has not been consumed.
    pub fn position_changed(&self) -> bool {
        !self.consumed && self.position != self.previous_position
    }

    fn position_at(&self, use_current: bool) -> Point2<f64> {
        if use_current {
            self.position
        } else {
            self.previous_position
        }
    }

    /// Down across both this frame and the previous one. Only these
    /// contacts take part in the frame geometry below; a finger that landed
    /// or lifted this frame has no meaningful displacement yet.
    fn active_across_frames(&self) -> bool {
        self.pressed && self.previously_pressed
    }
}

/// The set of all pointer contacts active at one instant, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct EventFrame {
    contacts: Vec<PointerContact>,
}

impl EventFrame {
    pub fn new(contacts: Vec<PointerContact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[PointerContact] {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut [PointerContact] {
        &mut self.contacts
    }

    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Frame timestamp: the first contact's uptime.
    pub fn uptime_ms(&self) -> Option<u64> {
        self.contacts.first().map(|contact| contact.uptime_ms)
    }

    pub fn any_pressed(&self) -> bool {
        self.contacts.iter().any(|contact| contact.pressed)
    }

    pub fn any_consumed(&self) -> bool {
        self.contacts.iter().any(|contact| contact.consumed)
    }

    /// Average position of the contacts down across both frames.
    pub fn calculate_centroid(&self, use_current: bool) -> Option<Point2<f64>> {
        let mut sum = Vector2::zero();
        let mut count = 0;
        for contact in &self.contacts {
            if contact.active_across_frames() {
                sum += contact.position_at(use_current).to_vec();
                count += 1;
            }
        }
        if count == 0 {
            None
        } else {
            Some(Point2::from_vec(sum / count as f64))
        }
    }

    /// Average distance of the contacts down across both frames from their
    /// centroid. 0.0 when fewer than two such contacts exist (a single
    /// contact sits exactly on its own centroid).
    pub fn calculate_centroid_size(&self, use_current: bool) -> f64 {
        let Some(centroid) = self.calculate_centroid(use_current) else {
            return 0.0;
        };
        let mut sum = 0.0;
        let mut count = 0;
        for contact in &self.contacts {
            if contact.active_across_frames() {
                sum += (contact.position_at(use_current) - centroid).magnitude();
                count += 1;
            }
        }
        sum / count as f64
    }

    /// Ratio of the current inter-contact spread to the previous one.
    /// Exactly 1.0 when either spread is zero, which covers frames with
    /// fewer than two contacts.
    pub fn calculate_zoom(&self) -> f64 {
        let current = self.calculate_centroid_size(true);
        let previous = self.calculate_centroid_size(false);
        if current == 0.0 || previous == 0.0 {
            1.0
        } else {
            current / previous
        }
    }

    /// Average displacement of the contacts down across both frames,
    /// computed as the centroid delta. Zero when no contact qualifies.
    pub fn calculate_pan(&self) -> Vector2<f64> {
        match (self.calculate_centroid(true), self.calculate_centroid(false)) {
            (Some(current), Some(previous)) => current - previous,
            _ => Vector2::zero(),
        }
    }
}
