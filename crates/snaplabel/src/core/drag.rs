//! Drag sessions
//!
//! A [`DragSession`] is the interactive state bound to one [`SampleSet`]. It
//! converts pointer movement into snapped label positions and reports how a
//! press ended. Sessions are rebuilt wholesale whenever the path is resampled;
//! a killed session ignores every later event.

use tracing::trace;

use super::{Point, SampleSet};

/// How a press on the label ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// Released without moving past the drag threshold
    Clicked,
    /// Released after a drag; `at` is the last snapped position
    Dropped { at: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Pressed { pointer: Point, grab: (f64, f64) },
    Dragging { grab: (f64, f64), at: Point },
}

/// Interactive drag state for a label, constrained to a sample set
#[derive(Debug, Clone)]
pub struct DragSession {
    generation: u64,
    samples: Option<SampleSet>,
    threshold: f64,
    state: DragState,
}

impl DragSession {
    pub fn new(generation: u64, samples: SampleSet, threshold: f64) -> Self {
        Self {
            generation,
            samples: Some(samples),
            threshold,
            state: DragState::Idle,
        }
    }

    /// Rebuild counter value this session was created at
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once the session has been killed
    pub fn is_live(&self) -> bool {
        self.samples.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Sample set the session snaps to
    pub fn samples(&self) -> Option<&SampleSet> {
        self.samples.as_ref()
    }

    /// Candidate closest to `point`
    pub fn snap(&self, point: Point) -> Option<Point> {
        self.samples.as_ref()?.snap(point)
    }

    /// Start a press at `pointer` while the label rests at `label`
    pub fn press(&mut self, pointer: Point, label: Point) {
        if !self.is_live() {
            return;
        }
        let grab = (label.x - pointer.x, label.y - pointer.y);
        trace!(generation = self.generation, %pointer, "Drag press");
        self.state = DragState::Pressed { pointer, grab };
    }

    /// Move the pointer; returns the snapped label position once dragging
    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        if !self.is_live() {
            return None;
        }
        let grab = match self.state {
            DragState::Idle => return None,
            DragState::Pressed { pointer: origin, grab } => {
                if origin.distance(pointer) <= self.threshold {
                    return None;
                }
                grab
            }
            DragState::Dragging { grab, .. } => grab,
        };
        let at = self.snap(pointer.offset(grab.0, grab.1))?;
        trace!(generation = self.generation, %pointer, %at, "Drag move");
        self.state = DragState::Dragging { grab, at };
        Some(at)
    }

    /// Finish the press; `None` if no press was in progress
    pub fn release(&mut self) -> Option<DragOutcome> {
        let outcome = match self.state {
            DragState::Idle => None,
            DragState::Pressed { .. } => Some(DragOutcome::Clicked),
            DragState::Dragging { at, .. } => Some(DragOutcome::Dropped { at }),
        };
        self.state = DragState::Idle;
        outcome
    }

    /// Release the session's resources; later events are ignored
    pub fn kill(&mut self) {
        trace!(generation = self.generation, "Drag session killed");
        self.samples = None;
        self.state = DragState::Idle;
    }
}
