//! Label position controller
//!
//! Keeps one label element pinned to its edge path. The label's logical
//! position is an index into the path's sample set, so "40% along the edge"
//! survives endpoints moving around.
//!
//! Two triggers run at different speeds:
//!
//! - every qualifying geometry change re-applies the transform for the stored
//!   index immediately (one point query), so the label never lags its edge;
//! - the drag session (full resampling plus a fresh snap set) is rebuilt only
//!   after the geometry has been quiet for the debounce window.
//!
//! Nothing here fails its host. Operations on an unmounted controller are
//! no-ops and a drop that misses every sample resolves to the nearest one.
//!
//! While the label is being dragged it belongs to the pointer: geometry
//! changes neither move it nor replace the drag session until release.

use std::time::Duration;

use tracing::{debug, error, info, span, trace, warn, Level};

use super::{
    point_at_index, sample_path, Debouncer, DragOutcome, DragSession, EdgeGeometry, LabelConfig,
    LabelTransform, PathGeometry, Point, PositionableElement, SampleSet,
};

/// Tracks and positions a draggable label along one edge
#[derive(Debug)]
pub struct LabelController<P, E>
where
    P: PathGeometry,
    E: PositionableElement,
{
    config: LabelConfig,
    index: usize,
    label: Option<E>,
    path: Option<P>,
    geometry: Option<EdgeGeometry>,
    samples: Option<SampleSet>,
    session: Option<DragSession>,
    debouncer: Debouncer,
    rebuilds: u64,
}

impl<P, E> LabelController<P, E>
where
    P: PathGeometry,
    E: PositionableElement,
{
    /// Create an unmounted controller
    ///
    /// An initial index outside `[0, sample_count)` is clamped.
    pub fn new(config: LabelConfig) -> Self {
        let index = config.clamped_initial_index();
        if index != config.initial_index {
            warn!(
                requested = config.initial_index,
                sample_count = config.sample_count,
                index,
                "Initial label index out of range, clamped"
            );
        }
        if config.sample_count == 0 {
            warn!("Label configured with zero samples; dragging is disabled");
        }
        Self {
            debouncer: Debouncer::new(config.debounce()),
            config,
            index,
            label: None,
            path: None,
            geometry: None,
            samples: None,
            session: None,
            rebuilds: 0,
        }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Current label index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Label position as a fraction of the edge length
    pub fn fraction(&self) -> f64 {
        if self.config.sample_count == 0 {
            0.0
        } else {
            self.index as f64 / self.config.sample_count as f64
        }
    }

    pub fn label(&self) -> Option<&E> {
        self.label.as_ref()
    }

    pub fn path(&self) -> Option<&P> {
        self.path.as_ref()
    }

    pub fn geometry(&self) -> Option<&EdgeGeometry> {
        self.geometry.as_ref()
    }

    /// Sample set the live drag session was built from
    pub fn samples(&self) -> Option<&SampleSet> {
        self.samples.as_ref()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Number of drag sessions built so far
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn has_pending_rebuild(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn is_mounted(&self) -> bool {
        self.label.is_some() && self.path.is_some()
    }

    /// True between a drag past the threshold and the release
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_dragging())
    }

    /// Attach the label element and path, then process the first geometry
    pub fn mount(&mut self, label: E, path: P, geometry: EdgeGeometry, now: Duration) {
        debug!(index = self.index, "Mounting edge label");
        self.label = Some(label);
        self.path = Some(path);
        self.apply_position();
        self.geometry = None;
        self.observe_geometry(geometry, now);
    }

    /// Accept the host's latest render of the edge
    ///
    /// The path is always replaced. Returns true if the endpoint geometry
    /// changed, in which case the label is repositioned and a drag session
    /// rebuild is scheduled.
    /// Ignored while unmounted.
    pub fn update_geometry(&mut self, geometry: EdgeGeometry, path: P, now: Duration) -> bool {
        if !self.is_mounted() {
            return false;
        }
        self.path = Some(path);
        if self.geometry == Some(geometry) {
            return false;
        }
        self.observe_geometry(geometry, now);
        true
    }

    fn observe_geometry(&mut self, geometry: EdgeGeometry, now: Duration) {
        trace!(?geometry, "Edge geometry changed");
        self.geometry = Some(geometry);
        if self.is_dragging() {
            trace!("Label is being dragged, position applied on release");
        } else {
            self.apply_position();
        }
        self.debouncer.schedule(now);
    }

    /// Point the stored index maps to on the current path
    pub fn position(&self) -> Option<Point> {
        let path = self.path.as_ref()?;
        Some(point_at_index(path, self.index, self.config.sample_count))
    }

    /// Write the transform for the stored index to the label element
    pub fn apply_position(&mut self) {
        let Some(point) = self.position() else {
            return;
        };
        let Some(label) = self.label.as_mut() else {
            return;
        };
        trace!(index = self.index, %point, "Applying label position");
        label.set_transform(LabelTransform::centered(point));
    }

    /// Advance the host clock; runs a due drag session rebuild
    ///
    /// A rebuild that comes due mid-drag stays pending until after release.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.is_dragging() {
            return false;
        }
        if self.debouncer.poll(now) {
            self.rebuild_drag_session()
        } else {
            false
        }
    }

    /// Resample the path and replace the drag session
    ///
    /// Returns false (and leaves any session alone) while unmounted.
    pub fn rebuild_drag_session(&mut self) -> bool {
        let Some(path) = self.path.as_ref() else {
            return false;
        };
        if self.label.is_none() {
            return false;
        }

        let rebuild_span = span!(Level::DEBUG, "rebuild_drag_session", generation = self.rebuilds + 1);
        let _enter = rebuild_span.enter();

        if let Some(mut old) = self.session.take() {
            old.kill();
        }
        let samples = sample_path(path, self.config.sample_count);
        self.rebuilds += 1;
        self.session = Some(DragSession::new(
            self.rebuilds,
            samples.clone(),
            self.config.drag_threshold,
        ));
        self.samples = Some(samples);
        debug!(
            sample_count = self.config.sample_count,
            "Drag session rebuilt"
        );
        true
    }

    /// Pointer pressed on the label
    ///
    /// The label is re-centred on its stored index first, so a press always
    /// starts from where the index says the label is.
    pub fn press(&mut self, pointer: Point) {
        self.apply_position();
        let Some(at) = self.label.as_ref().map(|l| l.transform()) else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.press(pointer, at);
        }
    }

    /// Pointer moved while pressed; moves the label to the snapped candidate
    pub fn drag(&mut self, pointer: Point) -> Option<Point> {
        let at = self.session.as_mut()?.drag_to(pointer)?;
        if let Some(label) = self.label.as_mut() {
            label.set_transform(LabelTransform::centered(at));
        }
        Some(at)
    }

    /// Pointer released; returns the label index if a drop changed it
    pub fn release(&mut self) -> Option<usize> {
        let outcome = self.session.as_mut()?.release()?;
        match outcome {
            DragOutcome::Clicked => {
                self.apply_position();
                None
            }
            DragOutcome::Dropped { .. } => {
                let resolved = self.resolve_drop();
                // The path may have moved under the drag; land on it
                self.apply_position();
                resolved
            }
        }
    }

    /// Resolve the resting coordinate against the sample set the drag
    /// session snapped to
    fn resolve_drop(&mut self) -> Option<usize> {
        let resting = self.label.as_ref()?.transform().round();
        let samples = self.session.as_ref()?.samples()?;
        match samples.try_resolve(resting) {
            Ok(index) => {
                if samples.position(resting).is_none() {
                    debug!(%resting, index, "Drop missed every sample, using nearest");
                }
                let previous = self.index;
                self.index = index;
                info!(index, previous, "Updated edge label position");
                Some(index)
            }
            Err(e) => {
                error!(error = %e, %resting, "Drop could not be resolved");
                self.index = self.index.min(self.config.sample_count.saturating_sub(1));
                None
            }
        }
    }

    /// Cancel any pending rebuild, release the drag session and hand back the
    /// label element and path
    pub fn unmount(&mut self) -> (Option<E>, Option<P>) {
        self.teardown();
        self.geometry = None;
        (self.label.take(), self.path.take())
    }

    fn teardown(&mut self) {
        if self.debouncer.cancel() {
            debug!("Cancelled pending drag session rebuild");
        }
        if let Some(mut session) = self.session.take() {
            session.kill();
        }
        self.samples = None;
    }
}

impl<P, E> Drop for LabelController<P, E>
where
    P: PathGeometry,
    E: PositionableElement,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
