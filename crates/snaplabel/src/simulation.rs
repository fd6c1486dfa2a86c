//! Scripted playback of label interactions
//!
//! A script is a JSON document describing what a user and the host did to the
//! demo scene over time: moving nodes, letting the clock run, dragging labels,
//! deleting edges. Replaying it yields one [`Frame`] per step so sessions can
//! be inspected and compared without a browser.
//!
//! ```json
//! {
//!   "config": { "initial_index": 50 },
//!   "steps": [
//!     { "advance": { "ms": 600 } },
//!     { "press": { "edge": "edge-button", "x": 150, "y": 220 } },
//!     { "drag": { "edge": "edge-button", "x": 100, "y": 220 } },
//!     { "release": { "edge": "edge-button" } }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, span, Level};

use crate::core::{LabelConfig, Point};
use crate::scene::{Scene, SceneNode};

/// One scripted event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Let the host clock run
    Advance { ms: u64 },
    /// Drag a node to a new top-left position
    MoveNode { id: String, x: f64, y: f64 },
    /// Add a node
    AddNode(SceneNode),
    /// Connect two nodes with a labelled edge
    Connect {
        id: String,
        source: String,
        target: String,
    },
    Press { edge: String, x: f64, y: f64 },
    Drag { edge: String, x: f64, y: f64 },
    Release { edge: String },
    /// Click the label's delete button
    DeleteEdge { edge: String },
}

/// A full script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: LabelConfig,
    #[serde(default = "default_snap")]
    pub snap_to_grid: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_snap() -> bool {
    true
}

impl Default for Script {
    fn default() -> Self {
        Self {
            config: LabelConfig::default(),
            snap_to_grid: default_snap(),
            steps: Vec::new(),
        }
    }
}

impl Script {
    pub fn from_json(input: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(input).context("Invalid simulation script")?;
        script.config.validate()?;
        Ok(script)
    }
}

/// Label state of one edge after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeFrame {
    pub edge: String,
    pub index: usize,
    pub position: Point,
    /// A drag session is live
    pub draggable: bool,
    /// A drag session rebuild is waiting for the debounce window
    pub pending_rebuild: bool,
    pub rebuilds: u64,
}

/// Scene state after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub step: usize,
    /// Host clock in milliseconds
    pub time_ms: u64,
    pub edges: Vec<EdgeFrame>,
}

fn capture(scene: &Scene, step: usize, now: Duration) -> Frame {
    let edges = scene
        .edges()
        .iter()
        .filter_map(|edge| {
            let controller = edge.controller();
            Some(EdgeFrame {
                edge: edge.id.clone(),
                index: controller.index(),
                position: edge.label_position()?,
                draggable: controller.session().is_some_and(|s| s.is_live()),
                pending_rebuild: controller.has_pending_rebuild(),
                rebuilds: controller.rebuild_count(),
            })
        })
        .collect();
    Frame {
        step,
        time_ms: now.as_millis() as u64,
        edges,
    }
}

/// Replay a script over the demo scene, returning the final scene and the
/// frame recorded after every step
pub fn replay(script: &Script) -> Result<(Scene, Vec<Frame>)> {
    let replay_span = span!(Level::INFO, "replay", steps = script.steps.len());
    let _enter = replay_span.enter();

    let mut scene = Scene::demo(script.config.clone()).with_snap_to_grid(script.snap_to_grid);
    let mut now = Duration::ZERO;
    let mut frames = Vec::with_capacity(script.steps.len() + 1);
    frames.push(capture(&scene, 0, now));

    for (i, step) in script.steps.iter().enumerate() {
        let number = i + 1;
        debug!(step = number, ?step, "Replaying step");
        match step {
            Step::Advance { ms } => {
                now += Duration::from_millis(*ms);
            }
            Step::MoveNode { id, x, y } => {
                scene
                    .move_node(id, Point::new(*x, *y), now)
                    .with_context(|| format!("step {}", number))?;
            }
            Step::AddNode(node) => {
                scene
                    .add_node(node.clone())
                    .with_context(|| format!("step {}", number))?;
            }
            Step::Connect { id, source, target } => {
                scene
                    .add_edge(id, source, target, now)
                    .with_context(|| format!("step {}", number))?;
            }
            Step::Press { edge, x, y } => {
                scene
                    .press_label(edge, Point::new(*x, *y))
                    .with_context(|| format!("step {}", number))?;
            }
            Step::Drag { edge, x, y } => {
                scene
                    .drag_label(edge, Point::new(*x, *y))
                    .with_context(|| format!("step {}", number))?;
            }
            Step::Release { edge } => {
                scene
                    .release_label(edge)
                    .with_context(|| format!("step {}", number))?;
            }
            Step::DeleteEdge { edge } => {
                scene
                    .remove_edge(edge)
                    .with_context(|| format!("step {}", number))?;
            }
        }
        // Deferred work is due on the same turn the clock reaches it
        scene.tick(now);
        frames.push(capture(&scene, number, now));
    }

    info!(frames = frames.len(), "Replay finished");
    Ok((scene, frames))
}

/// Replay a script and return only the frames
pub fn run(script: &Script) -> Result<Vec<Frame>> {
    replay(script).map(|(_, frames)| frames)
}
