//! Example host scene
//!
//! A minimal diagram host that owns nodes and edges, routes each edge as a
//! step path and gives every edge its own [`LabelController`]. It plays the
//! role of the rendering layer: when a node moves it re-routes the attached
//! edges and hands the fresh geometry to their controllers, and deleting an
//! edge (the label's "×" button) unmounts its controller.

mod renderer;

pub use renderer::*;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, span, Level};

use crate::core::{
    step_path, Dimensions, EdgeGeometry, HandlePosition, LabelConfig, LabelController,
    LabelElement, LabelError, Point, Polyline, PositionableElement, STEP_OFFSET,
};

/// Default node width
pub const NODE_WIDTH: f64 = 150.0;

/// Default node height
pub const NODE_HEIGHT: f64 = 40.0;

/// Grid pitch used when snapping node positions
pub const GRID_SIZE: f64 = 15.0;

/// Visual role of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Only has an outgoing handle
    Input,
    #[default]
    Default,
    /// Only has an incoming handle
    Output,
}

/// A node box positioned by its top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: NodeKind,
    pub position: Point,
    #[serde(default = "default_node_size")]
    pub size: Dimensions,
}

fn default_node_size() -> Dimensions {
    Dimensions::new(NODE_WIDTH, NODE_HEIGHT)
}

impl SceneNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: NodeKind::Default,
            position,
            size: default_node_size(),
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_size(mut self, size: Dimensions) -> Self {
        self.size = size;
        self
    }

    /// Centre of the given side
    pub fn handle(&self, side: HandlePosition) -> Point {
        let Point { x, y } = self.position;
        let Dimensions { width, height } = self.size;
        match side {
            HandlePosition::Top => Point::new(x + width / 2.0, y),
            HandlePosition::Right => Point::new(x + width, y + height / 2.0),
            HandlePosition::Bottom => Point::new(x + width / 2.0, y + height),
            HandlePosition::Left => Point::new(x, y + height / 2.0),
        }
    }
}

/// An edge and the controller that owns its label
#[derive(Debug)]
pub struct SceneEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: HandlePosition,
    pub target_handle: HandlePosition,
    controller: LabelController<Polyline, LabelElement>,
}

impl SceneEdge {
    pub fn controller(&self) -> &LabelController<Polyline, LabelElement> {
        &self.controller
    }

    /// Current centre of the label element
    pub fn label_position(&self) -> Option<Point> {
        self.controller.label().map(|l| l.transform())
    }

    pub fn path(&self) -> Option<&Polyline> {
        self.controller.path()
    }
}

/// Snap a coordinate to the nearest grid line
pub fn snap_to_grid(point: Point, grid: f64) -> Point {
    if grid <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid).round() * grid,
        (point.y / grid).round() * grid,
    )
}

/// Nodes, edges and their label controllers
#[derive(Debug)]
pub struct Scene {
    config: LabelConfig,
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
    snap_to_grid: bool,
}

impl Scene {
    /// Empty scene with grid snapping enabled
    pub fn new(config: LabelConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            snap_to_grid: true,
        }
    }

    /// Two nodes joined by one labelled edge
    pub fn demo(config: LabelConfig) -> Self {
        let mut scene = Self::new(config);
        let nodes = [
            SceneNode::new("button-1", "Button Edge 1", Point::new(125.0, 0.0))
                .with_kind(NodeKind::Input),
            SceneNode::new("button-2", "Button Edge 2", Point::new(25.0, 400.0)),
        ];
        for node in nodes {
            scene.nodes.push(node);
        }
        if let Err(e) = scene.add_edge("edge-button", "button-1", "button-2", Duration::ZERO) {
            // Both nodes were inserted above
            error!(error = %e, "Demo edge not created");
        }
        scene
    }

    pub fn with_snap_to_grid(mut self, enabled: bool) -> Self {
        self.snap_to_grid = enabled;
        self
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&SceneEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    fn edge_mut(&mut self, id: &str) -> Result<&mut SceneEdge, LabelError> {
        self.edges
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| LabelError::unknown_edge(id))
    }

    pub fn add_node(&mut self, node: SceneNode) -> Result<(), LabelError> {
        if self.node(&node.id).is_some() {
            return Err(LabelError::duplicate("node", node.id));
        }
        debug!(id = %node.id, "Added node");
        self.nodes.push(node);
        Ok(())
    }

    /// Connect two nodes bottom-to-top with the scene's label config
    pub fn add_edge(
        &mut self,
        id: &str,
        source: &str,
        target: &str,
        now: Duration,
    ) -> Result<(), LabelError> {
        let config = self.config.clone();
        self.connect(
            id,
            (source, HandlePosition::Bottom),
            (target, HandlePosition::Top),
            config,
            now,
        )
    }

    /// Connect two nodes through explicit handles with a per-edge config
    pub fn connect(
        &mut self,
        id: &str,
        (source, source_handle): (&str, HandlePosition),
        (target, target_handle): (&str, HandlePosition),
        config: LabelConfig,
        now: Duration,
    ) -> Result<(), LabelError> {
        if self.edge(id).is_some() {
            return Err(LabelError::duplicate("edge", id));
        }
        let (geometry, path) = self.route(source, source_handle, target, target_handle)?;

        let mut controller = LabelController::new(config);
        controller.mount(LabelElement::new(), path, geometry, now);
        info!(id, source, target, "Connected edge");

        self.edges.push(SceneEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            source_handle,
            target_handle,
            controller,
        });
        Ok(())
    }

    fn route(
        &self,
        source: &str,
        source_handle: HandlePosition,
        target: &str,
        target_handle: HandlePosition,
    ) -> Result<(EdgeGeometry, Polyline), LabelError> {
        let from = self
            .node(source)
            .ok_or_else(|| LabelError::unknown_node(source))?;
        let to = self
            .node(target)
            .ok_or_else(|| LabelError::unknown_node(target))?;
        let source_point = from.handle(source_handle);
        let target_point = to.handle(target_handle);
        let routed = step_path(
            source_point,
            source_handle,
            target_point,
            target_handle,
            STEP_OFFSET,
        );
        let geometry =
            EdgeGeometry::new(source_point, target_point).with_sizes(from.size, to.size);
        Ok((geometry, routed.path))
    }

    /// Move a node (snapping to the grid when enabled) and re-render its edges
    ///
    /// Returns the position the node ended up at.
    pub fn move_node(
        &mut self,
        id: &str,
        position: Point,
        now: Duration,
    ) -> Result<Point, LabelError> {
        let move_span = span!(Level::DEBUG, "move_node", id);
        let _enter = move_span.enter();

        let position = if self.snap_to_grid {
            snap_to_grid(position, GRID_SIZE)
        } else {
            position
        };
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| LabelError::unknown_node(id))?;
        node.position = position;

        let mut routes = Vec::new();
        for (i, edge) in self.edges.iter().enumerate() {
            if edge.source == id || edge.target == id {
                let route = self.route(
                    &edge.source,
                    edge.source_handle,
                    &edge.target,
                    edge.target_handle,
                )?;
                routes.push((i, route));
            }
        }
        for (i, (geometry, path)) in routes {
            self.edges[i].controller.update_geometry(geometry, path, now);
        }
        Ok(position)
    }

    /// Delete an edge, tearing down its label controller
    pub fn remove_edge(&mut self, id: &str) -> Result<(), LabelError> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LabelError::unknown_edge(id))?;
        let mut edge = self.edges.remove(pos);
        edge.controller.unmount();
        info!(id, "Removed edge");
        Ok(())
    }

    /// Advance the clock for every edge; returns how many drag sessions were rebuilt
    pub fn tick(&mut self, now: Duration) -> usize {
        self.edges
            .iter_mut()
            .map(|e| e.controller.tick(now))
            .filter(|rebuilt| *rebuilt)
            .count()
    }

    pub fn press_label(&mut self, edge: &str, pointer: Point) -> Result<(), LabelError> {
        self.edge_mut(edge)?.controller.press(pointer);
        Ok(())
    }

    pub fn drag_label(&mut self, edge: &str, pointer: Point) -> Result<Option<Point>, LabelError> {
        Ok(self.edge_mut(edge)?.controller.drag(pointer))
    }

    pub fn release_label(&mut self, edge: &str) -> Result<Option<usize>, LabelError> {
        Ok(self.edge_mut(edge)?.controller.release())
    }

    pub fn label_position(&self, edge: &str) -> Result<Point, LabelError> {
        self.edge(edge)
            .and_then(|e| e.label_position())
            .ok_or_else(|| LabelError::unknown_edge(edge))
    }

    pub fn label_index(&self, edge: &str) -> Result<usize, LabelError> {
        self.edge(edge)
            .map(|e| e.controller.index())
            .ok_or_else(|| LabelError::unknown_edge(edge))
    }

    /// Render the scene as an SVG document
    pub fn to_svg(&self) -> String {
        SvgRenderer::new().render(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PathGeometry;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_demo_scene() {
        let scene = Scene::demo(LabelConfig::default());
        assert_eq!(scene.nodes().len(), 2);
        assert_eq!(scene.edges().len(), 1);
        let edge = scene.edge("edge-button").unwrap();
        assert_eq!(edge.controller().index(), 50);
        assert!(edge.controller().has_pending_rebuild());
    }

    #[test]
    fn test_node_handles() {
        let node = SceneNode::new("a", "A", Point::new(0.0, 0.0));
        assert_eq!(node.handle(HandlePosition::Top), Point::new(75.0, 0.0));
        assert_eq!(node.handle(HandlePosition::Bottom), Point::new(75.0, 40.0));
        assert_eq!(node.handle(HandlePosition::Left), Point::new(0.0, 20.0));
        assert_eq!(node.handle(HandlePosition::Right), Point::new(150.0, 20.0));
    }

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(22.0, 38.0), 15.0), Point::new(15.0, 45.0));
        assert_eq!(snap_to_grid(Point::new(22.0, 38.0), 0.0), Point::new(22.0, 38.0));
    }

    #[test]
    fn test_move_node_reroutes_edge() {
        let mut scene = Scene::demo(LabelConfig::default());
        let before = scene.label_position("edge-button").unwrap();
        let landed = scene.move_node("button-2", Point::new(301.0, 400.0), ms(100)).unwrap();
        assert_eq!(landed, Point::new(300.0, 405.0));
        let after = scene.label_position("edge-button").unwrap();
        assert_ne!(before, after);
        let edge = scene.edge("edge-button").unwrap();
        let path = edge.path().unwrap();
        assert_eq!(path.points().last(), Some(&Point::new(375.0, 405.0)));
        assert!(path.total_length() > 0.0);
    }

    #[test]
    fn test_unknown_ids() {
        let mut scene = Scene::demo(LabelConfig::default());
        assert!(matches!(
            scene.move_node("nope", Point::new(0.0, 0.0), ms(0)),
            Err(LabelError::UnknownNode { .. })
        ));
        assert!(matches!(
            scene.remove_edge("nope"),
            Err(LabelError::UnknownEdge { .. })
        ));
        assert!(matches!(
            scene.add_edge("e2", "button-1", "ghost", ms(0)),
            Err(LabelError::UnknownNode { .. })
        ));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut scene = Scene::demo(LabelConfig::default());
        assert!(scene
            .add_node(SceneNode::new("button-1", "again", Point::new(0.0, 0.0)))
            .is_err());
        assert!(scene
            .add_edge("edge-button", "button-1", "button-2", ms(0))
            .is_err());
    }

    #[test]
    fn test_remove_edge() {
        let mut scene = Scene::demo(LabelConfig::default());
        scene.remove_edge("edge-button").unwrap();
        assert!(scene.edges().is_empty());
        assert_eq!(scene.tick(ms(10_000)), 0);
    }

    #[test]
    fn test_tick_counts_rebuilds() {
        let mut scene = Scene::demo(LabelConfig::default());
        assert_eq!(scene.tick(ms(100)), 0);
        assert_eq!(scene.tick(ms(500)), 1);
        assert_eq!(scene.tick(ms(1000)), 0);
    }
}
