//! SVG snapshot of a scene
//!
//! Draws nodes as rounded boxes, edges as their routed paths and each edge
//! label as a small "×" button centred on its current transform.

use tracing::{debug, span, Level};

use super::{NodeKind, Scene};
use crate::core::Point;

/// Radius of the delete button drawn for each label
pub const LABEL_RADIUS: f64 = 10.0;

/// Renders a [`Scene`] to an SVG string
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    padding: f64,
    stroke: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            padding: 20.0,
            stroke: "#000".to_string(),
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Bounding box of everything drawn: (min, max)
    fn bounds(&self, scene: &Scene) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let mut include = |p: Point| {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        };
        for node in scene.nodes() {
            include(node.position);
            include(node.position.offset(node.size.width, node.size.height));
        }
        for edge in scene.edges() {
            if let Some(path) = edge.path() {
                path.points().iter().copied().for_each(&mut include);
            }
            if let Some(label) = edge.label_position() {
                include(label.offset(-LABEL_RADIUS, -LABEL_RADIUS));
                include(label.offset(LABEL_RADIUS, LABEL_RADIUS));
            }
        }
        if !min.x.is_finite() {
            return (Point::default(), Point::default());
        }
        (min, max)
    }

    pub fn render(&self, scene: &Scene) -> String {
        let render_span = span!(Level::DEBUG, "render_svg", nodes = scene.nodes().len());
        let _enter = render_span.enter();

        let (min, max) = self.bounds(scene);
        let x = min.x - self.padding;
        let y = min.y - self.padding;
        let width = (max.x - min.x) + self.padding * 2.0;
        let height = (max.y - min.y) + self.padding * 2.0;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{x:.2} {y:.2} {width:.2} {height:.2}\">\n"
        ));

        for edge in scene.edges() {
            if let Some(path) = edge.path() {
                svg.push_str(&format!(
                    "  <path id=\"{}\" d=\"{}\" stroke=\"{}\" fill=\"transparent\"/>\n",
                    escape_xml(&edge.id),
                    path.to_svg_path(),
                    escape_xml(&self.stroke)
                ));
            }
        }

        for node in scene.nodes() {
            let class = match node.kind {
                NodeKind::Input => "node input",
                NodeKind::Default => "node",
                NodeKind::Output => "node output",
            };
            let Point { x, y } = node.position;
            svg.push_str(&format!(
                "  <g class=\"{class}\" id=\"{}\">\n    <rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"3\" fill=\"#fff\" stroke=\"{}\"/>\n",
                escape_xml(&node.id),
                node.size.width,
                node.size.height,
                escape_xml(&self.stroke)
            ));
            svg.push_str(&format!(
                "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-size=\"12\">{}</text>\n  </g>\n",
                x + node.size.width / 2.0,
                y + node.size.height / 2.0,
                escape_xml(&node.label)
            ));
        }

        for edge in scene.edges() {
            let Some(label) = edge.label_position() else {
                continue;
            };
            svg.push_str(&format!(
                "  <g class=\"edge-label\" data-edge=\"{}\" data-index=\"{}\" transform=\"translate({:.2} {:.2})\">\n",
                escape_xml(&edge.id),
                edge.controller().index(),
                label.x,
                label.y
            ));
            svg.push_str(&format!(
                "    <circle r=\"{LABEL_RADIUS}\" fill=\"#eee\" stroke=\"#fff\"/>\n    <text text-anchor=\"middle\" dominant-baseline=\"central\" font-size=\"12\">×</text>\n  </g>\n"
            ));
        }

        svg.push_str("</svg>\n");
        debug!(bytes = svg.len(), "Rendered scene");
        svg
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LabelConfig;
    use crate::scene::SceneNode;

    #[test]
    fn test_render_demo() {
        let scene = Scene::demo(LabelConfig::default());
        let svg = SvgRenderer::new().render(&scene);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Button Edge 1"));
        assert!(svg.contains("id=\"edge-button\""));
        assert!(svg.contains("data-index=\"50\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_empty_scene() {
        let scene = Scene::new(LabelConfig::default());
        let svg = SvgRenderer::new().with_padding(0.0).render(&scene);
        assert!(svg.contains("viewBox=\"0.00 0.00 0.00 0.00\""));
    }

    #[test]
    fn test_labels_are_escaped() {
        let mut scene = Scene::new(LabelConfig::default());
        scene
            .add_node(SceneNode::new("a", "<A & B>", Point::new(0.0, 0.0)))
            .unwrap();
        let svg = scene.to_svg();
        assert!(svg.contains("&lt;A &amp; B&gt;"));
    }
}
