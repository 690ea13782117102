//! Graph → SVG.
//!
//! ```text
//! PuzzleGraph ──▶ template::layout ──▶ Layout { template, slots, frame }
//!                     │ None: no template fits, nothing is drawn
//!                     ▼
//!   per slot: NodeStyle::from_node(rules) ──▶ svg::draw_node
//!                     ▼
//!                RebusImage ──▶ to_svg() / save(path)
//! ```
//!
//! Rendering is pure until `RebusImage::save`, the only place that touches
//! the filesystem.

#[path = "render/svg.rs"]
mod svg;
#[path = "render/template.rs"]
mod template;

use std::path::Path;

use crate::config::RenderConfig;
use crate::error::RebusResult;
use crate::graph::PuzzleGraph;

pub use template::{Frame, Layout, Placement, Template, layout, select_template};

/// A rendered puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct RebusImage {
    pub answer: String,
    pub template: Template,
    pub width: u32,
    pub height: u32,
    body: String,
}

impl RebusImage {
    pub fn to_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             \x20 <title>{title}</title>\n\
             \x20 <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n\
             {body}</svg>\n",
            w = self.width,
            h = self.height,
            title = svg::escape(&self.answer),
            body = self.body,
        )
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RebusResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_svg())?;
        tracing::debug!(path = %path.display(), template = self.template.name(), "image written");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// `None` when the graph fits no template.
    pub fn render(&self, graph: &PuzzleGraph) -> Option<RebusImage> {
        let Some(layout) = layout(graph) else {
            tracing::debug!(answer = %graph.answer, nodes = graph.node_count(), "render rejected");
            return None;
        };

        let mut body = String::new();
        if let Some(frame) = layout.frame {
            svg::draw_frame(&mut body, frame, &self.config);
        }
        for (id, placement) in &layout.slots {
            if let Some(node) = graph.node(*id) {
                let style = svg::NodeStyle::from_node(node, &self.config);
                svg::draw_node(&mut body, &style, *placement, &self.config);
            }
        }

        Some(RebusImage {
            answer: graph.answer.clone(),
            template: layout.template,
            width: self.config.width,
            height: self.config.height,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Relation, Rule, RuleSet};

    fn renderer() -> Renderer {
        Renderer::new(RenderConfig::default())
    }

    #[test]
    fn renders_single_node() {
        let mut graph = PuzzleGraph::with_answer("redcoat");
        graph.add_node("COAT", [Rule::Color(crate::rules::Color::Red)].into_iter().collect()).unwrap();
        let image = renderer().render(&graph).unwrap();
        assert_eq!(image.template, Template::Base);
        let svg = image.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<title>redcoat</title>"));
        assert!(svg.contains(">COAT</text>"));
        assert!(svg.contains("#d62728"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn inside_draws_a_frame() {
        let mut graph = PuzzleGraph::new();
        let a = graph.add_node("FISH", RuleSet::new()).unwrap();
        let b = graph.add_node("WATER", RuleSet::new()).unwrap();
        graph.add_edge(a, b, Relation::Inside).unwrap();
        let svg = renderer().render(&graph).unwrap().to_svg();
        assert!(svg.contains(r#"class="frame""#));
    }

    #[test]
    fn too_many_nodes_is_rejected() {
        let mut graph = PuzzleGraph::new();
        for text in ["A", "B", "C", "D"] {
            graph.add_node(text, RuleSet::new()).unwrap();
        }
        assert!(renderer().render(&graph).is_none());
    }

    #[test]
    fn save_writes_file() {
        let mut graph = PuzzleGraph::new();
        graph.add_node("A", RuleSet::new()).unwrap();
        let image = renderer().render(&graph).unwrap();
        let path = std::env::temp_dir().join(format!("rebusgraph-{}", std::process::id())).join("a.svg");
        image.save(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), image.to_svg());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
