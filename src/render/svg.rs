//! Node drawing.
//!
//! Each node's look is derived from its own rules only, so nodes are drawn
//! independently and in any order. `NodeStyle::from_node` is the single
//! place where rules turn into visual properties; `draw_node` turns a style
//! and a placement into SVG elements.

use std::fmt::Write as _;

use crate::config::RenderConfig;
use crate::graph::PuzzleNode;
use crate::rules::{Color, Direction, Highlight, Rule};

use super::template::{Frame, Placement};

/// Average glyph advance as a fraction of the font size.
const ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.15;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeStyle {
    pub text: String,
    pub fill: &'static str,
    pub outlined: bool,
    pub font_family: String,
    pub scale: f32,
    pub copies: usize,
    pub vertical: bool,
    pub crossed: bool,
    pub highlight: Option<Highlight>,
}

impl NodeStyle {
    pub fn from_node(node: &PuzzleNode, config: &RenderConfig) -> Self {
        let mut style = NodeStyle {
            text: node.text.clone(),
            fill: Color::Black.hex(),
            outlined: false,
            font_family: config.font_family.clone(),
            scale: 1.0,
            copies: 1,
            vertical: false,
            crossed: false,
            highlight: None,
        };

        for rule in node.rules.iter() {
            match rule {
                Rule::Color(color) => {
                    style.fill = color.hex();
                    style.outlined = *color == Color::White;
                }
                Rule::Cross => style.crossed = true,
                Rule::Direction(direction) => {
                    style.vertical = direction.is_vertical();
                    style.text = match direction {
                        // Stacked top to bottom; "up" reads from the bottom.
                        Direction::Up | Direction::Reverse => node.text.chars().rev().collect(),
                        Direction::Down => node.text.clone(),
                    };
                }
                Rule::Size(size) => style.scale = size.scale(),
                Rule::Highlight(highlight) => style.highlight = Some(*highlight),
                Rule::Repeat(repeat) => style.copies = repeat.count(),
                // The substituted text is already on the node.
                Rule::Sound { .. } => {}
                Rule::Icon { .. } => style.font_family = config.icon_font_family.clone(),
            }
        }
        style
    }

    fn char_count(&self) -> usize {
        self.text.chars().count().max(1)
    }
}

/// Width and height of the drawn block, copies included.
fn block_size(style: &NodeStyle, font: f32) -> (f32, f32) {
    let chars = style.char_count() as f32;
    let copies = style.copies as f32;
    if style.vertical {
        (font * copies * 1.1, font * LINE_HEIGHT * chars)
    } else {
        (font * ADVANCE * chars, font * LINE_HEIGHT * copies)
    }
}

pub(crate) fn draw_node(out: &mut String, style: &NodeStyle, placement: Placement, config: &RenderConfig) {
    let font = config.font_size * placement.scale * style.scale;
    let cx = placement.x * config.width as f32;
    let cy = placement.y * config.height as f32;
    let (width, height) = block_size(style, font);
    let left = cx - width / 2.0;
    let top = cy - height / 2.0;

    let stroke = if style.outlined { r##" stroke="#000000" stroke-width="1""## } else { "" };
    let text_attrs = format!(
        r#"font-family="{}" font-size="{:.1}" fill="{}"{} text-anchor="middle" dominant-baseline="central""#,
        escape(&style.font_family),
        font,
        style.fill,
        stroke
    );

    // Horizontal text repeats downwards, vertical text repeats sideways.
    for copy in 0..style.copies {
        if style.vertical {
            let x = left + font * 1.1 * (copy as f32 + 0.5);
            for (row, ch) in style.text.chars().enumerate() {
                let y = top + font * LINE_HEIGHT * (row as f32 + 0.5);
                let _ = writeln!(out, r#"  <text x="{x:.1}" y="{y:.1}" {text_attrs}>{}</text>"#, escape_char(ch));
            }
        } else {
            let y = top + font * LINE_HEIGHT * (copy as f32 + 0.5);
            let _ = writeln!(out, r#"  <text x="{cx:.1}" y="{y:.1}" {text_attrs}>{}</text>"#, escape(&style.text));
        }
    }

    if style.crossed {
        let _ = writeln!(
            out,
            r##"  <line class="cross" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#cc0000" stroke-width="{:.1}"/>"##,
            left,
            top + height,
            left + width,
            top,
            (font / 12.0).max(2.0)
        );
    }

    if let Some(highlight) = style.highlight {
        let gap = font * ADVANCE;
        let arrow_attrs = format!(r##"font-size="{:.1}" fill="#d62728" text-anchor="middle" dominant-baseline="central""##, font * 0.8);
        let (before, after) = match highlight {
            Highlight::Before => (true, false),
            Highlight::Middle => (true, true),
            Highlight::After => (false, true),
        };
        if before {
            let _ = writeln!(out, r#"  <text class="highlight" x="{:.1}" y="{cy:.1}" {arrow_attrs}>→</text>"#, left - gap);
        }
        if after {
            let _ = writeln!(out, r#"  <text class="highlight" x="{:.1}" y="{cy:.1}" {arrow_attrs}>←</text>"#, left + width + gap);
        }
    }
}

pub(crate) fn draw_frame(out: &mut String, frame: Frame, config: &RenderConfig) {
    let (w, h) = (config.width as f32, config.height as f32);
    let _ = writeln!(
        out,
        r##"  <rect class="frame" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#000000" stroke-width="3"/>"##,
        frame.x * w,
        frame.y * h,
        frame.width * w,
        frame.height * h
    );
}

pub(crate) fn escape(text: &str) -> String {
    text.chars().map(escape_char).collect()
}

fn escape_char(ch: char) -> String {
    match ch {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Repeat, RuleSet, Size};

    fn node(text: &str, rules: &[Rule]) -> PuzzleNode {
        let rules = rules.iter().cloned().collect::<RuleSet>();
        PuzzleNode { id: 1, text: text.to_string(), rules, merged: Vec::new() }
    }

    fn style(text: &str, rules: &[Rule]) -> NodeStyle {
        NodeStyle::from_node(&node(text, rules), &RenderConfig::default())
    }

    #[test]
    fn plain_node_style() {
        let s = style("COAT", &[]);
        assert_eq!(s.text, "COAT");
        assert_eq!(s.copies, 1);
        assert_eq!(s.scale, 1.0);
        assert!(!s.vertical && !s.crossed && !s.outlined);
    }

    #[test]
    fn direction_transforms() {
        assert_eq!(style("ABC", &[Rule::Direction(Direction::Reverse)]).text, "CBA");
        let up = style("ABC", &[Rule::Direction(Direction::Up)]);
        assert!(up.vertical);
        assert_eq!(up.text, "CBA");
        let down = style("ABC", &[Rule::Direction(Direction::Down)]);
        assert!(down.vertical);
        assert_eq!(down.text, "ABC");
    }

    #[test]
    fn size_colour_and_repeat() {
        let s = style("X", &[Rule::Size(Size::Big), Rule::Color(Color::White), Rule::Repeat(Repeat::Four)]);
        assert_eq!(s.scale, 2.0);
        assert!(s.outlined);
        assert_eq!(s.copies, 4);
        assert_eq!(style("X", &[Rule::Size(Size::Small)]).scale, 0.5);
    }

    #[test]
    fn icon_switches_font() {
        let s = style("🐱", &[Rule::Icon { from: "cat".into(), glyph: "🐱".into() }]);
        assert_eq!(s.font_family, RenderConfig::default().icon_font_family);
    }

    #[test]
    fn repeat_stacks_horizontal_text() {
        let config = RenderConfig::default();
        let mut out = String::new();
        draw_node(&mut out, &style("AB", &[Rule::Repeat(Repeat::Two)]), Placement { x: 0.5, y: 0.5, scale: 1.0 }, &config);
        assert_eq!(out.matches("<text").count(), 2);
        assert_eq!(out.matches(r#"x="200.0""#).count(), 2);
    }

    #[test]
    fn cross_and_highlight_elements() {
        let config = RenderConfig::default();
        let mut out = String::new();
        let s = style("AB", &[Rule::Cross, Rule::Highlight(Highlight::Middle)]);
        draw_node(&mut out, &s, Placement { x: 0.5, y: 0.5, scale: 1.0 }, &config);
        assert!(out.contains(r#"<line class="cross""#));
        assert!(out.contains("→"));
        assert!(out.contains("←"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape(r#"A&B<"C">"#), "A&amp;B&lt;&quot;C&quot;&gt;");
    }
}
