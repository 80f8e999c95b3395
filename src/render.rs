use std::collections::BTreeMap;

use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{FlatGraph, Position};
use crate::theme::Theme;

/// Render the positioned graph as SVG.
///
/// Nodes the layout returned no position for (unreachable from any root)
/// are drawn at the configured fallback position; dangling edge endpoints
/// use the same default so every declared dependency stays visible.
pub fn render_svg(
    graph: &FlatGraph,
    positions: &BTreeMap<String, Position>,
    theme: &Theme,
    layout: &LayoutConfig,
    config: &RenderConfig,
) -> String {
    let fallback = Position {
        x: config.fallback_x,
        y: config.fallback_y,
    };
    let place = |id: &str| positions.get(id).copied().unwrap_or(fallback);

    // Shift the origin so the centered layout lands inside the viewport.
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    for node in &graph.nodes {
        let p = place(&node.path);
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    if graph.nodes.is_empty() {
        min_x = 0.0;
        max_x = 0.0;
        min_y = 0.0;
        max_y = 0.0;
    }

    let offset_x = config.padding + config.node_width / 2.0 - min_x;
    let offset_y = config.padding + config.node_height / 2.0 - min_y + legend_height(graph, theme);
    let width = (max_x - min_x + config.node_width + 2.0 * config.padding)
        .max(layout.horizontal_spacing);
    let height =
        (max_y - min_y + config.node_height + 2.0 * config.padding) + legend_height(graph, theme);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));
    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    for edge in &graph.edges {
        let from = place(&edge.source);
        let to = place(&edge.target);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#arrow)\"/>",
            from.x + offset_x,
            from.y + offset_y + config.node_height / 2.0,
            to.x + offset_x,
            to.y + offset_y - config.node_height / 2.0,
            theme.line_color
        ));
    }

    for node in &graph.nodes {
        let p = place(&node.path);
        let x = p.x + offset_x - config.node_width / 2.0;
        let y = p.y + offset_y - config.node_height / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" ry=\"8\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            config.node_width,
            config.node_height,
            theme.color_for_path(&node.path),
            theme.node_border_color
        ));

        let name = node.path.rsplit('/').next().unwrap_or(&node.path);
        let mut text_y = y + theme.font_size + 6.0;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{text_y:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            x + 8.0,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(name)
        ));
        // Content summaries display only their first two lines.
        for line in node.record.content.lines().take(2) {
            text_y += theme.font_size + 2.0;
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{text_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                x + 8.0,
                theme.font_family,
                theme.font_size * 0.85,
                theme.text_color,
                escape_xml(line)
            ));
        }
    }

    let mut legend_y = config.padding;
    for agent in graph.agents.iter().filter(|a| !a.is_empty()) {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{legend_y:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">agent: {}</text>",
            config.padding,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            escape_xml(agent)
        ));
        legend_y += theme.font_size + 4.0;
    }

    svg.push_str("</svg>");
    svg
}

fn legend_height(graph: &FlatGraph, theme: &Theme) -> f32 {
    let count = graph.agents.iter().filter(|a| !a.is_empty()).count();
    count as f32 * (theme.font_size + 4.0)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
