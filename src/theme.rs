use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Builtin file-type palette, keyed by the extension after the last `.`.
static EXTENSION_COLORS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("js", "#F7DF1E"),
        ("ts", "#3178C6"),
        ("jsx", "#61DAFB"),
        ("tsx", "#61DAFB"),
        ("css", "#264DE4"),
        ("html", "#E34C26"),
        ("yaml", "#CB171E"),
        ("dart", "#0175C2"),
        ("python", "#3776AB"),
        ("png", "#A9746E"),
        ("glb", "#8E7CC3"),
        ("mp4", "#6AA84F"),
        ("mp3", "#45818E"),
        ("marp", "#D24B76"),
        ("mmd", "#FF3670"),
        ("md", "#083FA1"),
    ])
});

const DEFAULT_NODE_COLOR: &str = "#B0B7C3";

/// Presentation palette for the rendered graph. Extension lookup has a fixed
/// neutral default so unknown file types still render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub extension_colors: BTreeMap<String, String>,
    pub default_color: String,
    pub background: String,
    pub text_color: String,
    pub node_border_color: String,
    pub line_color: String,
    pub font_family: String,
    pub font_size: f32,
}

impl Theme {
    /// Color for a node, derived from the substring after the last `.` of
    /// its path.
    pub fn color_for_path(&self, path: &str) -> &str {
        let extension = path.rsplit('.').next().unwrap_or("");
        self.extension_colors
            .get(extension)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            extension_colors: EXTENSION_COLORS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            default_color: DEFAULT_NODE_COLOR.to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            node_border_color: "#4A5568".to_string(),
            line_color: "#7A8AA6".to_string(),
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
        }
    }
}
