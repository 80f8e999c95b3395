use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Flattener settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlattenConfig {
    /// Prefix prepended to every accumulated path. Empty means top-level
    /// mapping keys are the first path segment.
    pub root_label: String,
}

/// Spacing knobs of the leveling layout. Injected rather than read from
/// module-level constants so the engine stays testable with arbitrary
/// values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    /// Horizontal shift applied to odd levels only, a visual de-collision
    /// heuristic rather than overlap detection.
    pub stagger_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 200.0,
            vertical_spacing: 120.0,
            stagger_offset: 50.0,
        }
    }
}

/// Node box geometry and the default placement for nodes the layout engine
/// returned no position for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub node_width: f32,
    pub node_height: f32,
    pub padding: f32,
    pub fallback_x: f32,
    pub fallback_y: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 64.0,
            padding: 40.0,
            fallback_x: 0.0,
            fallback_y: -160.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub flatten: FlattenConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

/// Optional JSON override file, camelCase keys, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    root_label: Option<String>,
    horizontal_spacing: Option<f32>,
    vertical_spacing: Option<f32>,
    stagger_offset: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    padding: Option<f32>,
    fallback_x: Option<f32>,
    fallback_y: Option<f32>,
    extension_colors: Option<BTreeMap<String, String>>,
    default_color: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    line_color: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_overrides(&mut config, parsed);
    Ok(config)
}

fn apply_overrides(config: &mut Config, file: ConfigFile) {
    if let Some(v) = file.root_label {
        config.flatten.root_label = v;
    }
    if let Some(v) = file.horizontal_spacing {
        config.layout.horizontal_spacing = v;
    }
    if let Some(v) = file.vertical_spacing {
        config.layout.vertical_spacing = v;
    }
    if let Some(v) = file.stagger_offset {
        config.layout.stagger_offset = v;
    }
    if let Some(v) = file.node_width {
        config.render.node_width = v;
    }
    if let Some(v) = file.node_height {
        config.render.node_height = v;
    }
    if let Some(v) = file.padding {
        config.render.padding = v;
    }
    if let Some(v) = file.fallback_x {
        config.render.fallback_x = v;
    }
    if let Some(v) = file.fallback_y {
        config.render.fallback_y = v;
    }
    if let Some(colors) = file.extension_colors {
        // Overrides merge onto the builtin table rather than replacing it.
        for (extension, color) in colors {
            config.theme.extension_colors.insert(extension, color);
        }
    }
    if let Some(v) = file.default_color {
        config.theme.default_color = v;
    }
    if let Some(v) = file.background {
        config.theme.background = v;
    }
    if let Some(v) = file.text_color {
        config.theme.text_color = v;
    }
    if let Some(v) = file.line_color {
        config.theme.line_color = v;
    }
}
