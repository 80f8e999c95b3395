#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod flatten;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, FlattenConfig, LayoutConfig, RenderConfig};
pub use flatten::flatten_tree;
pub use ir::{DependencyEdge, FileRecord, FileTreeNode, FlatGraph, FlatNode, Position};
pub use layout::compute_layout;
pub use parser::{parse_structure, ParseError};
pub use render::render_svg;
pub use theme::Theme;
