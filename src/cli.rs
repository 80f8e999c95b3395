use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::load_config;
use crate::flatten::flatten_tree;
use crate::layout::compute_layout;
use crate::layout_dump::{write_layout_dump, LayoutDump};
use crate::parser::parse_structure;
use crate::render::render_svg;

#[derive(Parser, Debug)]
#[command(
    name = "structviz",
    version,
    about = "Structure YAML to positioned dependency graph"
)]
pub struct Args {
    /// Input file (.yaml) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/json). Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (spacing and color overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let root = parse_structure(&input)?;
    let graph = flatten_tree(&root, &config.flatten);
    let positions = compute_layout(&graph.node_ids(), &graph.edges, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(
                &graph,
                &positions,
                &config.theme,
                &config.layout,
                &config.render,
            );
            write_output(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => {
                write_layout_dump(path, &graph, &positions, &config.theme, &config.render)?;
            }
            None => {
                let dump =
                    LayoutDump::from_graph(&graph, &positions, &config.theme, &config.render);
                let json = serde_json::to_string_pretty(&dump)?;
                write_output(&json, None)?;
            }
        },
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(contents: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
