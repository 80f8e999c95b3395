use thiserror::Error;

use crate::ir::FileTreeNode;

/// Failure of the YAML front end. Surfaced to the user verbatim; the
/// flattener and layout engine never see malformed input.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("structure document must be a mapping at the top level")]
    NotAMapping,
}

/// Parse a structure document into the tagged tree.
///
/// Syntactic well-formedness is all that is checked here. Shape errors
/// below the top level are not errors at all: the untagged union in `ir`
/// absorbs them and the flattener skips what it cannot read.
pub fn parse_structure(input: &str) -> Result<FileTreeNode, ParseError> {
    let root: FileTreeNode = serde_yaml::from_str(input)?;
    match root {
        FileTreeNode::Branch(_) => Ok(root),
        _ => Err(ParseError::NotAMapping),
    }
}
