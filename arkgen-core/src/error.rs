use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Capability group of a node, used to report unsupported variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeGroup {
    Declaration,
    Expression,
    Statement,
}

impl fmt::Display for NodeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeGroup::Declaration => "declaration",
            NodeGroup::Expression => "expression",
            NodeGroup::Statement => "statement",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("couldn't create output file `{}`: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read AST input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed AST in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unimplemented {group}")]
    Unsupported { group: NodeGroup },
}

impl CoreError {
    /// True for failures raised while emitting, as opposed to loading input.
    pub fn is_emission_failure(&self) -> bool {
        matches!(self, CoreError::Output { .. } | CoreError::Unsupported { .. })
    }
}
