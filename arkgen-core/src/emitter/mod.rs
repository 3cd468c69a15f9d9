//! AST-to-source emitter.
//!
//! [`Emitter::emit`] is the single entry point: it matches on the node's
//! group and variant and renders it through the [`SourceWriter`]. Rendering
//! routines are split by concern:
//!
//! - `declarations`: functions, structs and variables
//! - `statements`: return, call and assignment statements
//! - `expressions`: operators, casts, calls, access paths
//! - `literals`: rune, integer, floating and string literals
//! - `attrs`: `[key="value"]` annotation lists

mod attrs;
mod declarations;
mod expressions;
mod literals;
mod statements;

use std::io::Write;

use tracing::{debug, warn};

use crate::ast::{Block, Node};
use crate::error::CoreError;
use crate::writer::SourceWriter;

pub use literals::escape;

/// What to do with a node variant the emitter cannot render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Fail with [`CoreError::Unsupported`].
    #[default]
    Abort,
    /// Drop the enclosing block-level or top-level node and carry on.
    Skip,
}

pub struct Emitter<W> {
    writer: SourceWriter<W>,
    unsupported: UnsupportedPolicy,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: SourceWriter<W>, unsupported: UnsupportedPolicy) -> Self {
        Emitter {
            writer,
            unsupported,
        }
    }

    pub fn writer(&self) -> &SourceWriter<W> {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut SourceWriter<W> {
        &mut self.writer
    }

    pub fn into_writer(self) -> SourceWriter<W> {
        self.writer
    }

    /// Emit one top-level or block-level node.
    ///
    /// An unsupported variant anywhere inside the node fails the whole node.
    /// Under [`UnsupportedPolicy::Skip`] the node's partial text is rolled
    /// back and emission carries on with the next node.
    pub fn emit(&mut self, node: &Node) -> Result<(), CoreError> {
        let mark = self.writer.mark();
        match self.emit_node(node) {
            Err(CoreError::Unsupported { group })
                if self.unsupported == UnsupportedPolicy::Skip =>
            {
                self.writer.rewind(mark);
                warn!(%group, node = %node.group(), "skipping node with unsupported variant");
                Ok(())
            }
            result => result,
        }
    }

    fn emit_node(&mut self, node: &Node) -> Result<(), CoreError> {
        debug!(group = %node.group(), depth = self.writer.depth(), "emit node");
        match node {
            Node::Decl(decl) => self.emit_decl(decl),
            Node::Expr(expr) => self.emit_expr(expr),
            Node::Stat(stat) => self.emit_stat(stat),
        }
    }

    pub(crate) fn emit_block(&mut self, block: &Block) -> Result<(), CoreError> {
        self.write("{");
        self.writer.indent();
        self.newline();
        for node in &block.nodes {
            self.emit(node)?;
        }
        self.writer.dedent();
        self.write("}");
        Ok(())
    }

    fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    fn newline(&mut self) {
        self.writer.newline();
    }
}
