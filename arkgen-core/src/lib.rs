//! Core library for the arkgen source re-printer.
//!
//! Turns an already-parsed Ark AST back into source text. The pipeline is:
//!
//!   AST (in memory or JSON)
//!     -> loader   (serialized `File`s)
//!     -> driver   (one `<name>.out` per file)
//!     -> emitter  (node dispatch, literals, operators, attributes)
//!     -> writer   (indentation, newlines, staging)
//!
//! Front ends and tools should depend on this crate rather than
//! reimplementing the printer.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Input: AST model and loading
// ---------------------------------------------------------------------

pub mod ast;
pub mod loader;

// ---------------------------------------------------------------------
// Output: text sink, emitter and batch driver
// ---------------------------------------------------------------------

pub mod writer;
pub mod emitter;
pub mod driver;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use driver::{BatchPolicy, BatchReport, EmitOptions, emit_to_string, generate, generate_file};
pub use emitter::{Emitter, UnsupportedPolicy};
pub use error::{CoreError, NodeGroup};
pub use loader::load_inputs;
