use std::io::Write;

use super::Emitter;
use super::literals::escape;
use crate::ast::Attr;

impl<W: Write> Emitter<W> {
    /// `[key] [key="value"] ` ahead of the annotated declaration.
    pub(super) fn emit_attrs(&mut self, attrs: &[Attr]) {
        for attr in attrs {
            self.write("[");
            self.write(&attr.key);
            if let Some(value) = attr.value() {
                self.write("=\"");
                self.write(&escape(value));
                self.write("\"");
            }
            self.write("] ");
        }
    }
}
