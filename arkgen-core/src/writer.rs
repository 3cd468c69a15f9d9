//! Indentation-aware text sink.
//!
//! All emitted text goes through [`SourceWriter`]. Text is staged in memory
//! and only reaches the destination on [`SourceWriter::commit`], so a node
//! that fails half way leaves no partial output behind.

use std::io::{self, Write};

const INDENT_UNIT: &str = "\t";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    indent: usize,
    last_was_newline: bool,
}

/// Only valid until the next commit or discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    len: usize,
    indent: usize,
    last_was_newline: bool,
}

pub struct SourceWriter<W> {
    out: W,
    staged: String,
    indent: usize,
    last_was_newline: bool,
    minify: bool,
    checkpoint: Checkpoint,
}

impl<W: Write> SourceWriter<W> {
    pub fn new(out: W, minify: bool) -> Self {
        let checkpoint = Checkpoint {
            indent: 0,
            last_was_newline: false,
        };
        SourceWriter {
            out,
            staged: String::new(),
            indent: checkpoint.indent,
            last_was_newline: checkpoint.last_was_newline,
            minify,
            checkpoint,
        }
    }

    /// Append text, indenting first if the previous write ended a line.
    pub fn write(&mut self, text: &str) {
        if self.last_was_newline {
            for _ in 0..self.indent {
                self.staged.push_str(INDENT_UNIT);
            }
            self.last_was_newline = false;
        }
        self.staged.push_str(text);
    }

    pub fn write_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.write(ch.encode_utf8(&mut buf));
    }

    /// Line break; a no-op when minifying.
    pub fn newline(&mut self) {
        if !self.minify {
            self.staged.push('\n');
            self.last_was_newline = true;
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        assert!(self.indent > 0, "dedent below zero indentation");
        self.indent -= 1;
    }

    pub fn depth(&self) -> usize {
        self.indent
    }

    pub fn is_minified(&self) -> bool {
        self.minify
    }

    /// Text written since the last commit or discard.
    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// Position in the staged text that [`SourceWriter::rewind`] can return to.
    pub fn mark(&self) -> Mark {
        Mark {
            len: self.staged.len(),
            indent: self.indent,
            last_was_newline: self.last_was_newline,
        }
    }

    /// Drop everything staged after `mark` and restore its layout state.
    pub fn rewind(&mut self, mark: Mark) {
        self.staged.truncate(mark.len);
        self.indent = mark.indent;
        self.last_was_newline = mark.last_was_newline;
    }

    /// Move staged text to the destination.
    pub fn commit(&mut self) -> io::Result<()> {
        self.out.write_all(self.staged.as_bytes())?;
        self.staged.clear();
        self.checkpoint = Checkpoint {
            indent: self.indent,
            last_was_newline: self.last_was_newline,
        };
        Ok(())
    }

    /// Drop staged text and rewind to the state of the last commit.
    pub fn discard(&mut self) {
        self.staged.clear();
        self.indent = self.checkpoint.indent;
        self.last_was_newline = self.checkpoint.last_was_newline;
    }

    /// Commit anything pending, flush, and hand the destination back.
    pub fn finish(mut self) -> io::Result<W> {
        self.commit()?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(minify: bool, f: impl FnOnce(&mut SourceWriter<Vec<u8>>)) -> String {
        let mut writer = SourceWriter::new(Vec::new(), minify);
        f(&mut writer);
        let bytes = writer.finish().expect("vec writes never fail");
        String::from_utf8(bytes).expect("utf8")
    }

    #[test]
    fn indents_only_after_newline() {
        let text = render(false, |w| {
            w.write("{");
            w.indent();
            w.newline();
            w.write("a");
            w.write("b");
            w.newline();
            w.dedent();
            w.write("}");
        });
        assert_eq!(text, "{\n\tab\n}");
    }

    #[test]
    fn minified_writer_never_breaks_lines() {
        let text = render(true, |w| {
            w.indent();
            w.write("x");
            w.newline();
            w.write("y");
            w.dedent();
        });
        assert_eq!(text, "xy");
    }

    #[test]
    fn discard_rewinds_to_last_commit() {
        let mut writer = SourceWriter::new(Vec::new(), false);
        writer.write("kept");
        writer.newline();
        writer.commit().expect("commit");

        writer.indent();
        writer.write("dropped");
        writer.discard();
        assert_eq!(writer.depth(), 0);
        assert!(writer.staged().is_empty());

        writer.write("next");
        let bytes = writer.finish().expect("finish");
        assert_eq!(String::from_utf8(bytes).unwrap(), "kept\nnext");
    }

    #[test]
    fn rewind_drops_text_after_mark() {
        let text = render(false, |w| {
            w.write("{");
            w.indent();
            w.newline();
            let mark = w.mark();
            w.write("partial = ");
            w.indent();
            w.newline();
            w.rewind(mark);
            w.write("kept;");
            w.newline();
            w.dedent();
            w.write("}");
        });
        assert_eq!(text, "{\n\tkept;\n}");
    }

    #[test]
    #[should_panic(expected = "dedent below zero")]
    fn dedent_below_zero_is_a_bug() {
        let mut writer = SourceWriter::new(Vec::new(), false);
        writer.dedent();
    }
}
