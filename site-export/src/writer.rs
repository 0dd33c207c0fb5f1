//! Indented source buffer used by the emitters.

/// Accumulates output lines at a tracked indentation level.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    buffer: String,
    indent_level: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation.
    pub(crate) fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent_level {
                self.buffer.push_str("  ");
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Write pre-formatted text verbatim.
    pub(crate) fn raw(&mut self, text: &str) {
        self.buffer.push_str(text);
        if !text.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    pub(crate) fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation() {
        let mut w = SourceWriter::new();
        w.line("<div>");
        w.indent();
        w.line("<p></p>");
        w.line("");
        w.dedent();
        w.dedent();
        w.line("</div>");
        assert_eq!(w.finish(), "<div>\n  <p></p>\n\n</div>\n");
    }
}
