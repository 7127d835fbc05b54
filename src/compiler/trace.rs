//! Parse-tree trace
//!
//! Every production the parser enters is written as an open/close tag pair,
//! terminals as `<kind> literal </kind>` lines. Nesting depth decides the
//! indentation, two spaces per level.

const INDENT: &str = "  ";

/// Snapshot of the writer taken before a speculative parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceMark {
    len: usize,
    depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TraceWriter {
    lines: Vec<String>,
    depth: usize,
}

impl TraceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &str) {
        self.push(format!("<{}>", tag));
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        debug_assert!(self.depth > 0, "closing <{}> without an open tag", tag);
        self.depth = self.depth.saturating_sub(1);
        self.push(format!("</{}>", tag));
    }

    pub fn terminal(&mut self, tag: &str, lexeme: &str) {
        self.push(format!("<{0}> {1} </{0}>", tag, escape(lexeme)));
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn mark(&self) -> TraceMark {
        TraceMark {
            len: self.lines.len(),
            depth: self.depth,
        }
    }

    /// Drop every line written since `mark`.
    pub fn rewind(&mut self, mark: TraceMark) {
        self.lines.truncate(mark.len);
        self.depth = mark.depth;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    fn push(&mut self, line: String) {
        let mut indented = INDENT.repeat(self.depth);
        indented.push_str(&line);
        self.lines.push(indented);
    }
}

pub fn escape(lexeme: &str) -> String {
    let mut escaped = String::with_capacity(lexeme.len());

    for c in lexeme.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '&' => escaped.push_str("&amp;"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_drives_indentation() {
        let mut trace = TraceWriter::new();

        trace.open("returnStatement");
        trace.terminal("keyword", "return");
        trace.terminal("symbol", ";");
        trace.close("returnStatement");

        assert_eq!(
            trace.into_lines(),
            vec![
                "<returnStatement>",
                "  <keyword> return </keyword>",
                "  <symbol> ; </symbol>",
                "</returnStatement>",
            ]
        );
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(escape("<"), "&lt;");
        assert_eq!(escape(">"), "&gt;");
        assert_eq!(escape("&"), "&amp;");
        assert_eq!(escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn rewind_discards_lines_and_depth() {
        let mut trace = TraceWriter::new();
        trace.open("statements");
        let mark = trace.mark();

        trace.open("letStatement");
        trace.terminal("keyword", "let");
        trace.rewind(mark);

        assert_eq!(trace.lines(), &["<statements>".to_string()]);
        assert_eq!(trace.depth(), 1);
    }

    #[quickcheck]
    fn balanced_tags_return_to_depth_zero(depth: u8) -> bool {
        let depth = (depth % 32) as usize;
        let mut trace = TraceWriter::new();

        for _ in 0..depth {
            trace.open("term");
        }
        for _ in 0..depth {
            trace.close("term");
        }

        let lines = trace.lines();
        trace.depth() == 0
            && lines.len() == depth * 2
            && lines.last().map_or(true, |line| line == "</term>")
            && lines
                .iter()
                .take(depth)
                .enumerate()
                .all(|(level, line)| *line == format!("{}<term>", INDENT.repeat(level)))
    }
}
