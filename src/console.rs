//! Output console for interpreted programs.
//!
//! `println` and `print` write here instead of straight to stdout, so tests
//! can assert on complete output lines and the binary can flush them at the
//! end of a run.

/// Captures program output line by line
#[derive(Debug, Default)]
pub struct Console {
    lines: Vec<String>,
    current: String,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
        }
    }

    /// Append text to the current line, honoring embedded newlines
    pub fn print(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                let line = std::mem::take(&mut self.current);
                self.lines.push(line);
            } else {
                self.current.push(ch);
            }
        }
    }

    /// Append text and terminate the line
    pub fn println(&mut self, text: &str) {
        self.print(text);
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
    }

    /// Completed output lines, excluding any unterminated tail
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full output as a single string. An unterminated final line is
    /// included without a trailing newline.
    pub fn output(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.current);
        out
    }
}
