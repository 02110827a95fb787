//! Doc comment assembly.

/// A Go doc comment under construction
#[derive(Debug, Clone, Default)]
pub(crate) struct DocBlock {
    lines: Vec<String>,
    described: bool,
}

impl DocBlock {
    /// Start with `lead`, followed on the same line by the first
    /// description line.
    pub fn new(lead: impl Into<String>, docs: &[String]) -> Self {
        let mut lead = lead.into();
        let mut rest = docs.iter();
        if let Some(first) = rest.next() {
            if !first.is_empty() {
                if !lead.is_empty() {
                    lead.push(' ');
                }
                lead.push_str(first);
            }
        }
        let mut lines = vec![lead];
        lines.extend(rest.cloned());
        Self {
            lines,
            described: !docs.is_empty(),
        }
    }

    /// Append a separate paragraph
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.lines.push(String::new());
        self.lines.push(text.into());
        self.described = true;
        self
    }

    /// Append `lines` as one paragraph; nothing when empty
    pub fn paragraphs(mut self, lines: &[String]) -> Self {
        if lines.is_empty() {
            return self;
        }
        self.lines.push(String::new());
        self.lines.extend(lines.iter().cloned());
        self.described = true;
        self
    }

    /// Append experimental and deprecation notes for a `subject` (`type`,
    /// `command`, ...)
    pub fn notes(self, subject: &str, experimental: bool, deprecated: bool) -> Self {
        let mut doc = self;
        if experimental {
            doc = doc.paragraph(format!("Note: This {subject} is experimental."));
        }
        if deprecated {
            doc = doc.paragraph(format!("Deprecated: This {subject} is deprecated."));
        }
        doc
    }

    /// Nothing beyond the lead line
    pub fn is_bare(&self) -> bool {
        !self.described
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render as `//` lines at `indent`
    pub fn render(&self, indent: &str) -> String {
        let mut out = String::new();
        for line in &self.lines {
            if line.is_empty() {
                out.push_str(&format!("{indent}//\n"));
            } else {
                out.push_str(&format!("{indent}// {line}\n"));
            }
        }
        out
    }
}

/// `Values: "a", "b".` line for inline enums
pub(crate) fn values_line(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| super::gofile::quote(v)).collect();
    format!("Values: {}.", quoted.join(", "))
}
