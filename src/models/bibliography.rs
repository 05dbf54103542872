//! Accumulated BibTeX output.

/// Ordered, append-only list of citation records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bibliography {
    entries: Vec<String>,
}

impl Bibliography {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record at the end.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a `.bib` file: one blank line between records, trailing newline.
    ///
    /// Trailing whitespace of each record is dropped so the separator stays
    /// exactly one blank line.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let trimmed: Vec<&str> = self.entries.iter().map(|e| e.trim_end()).collect();
        let mut out = trimmed.join("\n\n");
        out.push('\n');
        out
    }
}

impl FromIterator<String> for Bibliography {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_separates_with_blank_line() {
        let bib: Bibliography = ["@a{x}".to_string(), "@b{y}".to_string()]
            .into_iter()
            .collect();
        assert_eq!(bib.render(), "@a{x}\n\n@b{y}\n");
    }

    #[test]
    fn test_render_trims_record_tails() {
        let mut bib = Bibliography::new();
        bib.push("@a{x,\n}\n");
        bib.push("@b{y,\n}\n\n");
        assert_eq!(bib.render(), "@a{x,\n}\n\n@b{y,\n}\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Bibliography::new().render(), "");
    }

    #[test]
    fn test_push_keeps_order() {
        let mut bib = Bibliography::new();
        bib.push("@first{1}");
        bib.push("@second{2}");
        assert_eq!(bib.entries(), ["@first{1}", "@second{2}"]);
    }
}
