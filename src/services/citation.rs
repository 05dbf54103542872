//! Isolation of a single BibTeX record from a response body.

/// Marks the start of a second record: the first one's closing brace, a
/// blank line, then the next `@`.
pub const RECORD_DELIMITER: &str = "}\n\n@";

/// Return the first record in `text`, from its `@` through its closing
/// brace, or through the end of the input when no second record follows.
///
/// Returns `None` when `text` contains no `@`. Records separated by other
/// whitespace than a single blank line are not split.
pub fn first_record(text: &str) -> Option<&str> {
    let start = text.find('@')?;
    let rest = &text[start..];
    let end = rest
        .find(RECORD_DELIMITER)
        .map(|brace| brace + 1)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
