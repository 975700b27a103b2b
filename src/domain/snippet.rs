//! Context snippets around a wikilink reference.

use regex::RegexBuilder;

/// Characters of context kept on each side of the matched reference.
pub const SNIPPET_CONTEXT_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// Returns the text surrounding the first `[[target_title]]` reference in
/// `text`, or an empty string when there is none.
///
/// The title is matched literally and case-insensitively, optionally followed
/// by an `|alias` clause. Up to [`SNIPPET_CONTEXT_CHARS`] characters are kept
/// on each side; `...` marks a side that was cut short of the text boundary.
///
/// # Examples
///
/// ```
/// use notegraph::domain::extract_snippet;
///
/// assert_eq!(extract_snippet("See [[note b]].", "Note B"), "See [[note b]].");
/// assert_eq!(extract_snippet("No links here.", "Note B"), "");
/// ```
pub fn extract_snippet(text: &str, target_title: &str) -> String {
    if text.is_empty() || target_title.is_empty() {
        return String::new();
    }

    let pattern = format!(r"\[\[{}(?:\|[^\]]+)?\]\]", regex::escape(target_title));
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        // An escaped literal always compiles unless it blows the size limit
        Err(_) => return String::new(),
    };

    let Some(m) = re.find(text) else {
        return String::new();
    };

    // Walk back/forward by characters so multi-byte text never splits.
    let window_start = text[..m.start()]
        .char_indices()
        .rev()
        .nth(SNIPPET_CONTEXT_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let window_end = text[m.end()..]
        .char_indices()
        .nth(SNIPPET_CONTEXT_CHARS)
        .map(|(i, _)| m.end() + i)
        .unwrap_or(text.len());

    let mut snippet = String::with_capacity(window_end - window_start + 2 * ELLIPSIS.len());
    if window_start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&text[window_start..window_end]);
    if window_end < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}
