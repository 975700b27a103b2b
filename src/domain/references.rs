//! Extraction of `[[wikilinks]]` and `#hashtags` from note text.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `[[Title]]` or `[[Title|Alias]]`. Group 1 is the title.
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").expect("wikilink pattern is valid")
});

/// `#` followed by a maximal run of word characters. Group 1 is the name.
static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag pattern is valid"));

/// Inline references found in a piece of note content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    /// Wikilink target titles exactly as written, aliases dropped.
    pub titles: BTreeSet<String>,
    /// Hashtag names without the leading `#`, case preserved.
    pub tags: BTreeSet<String>,
}

impl References {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.tags.is_empty()
    }
}

/// Parses wikilink titles and hashtags out of `content`.
///
/// Never fails: malformed syntax simply does not match. Both outputs are
/// deduplicated.
///
/// # Examples
///
/// ```
/// use notegraph::domain::parse_references;
///
/// let refs = parse_references("See [[Note B|bee]] and #urgent, #urgent.");
/// assert!(refs.titles.contains("Note B"));
/// assert_eq!(refs.tags.len(), 1);
/// ```
pub fn parse_references(content: &str) -> References {
    if content.is_empty() {
        return References::default();
    }

    let titles = WIKILINK_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let tags = HASHTAG_RE
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    References { titles, tags }
}
