//! Slug generation for note titles.

use deunicode::deunicode_with_tofu;

/// Slug used when a title contains no letters or digits.
pub const EMPTY_SLUG: &str = "untitled";

/// Converts a title to its unique, URL-friendly slug.
///
/// - Transliterates non-ASCII text to ASCII ("Café" becomes "cafe",
///   "Привет" becomes "privet")
/// - Converts letters to lowercase
/// - Treats every run of other characters (spaces, punctuation, underscores,
///   symbols with no transliteration) as a single hyphen
/// - Trims leading/trailing hyphens
/// - Returns "untitled" for empty results
///
/// Wikilinks resolve through this function, so `[[API Design]]`,
/// `[[api design]]` and `[[API: Design]]` all point at the same note.
///
/// # Examples
///
/// ```
/// use notegraph::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Café Design"), "cafe-design");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    // Characters without a transliteration become separators.
    let ascii = deunicode_with_tofu(title, " ");
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        return EMPTY_SLUG.to_string();
    }
    slug
}
