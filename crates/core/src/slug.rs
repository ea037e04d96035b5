use deunicode::deunicode;

/// Derive the URL slug for an idea title.
///
/// The title is transliterated to ASCII first, so the slug only ever holds
/// `[a-z0-9-]`. Alphanumeric runs are lowercased and joined with single
/// hyphens. Apostrophes are dropped without splitting the word (`"Don't"`
/// becomes `"dont"`).
#[must_use]
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if !matches!(ch, '\'' | '\u{2019}') {
            pending_separator = true;
        }
    }

    slug
}
