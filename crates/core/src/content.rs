use ammonia::Builder;

/// Closing tags after which extracted text gets a word break.
const BLOCK_CLOSERS: &[&str] = &[
    "</p>",
    "</div>",
    "</li>",
    "</blockquote>",
    "</pre>",
    "</h1>",
    "</h2>",
    "</h3>",
    "</h4>",
    "</h5>",
    "</h6>",
    "<br>",
];

/// Sanitized rich text plus its plain-text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizedContent {
    /// Allow-listed HTML, or `None` when nothing survives sanitization.
    pub html: Option<String>,
    /// Markup-free text of `html`, or `None` when it has no text.
    pub text: Option<String>,
}

/// Allow-list HTML sanitizer for idea bodies.
///
/// Built once per process and shared; both inner builders are immutable
/// after construction.
pub struct ContentSanitizer {
    rich: Builder<'static>,
    plain: Builder<'static>,
}

impl std::fmt::Debug for ContentSanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentSanitizer").finish_non_exhaustive()
    }
}

impl Default for ContentSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSanitizer {
    #[must_use]
    pub fn new() -> Self {
        let mut rich = Builder::default();
        rich.add_tag_attributes("img", &["resizable"])
            .add_tag_attributes("pre", &["spellcheck", "class"])
            .add_tag_attributes("code", &["spellcheck", "data-code-block-language"])
            .set_tag_attribute_value("a", "rel", "noopener noreferrer nofollow")
            .set_tag_attribute_value("a", "target", "_blank")
            .link_rel(None);

        Self {
            rich,
            plain: Builder::empty(),
        }
    }

    /// Sanitize raw editor HTML. Returns `None` if nothing but whitespace
    /// remains.
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> Option<String> {
        let cleaned = self.rich.clean(raw).to_string();
        if cleaned.trim().is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Extract the text of already-sanitized HTML: all tags removed, entities
    /// decoded, whitespace runs collapsed to single spaces.
    #[must_use]
    pub fn strip_markup(&self, safe_html: &str) -> Option<String> {
        let mut spaced = safe_html.to_owned();
        for closer in BLOCK_CLOSERS {
            spaced = spaced.replace(closer, &format!("{closer} "));
        }

        let escaped = self.plain.clean(&spaced).to_string();
        let text = decode_text_entities(&escaped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if text.is_empty() { None } else { Some(text) }
    }

    /// Sanitize optional raw content and derive its plain text.
    #[must_use]
    pub fn prepare(&self, raw: Option<&str>) -> SanitizedContent {
        let Some(html) = raw.and_then(|r| self.sanitize(r)) else {
            return SanitizedContent::default();
        };
        let text = self.strip_markup(&html);
        SanitizedContent {
            html: Some(html),
            text,
        }
    }
}

/// Reverse the escapes the HTML serializer applies to text nodes.
///
/// ammonia serializes through html5ever, which only emits `&amp;`, `&nbsp;`,
/// `&lt;`, `&gt;` and `&quot;` in text. Any other entity in the input was
/// already decoded by the parser. `&amp;` must be replaced last.
fn decode_text_entities(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
