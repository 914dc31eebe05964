//! Core data types for fetch results and provenance.

use serde::{Deserialize, Serialize};

/// Category of documentation content, inferred from URL shape.
///
/// Classification is by path marker, first match wins; it never requires
/// inspecting page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A UI component reference page (`/docs/components/...`).
    Component,
    /// A general documentation page (`/docs/...`).
    Doc,
    /// A block gallery entry (`/blocks/...`).
    Block,
    /// A chart gallery entry (`/charts/...`).
    Chart,
    /// The theme builder (`/themes`).
    Theme,
    /// Anything that matches no known marker.
    #[default]
    Unknown,
}

/// Ordered URL path markers. Component must precede the generic docs
/// marker or every component page would classify as `Doc`.
const CONTENT_TYPE_MARKERS: &[(&str, ContentType)] = &[
    ("/docs/components/", ContentType::Component),
    ("/docs/", ContentType::Doc),
    ("/blocks/", ContentType::Block),
    ("/charts/", ContentType::Chart),
    ("/themes", ContentType::Theme),
];

impl ContentType {
    /// Classify a URL by substring matching against the fixed marker list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use uidocs_core::ContentType;
    ///
    /// assert_eq!(
    ///     ContentType::infer("https://ui.shadcn.com/docs/components/button"),
    ///     ContentType::Component,
    /// );
    /// assert_eq!(ContentType::infer("https://example.com/pricing"), ContentType::Unknown);
    /// ```
    #[must_use]
    pub fn infer(url: &str) -> Self {
        CONTENT_TYPE_MARKERS
            .iter()
            .find(|(marker, _)| url.contains(marker))
            .map_or(Self::Unknown, |&(_, ty)| ty)
    }
}

/// Which strategy (or the cache) produced a result.
///
/// Diagnostic provenance only; never influences correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStrategy {
    /// Served from the cache store without network activity.
    Cache,
    /// Direct lightweight-document fetch.
    Direct,
    /// Headless browser render.
    Browser,
    /// Plain HTTP scrape plus Markdown conversion.
    Html,
}

impl std::fmt::Display for SourceStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cache => "cache",
            Self::Direct => "direct",
            Self::Browser => "browser",
            Self::Html => "html",
        };
        write!(f, "{s}")
    }
}

/// Page metadata pulled from meta tags and document structure.
///
/// Every field is optional; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Page title (og:title, `<title>`, or first heading).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta or og description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Author meta tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Comma-split keyword list from the keywords meta tag.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Social card image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Canonical link, if the page declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    /// Last modification timestamp the page advertises.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

/// A fenced code span extracted from converted Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Info-string token of the fence, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// The code itself, fence markers excluded.
    pub code: String,
    /// Optional human label (e.g. a tab title), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The unit of work output: normalized content plus provenance.
///
/// Invariant: `success == true` exactly when `content` holds non-empty,
/// non-whitespace Markdown. The constructors uphold this; a result is
/// never partially valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// Canonical URL the result was produced for.
    pub url: String,
    /// Whether usable content was produced.
    pub success: bool,
    /// Normalized Markdown body. Present iff `success`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Raw HTML retained by strategies that parsed a document, for
    /// secondary extraction by downstream consumers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Extracted page metadata.
    #[serde(default)]
    pub metadata: PageMetadata,
    /// Content category inferred from the URL.
    pub content_type: ContentType,
    /// Which strategy produced this result.
    pub source_strategy: SourceStrategy,
    /// Fenced code spans found in the content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_blocks: Vec<CodeBlock>,
    /// Non-fatal annotations surfaced to the caller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Populated iff `success == false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    /// Build a successful result.
    ///
    /// Returns `None` when `content` is empty or whitespace-only, since
    /// such a result would violate the success invariant; callers should
    /// treat that case as an extraction failure.
    #[must_use]
    pub fn ok(url: &str, content: String, strategy: SourceStrategy) -> Option<Self> {
        if content.trim().is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            success: true,
            content: Some(content),
            raw_html: None,
            metadata: PageMetadata::default(),
            content_type: ContentType::infer(url),
            source_strategy: strategy,
            code_blocks: Vec::new(),
            notes: Vec::new(),
            error: None,
        })
    }

    /// Build a failed result carrying a descriptive error.
    #[must_use]
    pub fn failure(url: &str, strategy: SourceStrategy, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            success: false,
            content: None,
            raw_html: None,
            metadata: PageMetadata::default(),
            content_type: ContentType::infer(url),
            source_strategy: strategy,
            code_blocks: Vec::new(),
            notes: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Attach metadata (builder style).
    #[must_use]
    pub fn with_metadata(mut self, metadata: PageMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attach the raw HTML the strategy parsed (builder style).
    #[must_use]
    pub fn with_raw_html(mut self, raw_html: String) -> Self {
        self.raw_html = Some(raw_html);
        self
    }

    /// Attach extracted code blocks (builder style).
    #[must_use]
    pub fn with_code_blocks(mut self, code_blocks: Vec<CodeBlock>) -> Self {
        self.code_blocks = code_blocks;
        self
    }

    /// Append a non-fatal note.
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn infer_component_before_generic_doc() {
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/docs/components/button"),
            ContentType::Component
        );
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/docs/cli"),
            ContentType::Doc
        );
    }

    #[test]
    fn infer_gallery_paths() {
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/blocks/dashboard-01"),
            ContentType::Block
        );
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/charts/area-1"),
            ContentType::Chart
        );
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/themes"),
            ContentType::Theme
        );
    }

    #[test]
    fn infer_unknown_for_unrelated_path() {
        assert_eq!(
            ContentType::infer("https://ui.shadcn.com/examples/cards"),
            ContentType::Unknown
        );
    }

    #[test]
    fn ok_rejects_whitespace_content() {
        assert!(FetchResult::ok("https://x/docs/a", "   \n\t".into(), SourceStrategy::Direct).is_none());
        assert!(FetchResult::ok("https://x/docs/a", String::new(), SourceStrategy::Direct).is_none());
    }

    #[test]
    fn ok_upholds_success_invariant() {
        let result = FetchResult::ok(
            "https://ui.shadcn.com/docs/components/button",
            "# Button".into(),
            SourceStrategy::Direct,
        )
        .unwrap();
        assert!(result.success);
        assert_eq!(result.content.as_deref(), Some("# Button"));
        assert_eq!(result.content_type, ContentType::Component);
        assert!(result.error.is_none());
    }

    #[test]
    fn failure_carries_error_and_no_content() {
        let result = FetchResult::failure(
            "https://ui.shadcn.com/docs/cli",
            SourceStrategy::Html,
            "no content region found",
        );
        assert!(!result.success);
        assert!(result.content.is_none());
        assert_eq!(result.error.as_deref(), Some("no content region found"));
    }

    #[test]
    fn serialization_uses_camel_case() {
        let result = FetchResult::ok(
            "https://ui.shadcn.com/docs/cli",
            "# CLI".into(),
            SourceStrategy::Html,
        )
        .unwrap()
        .with_raw_html("<main><h1>CLI</h1></main>".into());

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("rawHtml"));
        assert!(json.contains("contentType"));
        assert!(json.contains("sourceStrategy"));
        assert!(json.contains("\"html\""));

        let roundtrip: FetchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, result);
    }
}
