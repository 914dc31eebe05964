//! Content extraction: raw HTML to normalized Markdown plus metadata.
//!
//! Pure transformations over an already-fetched document. The conversion
//! is deterministic (same HTML always yields identical Markdown), which
//! cache correctness and test reproducibility depend on.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use html2md::rewrite_html as html_to_markdown;

use crate::types::{CodeBlock, FetchResult, PageMetadata, SourceStrategy};

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<scraper::Selector> =
            LazyLock::new(|| scraper::Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

selector!(OG_TITLE_SELECTOR, "meta[property='og:title']");
selector!(TITLE_SELECTOR, "title");
selector!(H1_SELECTOR, "h1");
selector!(META_DESCRIPTION_SELECTOR, "meta[name='description']");
selector!(OG_DESCRIPTION_SELECTOR, "meta[property='og:description']");
selector!(AUTHOR_SELECTOR, "meta[name='author']");
selector!(KEYWORDS_SELECTOR, "meta[name='keywords']");
selector!(OG_IMAGE_SELECTOR, "meta[property='og:image']");
selector!(CANONICAL_SELECTOR, "link[rel='canonical']");
selector!(MODIFIED_SELECTOR, "meta[property='article:modified_time']");

// Content-region cascade. Gallery-style landing pages put their real
// content in repeated sections under <main>; ordinary doc pages have a
// single main/article region.
selector!(GALLERY_SECTIONS_SELECTOR, "main section");
selector!(MAIN_SELECTOR, "main");
selector!(ARTICLE_SELECTOR, "article");
selector!(BODY_SELECTOR, "body");

// Page chrome stripped from the selected region before conversion. The
// regex crate has no backreferences, so one pattern per tag.
regex!(NAV_RE, r"(?is)<nav\b[^>]*>.*?</nav>");
regex!(HEADER_RE, r"(?is)<header\b[^>]*>.*?</header>");
regex!(FOOTER_RE, r"(?is)<footer\b[^>]*>.*?</footer>");
regex!(ASIDE_RE, r"(?is)<aside\b[^>]*>.*?</aside>");
regex!(SCRIPT_RE, r"(?is)<script\b[^>]*>.*?</script>");
regex!(STYLE_RE, r"(?is)<style\b[^>]*>.*?</style>");
regex!(NOSCRIPT_RE, r"(?is)<noscript\b[^>]*>.*?</noscript>");

// Noise patterns for already-converted Markdown. Deliberately narrow and
// anchored: false negatives are acceptable, stripped real content is not.
regex!(
    ON_THIS_PAGE_RE,
    r"(?ms)^#{2,4} On This Page\s*$\n(?:^(?:[^#\n].*)?\n)*"
);
regex!(
    INSTALL_BOILERPLATE_RE,
    r"(?m)^```(?:bash|sh)\nnpx shadcn@[^\n]*\n```\n?"
);
regex!(
    LINK_LIST_RE,
    r"(?m)(?:^[-*] \[[^\]\n]+\]\([^)\n]+\)[ \t]*\n){10,}"
);
regex!(
    FOOTER_LINKS_RE,
    r"(?ms)^-{3,}\s*$\n(?:\s*\[[^\]\n]+\]\([^)\n]+\)\s*)+\z"
);

fn meta_content(document: &Html, selector: &scraper::Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Pull metadata from meta tags and document structure.
///
/// Title preference: social-card title, then `<title>`, then the first
/// `h1`. Every field is optional; absence is not an error.
#[must_use]
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = meta_content(&document, &OG_TITLE_SELECTOR)
        .or_else(|| {
            document
                .select(&TITLE_SELECTOR)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            document
                .select(&H1_SELECTOR)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .filter(|s| !s.is_empty())
        });

    let description = meta_content(&document, &META_DESCRIPTION_SELECTOR)
        .or_else(|| meta_content(&document, &OG_DESCRIPTION_SELECTOR));

    let keywords = meta_content(&document, &KEYWORDS_SELECTOR)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    let canonical_url = document
        .select(&CANONICAL_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(ToString::to_string);

    PageMetadata {
        title,
        description,
        author: meta_content(&document, &AUTHOR_SELECTOR),
        keywords,
        og_image: meta_content(&document, &OG_IMAGE_SELECTOR),
        canonical_url,
        last_modified: meta_content(&document, &MODIFIED_SELECTOR),
    }
}

/// Resolve the primary content region of a page to raw HTML.
///
/// Tries, in order: all gallery sections concatenated, `main`, `article`,
/// the whole body. Returns `None` when no candidate resolves to non-empty
/// text.
#[must_use]
pub fn select_content_region(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let sections: Vec<String> = document
        .select(&GALLERY_SECTIONS_SELECTOR)
        .map(|el| el.html())
        .collect();
    if sections.len() > 1 {
        let joined = sections.join("\n");
        if region_has_text(&joined) {
            return Some(joined);
        }
    }

    for selector in [&*MAIN_SELECTOR, &*ARTICLE_SELECTOR, &*BODY_SELECTOR] {
        if let Some(el) = document.select(selector).next() {
            let region = el.html();
            if region_has_text(&region) {
                return Some(region);
            }
        }
    }
    None
}

fn region_has_text(html: &str) -> bool {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .text()
        .any(|t| !t.trim().is_empty())
}

/// Remove page chrome (navigation, header/footer, sidebars, scripts,
/// styles) from a region before Markdown conversion.
#[must_use]
pub fn strip_chrome(html: &str) -> String {
    let mut out = html.to_string();
    for re in [
        &*NAV_RE,
        &*HEADER_RE,
        &*FOOTER_RE,
        &*ASIDE_RE,
        &*SCRIPT_RE,
        &*STYLE_RE,
        &*NOSCRIPT_RE,
    ] {
        out = re.replace_all(&out, "").into_owned();
    }
    out
}

/// Deterministic structural HTML to Markdown conversion.
#[must_use]
pub fn to_markdown(html: &str) -> String {
    html_to_markdown(html, true).trim().to_string()
}

/// Collect fenced code spans from converted Markdown.
///
/// The fence info-string's first token becomes the language, when present.
#[must_use]
pub fn extract_code_blocks(markdown: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut language: Option<String> = None;
    let mut current: Option<Vec<&str>> = None;

    for line in markdown.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("```") {
            match current.take() {
                Some(lines) => {
                    blocks.push(CodeBlock {
                        language: language.take(),
                        code: lines.join("\n"),
                        title: None,
                    });
                },
                None => {
                    language = rest
                        .split_whitespace()
                        .next()
                        .map(ToString::to_string);
                    current = Some(Vec::new());
                },
            }
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }
    blocks
}

/// Title scan for already-Markdown documents: first line-level heading.
#[must_use]
pub fn first_heading_title(markdown: &str) -> Option<String> {
    markdown.lines().find_map(|line| {
        let trimmed = line.trim_start();
        trimmed
            .strip_prefix('#')
            .map(|rest| rest.trim_start_matches('#').trim().to_string())
            .filter(|title| !title.is_empty())
    })
}

/// Best-effort textual cleanup of converted Markdown.
///
/// Strips long navigational link lists, "On This Page" sections,
/// installation-command boilerplate, and trailing footer links. Patterns
/// are narrow and anchored; noise left in is acceptable, real content
/// stripped is not.
#[must_use]
pub fn strip_noise(markdown: &str) -> String {
    let mut out = markdown.to_string();
    for re in [
        &*ON_THIS_PAGE_RE,
        &*INSTALL_BOILERPLATE_RE,
        &*LINK_LIST_RE,
        &*FOOTER_LINKS_RE,
    ] {
        out = re.replace_all(&out, "").into_owned();
    }
    out.trim().to_string()
}

/// Run the full extraction pipeline over raw HTML.
///
/// Selects the content region, strips chrome, converts to Markdown, and
/// assembles a successful [`FetchResult`] with metadata and code blocks.
/// Returns `None` when no content region resolves to usable text; the
/// calling strategy decides whether that is a silent fallthrough or a
/// hard failure.
#[must_use]
pub fn extract_page(url: &str, html: &str, strategy: SourceStrategy) -> Option<FetchResult> {
    let region = select_content_region(html)?;
    let markdown = to_markdown(&strip_chrome(&region));
    let code_blocks = extract_code_blocks(&markdown);
    let mut metadata = extract_metadata(html);
    if metadata.title.is_none() {
        metadata.title = first_heading_title(&markdown);
    }

    FetchResult::ok(url, markdown, strategy).map(|result| {
        result
            .with_metadata(metadata)
            .with_raw_html(html.to_string())
            .with_code_blocks(code_blocks)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head>
  <title>Button - shadcn/ui</title>
  <meta property="og:title" content="Button">
  <meta name="description" content="Displays a button or a component that looks like a button.">
  <meta name="author" content="shadcn">
  <meta name="keywords" content="react, components, button">
  <meta property="og:image" content="https://ui.shadcn.com/og.jpg">
  <link rel="canonical" href="https://ui.shadcn.com/docs/components/button">
</head>
<body>
  <nav><a href="/docs">Docs</a><a href="/blocks">Blocks</a></nav>
  <main>
    <h1>Button</h1>
    <p>Displays a button.</p>
    <pre><code class="language-tsx">import { Button } from "@/components/ui/button"</code></pre>
  </main>
  <footer><a href="/about">About</a></footer>
</body>
</html>"#;

    #[test]
    fn metadata_prefers_og_title() {
        let meta = extract_metadata(PAGE);
        assert_eq!(meta.title.as_deref(), Some("Button"));
        assert_eq!(
            meta.description.as_deref(),
            Some("Displays a button or a component that looks like a button.")
        );
        assert_eq!(meta.author.as_deref(), Some("shadcn"));
        assert_eq!(meta.keywords, vec!["react", "components", "button"]);
        assert_eq!(meta.og_image.as_deref(), Some("https://ui.shadcn.com/og.jpg"));
        assert_eq!(
            meta.canonical_url.as_deref(),
            Some("https://ui.shadcn.com/docs/components/button")
        );
    }

    #[test]
    fn metadata_falls_back_to_title_tag_then_h1() {
        let html = "<html><head><title>Fallback Title</title></head><body><h1>Heading</h1></body></html>";
        assert_eq!(extract_metadata(html).title.as_deref(), Some("Fallback Title"));

        let html = "<html><head></head><body><h1>Heading Only</h1></body></html>";
        assert_eq!(extract_metadata(html).title.as_deref(), Some("Heading Only"));
    }

    #[test]
    fn content_region_prefers_main() {
        let region = select_content_region(PAGE).unwrap();
        assert!(region.contains("Displays a button."));
        assert!(!region.contains("About"));
    }

    #[test]
    fn content_region_falls_back_to_body() {
        let html = "<html><body><p>Loose content</p></body></html>";
        let region = select_content_region(html).unwrap();
        assert!(region.contains("Loose content"));
    }

    #[test]
    fn content_region_absent_for_empty_page() {
        let html = "<html><body><main>   </main></body></html>";
        assert!(select_content_region(html).is_none());
    }

    #[test]
    fn gallery_sections_are_concatenated() {
        let html = r"<html><body><main>
            <section><h2>Area Chart</h2></section>
            <section><h2>Bar Chart</h2></section>
        </main></body></html>";
        let region = select_content_region(html).unwrap();
        assert!(region.contains("Area Chart"));
        assert!(region.contains("Bar Chart"));
    }

    #[test]
    fn strip_chrome_removes_noise_tags() {
        let html = "<div><nav>menu</nav><script>var x=1;</script><p>keep</p><aside>side</aside></div>";
        let stripped = strip_chrome(html);
        assert!(stripped.contains("keep"));
        assert!(!stripped.contains("menu"));
        assert!(!stripped.contains("var x"));
        assert!(!stripped.contains("side"));
    }

    #[test]
    fn markdown_conversion_is_stable() {
        let html = "<h1>Button</h1><p>A <strong>clickable</strong> button.</p>";
        let first = to_markdown(html);
        let second = to_markdown(html);
        assert_eq!(first, second);
        assert!(first.contains("Button"));
    }

    #[test]
    fn code_blocks_capture_language() {
        let markdown = "# Title\n\n```tsx\nconst a = 1;\nconst b = 2;\n```\n\ntext\n\n```\nplain\n```\n";
        let blocks = extract_code_blocks(markdown);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("tsx"));
        assert_eq!(blocks[0].code, "const a = 1;\nconst b = 2;");
        assert!(blocks[1].language.is_none());
        assert_eq!(blocks[1].code, "plain");
    }

    #[test]
    fn unclosed_fence_is_dropped() {
        let markdown = "```tsx\nconst a = 1;";
        assert!(extract_code_blocks(markdown).is_empty());
    }

    #[test]
    fn first_heading_scans_past_prose() {
        let markdown = "intro line\n\n## Button\n\nBody";
        assert_eq!(first_heading_title(markdown).as_deref(), Some("Button"));
        assert!(first_heading_title("no headings here").is_none());
    }

    #[test]
    fn strip_noise_removes_on_this_page() {
        let markdown = "# Button\n\nBody text.\n\n## On This Page\n- [Usage](#usage)\n- [Props](#props)\n\n## Usage\n\nReal content.";
        let cleaned = strip_noise(markdown);
        assert!(!cleaned.contains("On This Page"));
        assert!(cleaned.contains("Real content."));
        assert!(cleaned.contains("Body text."));
    }

    #[test]
    fn strip_noise_removes_install_boilerplate() {
        let markdown = "# Button\n\n```bash\nnpx shadcn@latest add button\n```\n\nUsage text.";
        let cleaned = strip_noise(markdown);
        assert!(!cleaned.contains("npx shadcn"));
        assert!(cleaned.contains("Usage text."));
    }

    #[test]
    fn strip_noise_keeps_short_link_lists() {
        let markdown = "# Doc\n\n- [One](/a)\n- [Two](/b)\n\nBody.";
        let cleaned = strip_noise(markdown);
        assert!(cleaned.contains("[One](/a)"));
    }

    #[test]
    fn strip_noise_removes_long_link_lists() {
        let items: String = (0..12).map(|i| format!("- [Link {i}](/p{i})\n")).collect();
        let markdown = format!("# Doc\n\n{items}\nBody.");
        let cleaned = strip_noise(&markdown);
        assert!(!cleaned.contains("[Link 0](/p0)"));
        assert!(cleaned.contains("Body."));
    }

    #[test]
    fn extract_page_assembles_full_result() {
        let result =
            extract_page("https://ui.shadcn.com/docs/components/button", PAGE, SourceStrategy::Html)
                .unwrap();
        assert!(result.success);
        assert_eq!(result.metadata.title.as_deref(), Some("Button"));
        assert_eq!(result.source_strategy, SourceStrategy::Html);
        assert!(result.raw_html.is_some());
        let content = result.content.unwrap();
        assert!(content.contains("Button"));
        assert!(!content.contains("<nav>"));
    }

    #[test]
    fn extract_page_none_for_contentless_html() {
        let html = "<html><body><main><script>only()</script></main></body></html>";
        assert!(extract_page("https://x/docs/a", html, SourceStrategy::Html).is_none());
    }
}
