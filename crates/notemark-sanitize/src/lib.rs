//! Allow-list HTML sanitization for rendered notemark output.
//!
//! The renderer escapes the text and attributes it writes, but documents
//! may come from untrusted authors. This crate provides the sanitization
//! pass callers compose after rendering: an [`ammonia`] policy that allows
//! exactly the element vocabulary the HTML backend produces and strips
//! everything else (scripts, event handlers, unknown tags, dangerous URL
//! schemes).
//!
//! ```
//! let dirty = r#"<p>fine</p><script>alert(1)</script>"#;
//! assert_eq!(notemark_sanitize::clean(dirty), "<p>fine</p>");
//! ```

use std::borrow::Cow;
use std::collections::HashSet;

use ammonia::Builder;

/// Sanitize rendered HTML with the notemark output policy.
#[must_use]
pub fn clean(html: &str) -> String {
    builder().clean(html).to_string()
}

/// The sanitizer policy, for callers that clean many documents and want to
/// reuse the builder.
///
/// Allowed vocabulary, matching the HTML backend:
/// - text structure: `p`, `br`, `hr`, `h1`-`h3` (with `id`), `blockquote`
/// - inline marks: `strong`, `em`, `del`, `mark`, `sup`, `sub`, `code`
/// - code blocks: `pre` plus the classed wrapper `div`s
/// - callouts: classed `div`s with inline `svg`/`path` icons
/// - lists: `ul`, `ol` (with `start`), `li`, checkbox `input`s
/// - tables: `table`/`thead`/`tbody`/`tr`/`th`/`td`, `style` limited to
///   the three `text-align` values the renderer emits
/// - media: `figure`, `figcaption`, `img`, anchors with `target`
#[must_use]
pub fn builder() -> Builder<'static> {
    let mut builder = Builder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a",
        "blockquote",
        "br",
        "code",
        "del",
        "div",
        "em",
        "figcaption",
        "figure",
        "h1",
        "h2",
        "h3",
        "hr",
        "img",
        "input",
        "li",
        "mark",
        "ol",
        "p",
        "path",
        "pre",
        "strong",
        "sub",
        "sup",
        "svg",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "ul",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class"]);
    builder.generic_attributes(generic);

    builder.add_tag_attributes("a", &["target"]);
    builder.add_tag_attributes("h1", &["id"]);
    builder.add_tag_attributes("h2", &["id"]);
    builder.add_tag_attributes("h3", &["id"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    builder.add_tag_attributes("ol", &["start"]);
    builder.add_tag_attributes("path", &["d"]);
    builder.add_tag_attributes("svg", &["viewBox", "width", "height", "aria-hidden"]);
    builder.add_tag_attributes("td", &["style"]);
    builder.add_tag_attributes("th", &["style"]);

    builder.url_schemes(HashSet::from(["http", "https", "mailto", "tel"]));

    // The only styles the renderer writes are table cell alignments;
    // anything else smuggled into a style attribute is dropped.
    builder.attribute_filter(|element, attribute, value| {
        if attribute == "style" {
            let allowed = matches!(element, "td" | "th")
                && matches!(
                    value,
                    "text-align:left" | "text-align:center" | "text-align:right"
                );
            allowed.then_some(Cow::Borrowed(value))
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use notemark_renderer::{HtmlBackend, MarkdownRenderer};

    fn render_clean(source: &str) -> String {
        let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
        clean(&renderer.render_source(source).html)
    }

    #[test]
    fn test_scripts_are_stripped() {
        assert_eq!(clean("<p>fine</p><script>alert(1)</script>"), "<p>fine</p>");
    }

    #[test]
    fn test_event_handlers_are_stripped() {
        let html = clean(r#"<img src="https://example.com/x.png" onerror="alert(1)">"#);
        assert!(!html.contains("onerror"));
        assert!(html.contains("<img"));
    }

    #[test]
    fn test_javascript_urls_are_stripped() {
        let html = clean(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_unknown_tags_are_stripped() {
        let html = clean("<iframe src=\"https://example.com\"></iframe><p>kept</p>");
        assert!(!html.contains("iframe"));
        assert!(html.contains("<p>kept</p>"));
    }

    #[test]
    fn test_callout_output_survives() {
        let html = render_clean("> [!WARNING] careful");
        assert!(html.contains(r#"class="callout callout-warning""#), "{html}");
        assert!(html.contains("<svg"), "{html}");
        assert!(html.contains("<p>careful</p>"), "{html}");
    }

    #[test]
    fn test_task_list_output_survives() {
        let html = render_clean("- [x] done");
        assert!(html.contains("<input"), "{html}");
        assert!(html.contains(r#"type="checkbox""#), "{html}");
    }

    #[test]
    fn test_link_output_survives_with_rel() {
        let html = render_clean("[docs](https://example.com)");
        assert!(html.contains(r#"target="_blank""#), "{html}");
        assert!(html.contains("noopener"), "{html}");
    }

    #[test]
    fn test_table_alignment_style_survives() {
        let html = render_clean("| A | B |\n| --- | :-: |\n| 1 | 2 |");
        assert!(html.contains("text-align:center"), "{html}");
        assert!(html.contains("<thead>"), "{html}");
    }

    #[test]
    fn test_foreign_style_values_are_dropped() {
        let html = clean(r#"<td style="position:fixed;top:0">x</td>"#);
        assert!(!html.contains("position"), "{html}");
    }

    #[test]
    fn test_style_outside_table_cells_is_dropped() {
        let html = clean(r#"<div style="text-align:center" class="callout">x</div>"#);
        assert!(!html.contains("style"), "{html}");
        assert!(html.contains(r#"class="callout""#), "{html}");
    }

    #[test]
    fn test_figure_and_marks_survive() {
        let html = render_clean("![cat](https://example.com/cat.png)\n\n==hi== ~~x~~ a^2^ b~3~");
        assert!(html.contains("<figure"), "{html}");
        assert!(html.contains("<figcaption>cat</figcaption>"), "{html}");
        assert!(html.contains("<mark>hi</mark>"), "{html}");
        assert!(html.contains("<del>x</del>"), "{html}");
        assert!(html.contains("<sup>2</sup>"), "{html}");
        assert!(html.contains("<sub>3</sub>"), "{html}");
    }

    #[test]
    fn test_code_block_wrapper_survives() {
        let html = render_clean("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"class="code-block""#), "{html}");
        assert!(html.contains(r#"class="language-rust""#), "{html}");
    }

    #[test]
    fn test_heading_ids_survive() {
        let html = render_clean("## Section");
        assert!(html.contains(r#"<h2 id="section">"#), "{html}");
    }
}
