//! Turning reply text into what the user actually sees.
//!
//! Links are never clickable inline; they are surfaced as call-to-action
//! buttons instead, so both renderers reduce Markdown links to their label and
//! hide bare URLs.

use serde::Serialize;

use crate::patterns::{BARE_URL, LINK_OR_URL, MARKDOWN_LINK, PARTIAL_MARKDOWN_LINK};

/// Upper bound on collapse passes per line.
const MAX_PARTIAL_PASSES: usize = 10;

/// A piece of a fully rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    LineBreak,
}

/// Stable view of a message that is still being revealed.
///
/// Complete Markdown links show their label, bare URLs are hidden, and a link
/// whose URL is still streaming in collapses to its label so the half-typed
/// URL never flickers on screen.
pub fn sanitize_typing(partial: &str) -> String {
    partial
        .split('\n')
        .map(sanitize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn sanitize_line(line: &str) -> String {
    let labelled = MARKDOWN_LINK.replace_all(line, "${1}");
    let mut out = BARE_URL.replace_all(&labelled, "").into_owned();
    for _ in 0..MAX_PARTIAL_PASSES {
        if !PARTIAL_MARKDOWN_LINK.is_match(&out) {
            break;
        }
        out = PARTIAL_MARKDOWN_LINK.replace(&out, "${1}").into_owned();
    }
    out
}

/// Renders a fully revealed message into text runs and line breaks.
pub fn render_message(text: &str) -> Vec<Segment> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut segments = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let mut last = 0;
        for caps in LINK_OR_URL.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > last {
                segments.push(Segment::Text(line[last..whole.start()].to_string()));
            }
            // Bare URLs (group 3) are dropped.
            if let Some(label) = caps.get(1) {
                segments.push(Segment::Text(label.as_str().to_string()));
            }
            last = whole.end();
        }
        if last < line.len() {
            segments.push(Segment::Text(line[last..].to_string()));
        }
        if i + 1 < lines.len() {
            segments.push(Segment::LineBreak);
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Flattens rendered segments back into a string, one `\n` per line break.
    fn plain_text(segments: &[Segment]) -> String {
        segments
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.as_str(),
                Segment::LineBreak => "\n",
            })
            .collect()
    }

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn partial_link_collapses_to_label() {
        assert_eq!(sanitize_typing("Check [here](https://atdig"), "Check here");
        assert_eq!(sanitize_typing("Check [here]("), "Check here");
    }

    #[test]
    fn no_prefix_ever_shows_a_url() {
        let full = "Read the [Docs](https://example.com/x) first.\nThen visit https://example.com/y ok";
        let mut shown = Vec::new();
        for (idx, _) in full.char_indices().chain(std::iter::once((full.len(), ' '))) {
            let view = sanitize_typing(&full[..idx]);
            assert!(!BARE_URL.is_match(&view), "prefix {idx} leaked: {view:?}");
            assert!(!view.contains("http://") && !view.contains("https://"), "{view:?}");
            shown.push(view);
        }
        assert_eq!(shown.last().map(String::as_str), Some("Read the Docs first.\nThen visit  ok"));
    }

    #[test]
    fn sanitizing_works_per_line() {
        assert_eq!(
            sanitize_typing("[A](https://a.io/1) done\n[B](https://b.io"),
            "A done\nB"
        );
    }

    #[test]
    fn trailing_partial_link_swallows_rest_of_line() {
        assert_eq!(sanitize_typing("[x](a [y](b"), "x");
        assert_eq!(sanitize_typing("ok [a](https://a.io/1) [b](https:"), "ok a b");
    }

    #[test]
    fn renderer_keeps_labels_and_drops_bare_urls() {
        let segments = render_message(
            "Visit our [Pricing](https://atdigital.io/pricing) page or https://atdigital.io/pricing for details.",
        );
        assert_eq!(
            segments,
            vec![text("Visit our "), text("Pricing"), text(" page or "), text(" for details.")]
        );
    }

    #[test]
    fn renderer_breaks_between_lines_only() {
        assert_eq!(
            render_message("one\n\nthree"),
            vec![text("one"), Segment::LineBreak, Segment::LineBreak, text("three")]
        );
        assert_eq!(plain_text(&render_message("a\n[b](https://b.io)")), "a\nb");
    }

    #[test]
    fn empty_text_renders_nothing() {
        assert!(render_message("").is_empty());
    }
}
