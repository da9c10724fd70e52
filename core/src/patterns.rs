//! Every regular expression the widget uses.
//!
//! Markdown links, bare URLs and partially typed links are recognised here and
//! nowhere else; the rest of the crate works on the matches.

use regex::Regex;
use std::sync::LazyLock;

/// A complete Markdown link: `[label](http(s)://...)`.
/// Group 1 is the label, group 2 the URL.
pub(crate) static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("markdown link pattern is valid")
});

/// A bare `http(s)://` URL running up to the next whitespace. A lone scheme
/// prefix counts, so a URL that has only just started streaming is caught.
pub(crate) static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*").expect("bare url pattern is valid"));

/// Either of the above, scanned left to right so a URL inside Markdown syntax is
/// never reported a second time as bare. Groups 1/2 are set for Markdown,
/// group 3 for a bare URL.
pub(crate) static LINK_OR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)|(https?://\S*)")
        .expect("link-or-url pattern is valid")
});

/// An unterminated Markdown link at the end of a line: `[label](` optionally
/// followed by part of a URL.
pub(crate) static PARTIAL_MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\([^)]*$").expect("partial markdown link pattern is valid")
});

pub(crate) static LEADING_ARTICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(the|a|an)\s+").expect("leading article pattern is valid")
});

pub(crate) static FILLER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(page|webpage|site)\b").expect("filler word pattern is valid")
});

pub(crate) static REPEATED_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("repeated whitespace pattern is valid"));

pub(crate) static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace run pattern is valid"));

pub(crate) static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("separator run pattern is valid"));

/// Text that reads like a URL, a path, or a file name (`guide.pdf`).
pub(crate) static URL_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)https?:|://|/|\.[a-z]{2,}$").expect("url-like pattern is valid")
});
