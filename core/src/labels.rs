//! Call-to-action labels for extracted links.

use url::Url;

use crate::links::TRAILING_PUNCTUATION;
use crate::models::Link;
use crate::patterns::{
    FILLER_WORDS, LEADING_ARTICLE, REPEATED_WHITESPACE, SEPARATOR_RUN, URL_LIKE, WHITESPACE_RUN,
};

/// Used when the link's URL cannot be parsed or decoded.
pub const FALLBACK_LABEL: &str = "Open Link";

/// Builds the button text for `link`, e.g. `"Open Pricing"`.
///
/// The Markdown label wins when it reads like words; otherwise the label is
/// derived from the last path segment, or the site name for a homepage link.
/// A segment that cleans down to nothing (`/page`) also uses the site name,
/// so a button never reads just `"Open "`.
pub fn make_label(link: &Link) -> String {
    let cleaned = clean_text(&link.label);
    if !cleaned.is_empty() && cleaned != link.url && !URL_LIKE.is_match(&cleaned) {
        return format!("Open {}", title_case(&cleaned));
    }
    label_from_url(&link.url).unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

fn label_from_url(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let site = || {
        let first = host.split('.').next().filter(|s| !s.is_empty()).unwrap_or(host);
        format!("Open {}", capitalize_first(first))
    };

    let last_segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last());
    let Some(segment) = last_segment else {
        return Some(site());
    };

    let decoded = urlencoding::decode(segment).ok()?;
    let spaced = SEPARATOR_RUN.replace_all(&decoded, " ");
    let words = clean_text(&WHITESPACE_RUN.replace_all(&spaced, " "));
    if words.is_empty() {
        return Some(site());
    }
    Some(format!("Open {}", title_case(&words)))
}

/// Drops trailing punctuation, a leading article and filler words like "page".
fn clean_text(text: &str) -> String {
    let text = text.trim_end_matches(TRAILING_PUNCTUATION);
    let text = LEADING_ARTICLE.replace(text, "");
    let text = FILLER_WORDS.replace_all(&text, "");
    let text = REPEATED_WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Upper-cases the first character of every word, leaving the rest untouched.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }
    out
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(url: &str, label: &str) -> String {
        make_label(&Link::new(url, label))
    }

    #[test]
    fn markdown_label_is_title_cased() {
        assert_eq!(label("https://atdigital.io/pricing", "Pricing"), "Open Pricing");
        assert_eq!(label("https://atdigital.io/x", "digital strategy"), "Open Digital Strategy");
    }

    #[test]
    fn articles_and_filler_words_are_removed() {
        assert_eq!(label("https://atdigital.io/contact", "the contact page."), "Open Contact");
        assert_eq!(label("https://atdigital.io/", "An About Us webpage!"), "Open About Us");
    }

    #[test]
    fn url_like_labels_fall_back_to_the_path() {
        assert_eq!(
            label("https://atdigital.io/services/web-design__and--seo", "atdigital.io/services"),
            "Open Web Design And Seo"
        );
        assert_eq!(
            label("https://atdigital.io/contact", "https://atdigital.io/contact."),
            "Open Contact"
        );
    }

    #[test]
    fn homepage_links_use_the_site_name() {
        assert_eq!(label("https://www.atdigital.io/", "https://www.atdigital.io/"), "Open Atdigital");
    }

    #[test]
    fn filler_only_segment_uses_the_site_name_not_an_empty_label() {
        assert_eq!(label("https://atdigital.io/page", "https://atdigital.io/page"), "Open Atdigital");
        assert_eq!(label("https://atdigital.io/services/site", ""), "Open Atdigital");
    }

    #[test]
    fn path_segments_are_percent_decoded() {
        assert_eq!(
            label("https://atdigital.io/work/case%20studies", "https://atdigital.io/work/case%20studies"),
            "Open Case Studies"
        );
    }

    #[test]
    fn unparseable_links_get_the_fallback() {
        assert_eq!(label("not a url", ""), FALLBACK_LABEL);
        assert_eq!(label("https://atdigital.io/%FF", ""), FALLBACK_LABEL);
    }

    #[test]
    fn title_case_only_touches_word_starts() {
        assert_eq!(title_case("seo and ppc-ads"), "Seo And Ppc-Ads");
        assert_eq!(title_case("iPhone apps"), "IPhone Apps");
    }
}
