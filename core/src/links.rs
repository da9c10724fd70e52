//! Link extraction: pulls call-to-action links out of free-form reply text.

use log::trace;
use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::models::Link;
use crate::patterns::LINK_OR_URL;

/// Characters that commonly trail a URL in prose and are never part of it.
pub const TRAILING_PUNCTUATION: &[char] = &[')', ']', '}', '>', '.', ',', '!', '?', ':', ';'];

pub fn strip_trailing_punctuation(url: &str) -> &str {
    url.trim().trim_end_matches(TRAILING_PUNCTUATION)
}

fn is_tracking_param(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.starts_with("utm_") || lower == "fbclid"
}

fn path_segment_count(url: &Url) -> usize {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).count())
        .unwrap_or(0)
}

/// Hostnames whose links may be surfaced, each also admitting its subdomains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AllowedDomains(Vec<String>);

impl AllowedDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        )
    }

    /// True when `host` equals an allowed domain or is a subdomain of one.
    pub fn permits(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.0.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}

impl From<Vec<String>> for AllowedDomains {
    fn from(domains: Vec<String>) -> Self {
        Self::new(domains)
    }
}

impl From<AllowedDomains> for Vec<String> {
    fn from(domains: AllowedDomains) -> Self {
        domains.0
    }
}

/// Decides which bare URLs ride along with Markdown links.
///
/// When a reply already carries Markdown links, plain mentions of a site are
/// noise; only bare URLs shaped like deep task links are promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PromotionPolicy {
    /// Promote any URL with a non-empty query string.
    pub promote_with_query: bool,
    /// Promote URLs whose path has at least this many segments.
    pub min_path_segments: usize,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        Self { promote_with_query: true, min_path_segments: 2 }
    }
}

impl PromotionPolicy {
    pub fn promotes(&self, url: &Url) -> bool {
        let has_query = url.query().is_some_and(|q| !q.is_empty());
        (self.promote_with_query && has_query) || path_segment_count(url) >= self.min_path_segments
    }
}

/// A URL reduced to the form used for de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalUrl {
    /// `host + path + ?query`, lower-cased host without `www.`.
    pub key: String,
    /// Lower-cased host as written, `www.` included; checked against the
    /// allowed domains.
    pub host: String,
    /// The URL to surface: tracking parameters removed, otherwise as written.
    pub url: String,
}

/// Canonicalizes `raw`, or returns `None` if it does not parse as a URL with a host.
pub fn canonicalize(raw: &str) -> Option<CanonicalUrl> {
    let cleaned = strip_trailing_punctuation(raw);
    let mut parsed = Url::parse(cleaned).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    let key_host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    let mut removed_tracking = false;
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| {
            let tracking = is_tracking_param(name);
            removed_tracking |= tracking;
            !tracking
        })
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let query = (!kept.is_empty())
        .then(|| form_urlencoded::Serializer::new(String::new()).extend_pairs(&kept).finish());

    let path = parsed.path();
    let path = if path.len() > 1 { path.strip_suffix('/').unwrap_or(path) } else { path };

    let key = match &query {
        Some(q) => format!("{key_host}{path}?{q}"),
        None => format!("{key_host}{path}"),
    };

    let url = if removed_tracking {
        parsed.set_query(query.as_deref());
        parsed.to_string()
    } else {
        cleaned.to_string()
    };

    Some(CanonicalUrl { key, host, url })
}

/// Extracts de-duplicated, domain-restricted links from reply text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkExtractor {
    domains: AllowedDomains,
    promotion: PromotionPolicy,
}

impl LinkExtractor {
    pub fn new(domains: AllowedDomains, promotion: PromotionPolicy) -> Self {
        Self { domains, promotion }
    }

    /// Returns the links in `text` in order of first appearance.
    ///
    /// Malformed URLs and URLs on hosts outside the allowed set are skipped
    /// silently. Duplicates (by canonical key) keep the first label seen.
    pub fn extract(&self, text: &str) -> Vec<Link> {
        let mut markdown = Vec::new();
        let mut bare = Vec::new();
        for caps in LINK_OR_URL.captures_iter(text) {
            if let (Some(label), Some(url)) = (caps.get(1), caps.get(2)) {
                markdown.push(Link::new(url.as_str(), label.as_str().trim()));
            } else if let Some(url) = caps.get(3) {
                bare.push(Link::new(url.as_str(), url.as_str()));
            }
        }

        let candidates = if markdown.is_empty() {
            bare
        } else {
            markdown.extend(bare.into_iter().filter(|link| self.promotes_bare(&link.url)));
            markdown
        };

        let mut seen = std::collections::HashSet::new();
        let mut links = Vec::new();
        for candidate in candidates {
            let Some(canonical) = canonicalize(&candidate.url) else {
                trace!("skipping unparseable link {}", candidate.url);
                continue;
            };
            if !self.domains.permits(&canonical.host) {
                trace!("skipping link on disallowed host {}", canonical.host);
                continue;
            }
            if seen.insert(canonical.key) {
                links.push(Link { url: canonical.url, label: candidate.label });
            }
        }
        links
    }

    fn promotes_bare(&self, raw: &str) -> bool {
        match Url::parse(strip_trailing_punctuation(raw)) {
            Ok(url) => {
                url.host_str().is_some_and(|host| self.domains.permits(host))
                    && self.promotion.promotes(&url)
            }
            Err(_) => false,
        }
    }
}
