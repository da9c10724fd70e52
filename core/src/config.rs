use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::links::{AllowedDomains, LinkExtractor, PromotionPolicy};
use crate::typewriter::{DEFAULT_TYPING_INTERVAL, MIN_TYPING_INTERVAL};

const DEFAULT_BRAND: &str = "AT Digital";
const DEFAULT_PROXY_ENDPOINT: &str = "/api/chat";

/// Everything the embedding page can configure. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub webhook: WebhookConfig,
    /// Milliseconds per revealed character.
    pub typing_speed_ms: u64,
    pub allowed_link_domains: AllowedDomains,
    pub link_promotion: PromotionPolicy,
    pub branding: Branding,
    pub style: Style,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            webhook: WebhookConfig::default(),
            typing_speed_ms: DEFAULT_TYPING_INTERVAL.as_millis() as u64,
            allowed_link_domains: AllowedDomains::new(["atdigital.io"]),
            link_promotion: PromotionPolicy::default(),
            branding: Branding::default(),
            style: Style::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_speed_ms).max(MIN_TYPING_INTERVAL)
    }

    pub fn link_extractor(&self) -> LinkExtractor {
        LinkExtractor::new(self.allowed_link_domains.clone(), self.link_promotion)
    }

    pub fn brand_name(&self) -> &str {
        let name = self.branding.name.trim();
        if name.is_empty() { DEFAULT_BRAND } else { name }
    }

    pub fn welcome_message(&self) -> String {
        format!("Hi there! Welcome to {}.", self.brand_name())
    }

    /// Hero title shown above the transcript.
    pub fn welcome_text(&self) -> &str {
        let text = self.branding.welcome_text.trim();
        if text.is_empty() { "How can we help?" } else { text }
    }

    pub fn response_time_text(&self) -> &str {
        let text = self.branding.response_time_text.trim();
        if text.is_empty() { "Typically replies instantly" } else { text }
    }

    pub fn hero_subtext(&self) -> String {
        format!("Ask anything about {}'s services, strategy, or support.", self.brand_name())
    }

    pub fn input_placeholder(&self) -> String {
        format!("Ask {} anything...", self.brand_name())
    }

    /// Canned prompts offered before the user has written anything.
    pub fn quick_replies(&self) -> Vec<QuickReply> {
        let brand = self.brand_name();
        [
            format!("Tell me about {brand}'s services"),
            "I need help crafting my digital strategy".to_string(),
            format!("Connect me with an expert at {brand}"),
        ]
        .into_iter()
        .map(QuickReply::same)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookConfig {
    /// Endpoint the widget posts to (the proxy, not the webhook itself).
    pub url: String,
    /// Forwarded as `route` so the webhook can pick a flow.
    pub route: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self { url: DEFAULT_PROXY_ENDPOINT.to_string(), route: String::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub logo: String,
    pub name: String,
    pub welcome_text: String,
    pub response_time_text: String,
    pub powered_by: PoweredBy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoweredBy {
    pub text: String,
    pub link: String,
}

impl Default for PoweredBy {
    fn default() -> Self {
        Self {
            text: "Powered by AT Digital".to_string(),
            link: "https://atdigital.io/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub primary_color: String,
    pub secondary_color: String,
    pub position: Position,
    pub background_color: String,
    pub font_color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            primary_color: "#4C46F7".to_string(),
            secondary_color: "#7A5CFF".to_string(),
            position: Position::Right,
            background_color: "#0B1025".to_string(),
            font_color: "#E4E7FF".to_string(),
        }
    }
}

/// A suggested prompt: what the button shows and what gets sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    pub label: String,
    pub send: String,
}

impl QuickReply {
    pub fn same(text: String) -> Self {
        Self { send: text.clone(), label: text }
    }
}
