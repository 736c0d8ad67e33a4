use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OgImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Open Graph and Twitter card metadata scraped from one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OgResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub og_image: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub twitter_image: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
}

impl OgResult {
    /// Non-empty value for a tag name such as `og:title`. Image tags resolve
    /// to the url of the first image.
    pub fn tag_value(&self, tag: &str) -> Option<&str> {
        let value = match tag {
            "og:title" => self.og_title.as_deref(),
            "og:description" => self.og_description.as_deref(),
            "og:image" => self.og_image.first().map(|image| image.url.as_str()),
            "og:url" => self.og_url.as_deref(),
            "og:site_name" => self.og_site_name.as_deref(),
            "og:type" => self.og_type.as_deref(),
            "og:locale" => self.og_locale.as_deref(),
            "twitter:card" => self.twitter_card.as_deref(),
            "twitter:title" => self.twitter_title.as_deref(),
            "twitter:description" => self.twitter_description.as_deref(),
            "twitter:image" => self.twitter_image.first().map(|image| image.url.as_str()),
            "twitter:site" => self.twitter_site.as_deref(),
            "twitter:creator" => self.twitter_creator.as_deref(),
            _ => None,
        };
        value.filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub tag: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub message: String,
}

impl ValidationItem {
    pub fn new(tag: &str, label: &str, message: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            label: label.to_string(),
            value: None,
            message: message.into(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub score: u32,
    pub passed: Vec<ValidationItem>,
    pub warnings: Vec<ValidationItem>,
    pub errors: Vec<ValidationItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidUrl,
    FetchError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub code: ErrorCode,
    pub message: String,
}

/// Outcome of testing one URL: the scraped tags and their score, or the
/// reason nothing could be scraped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OgAnalysisResult {
    pub success: bool,
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<OgResult>,
    pub validation: ValidationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<AnalysisError>,
}
