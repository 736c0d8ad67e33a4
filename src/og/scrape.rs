use super::model::{OgImage, OgResult};
use crate::config::OgConfig;
use crate::error::SiteError;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::Client;
use scraper::{Html, Selector};

pub struct OgFetcher {
    client: Client,
}

impl OgFetcher {
    pub fn new(config: &OgConfig) -> Result<Self, SiteError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, SiteError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::HttpStatus(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    /// Fetch `url` and read its Open Graph and Twitter card tags.
    pub async fn scrape(&self, url: &str) -> Result<OgResult, SiteError> {
        let body = self.fetch(url).await?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(extract_og(&Html::parse_document(&body), url))
    }
}

fn decode(text: &str) -> String {
    // some CMSes double-encode attribute values
    decode_html_entities(&decode_html_entities(text.trim())).into_owned()
}

/// Read Open Graph and Twitter card tags from a parsed page. The first
/// occurrence of a scalar tag wins; each `og:image` starts a new image that
/// following `og:image:*` attributes describe.
pub fn extract_og(document: &Html, request_url: &str) -> OgResult {
    let mut result = OgResult {
        request_url: Some(request_url.to_string()),
        ..Default::default()
    };

    let meta_selector = Selector::parse("meta").unwrap();
    for element in document.select(&meta_selector) {
        let meta = element.value();

        if let Some(charset) = meta.attr("charset") {
            set_once(&mut result.charset, charset.trim().to_string());
            continue;
        }

        let Some(tag) = meta.attr("property").or_else(|| meta.attr("name")) else {
            continue;
        };
        let Some(content) = meta.attr("content").map(decode) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        apply_tag(&mut result, &tag.trim().to_lowercase(), content);
    }

    let icon_selector = Selector::parse("link[rel][href]").unwrap();
    result.favicon = document
        .select(&icon_selector)
        .find(|link| {
            link.value().attr("rel").is_some_and(|rel| {
                rel.split_whitespace()
                    .any(|part| part.eq_ignore_ascii_case("icon"))
            })
        })
        .and_then(|link| link.value().attr("href"))
        .map(|href| href.trim().to_string());

    result
}

fn set_once(field: &mut Option<String>, value: String) {
    if field.is_none() {
        *field = Some(value);
    }
}

fn apply_tag(result: &mut OgResult, tag: &str, content: String) {
    match tag {
        "og:title" => set_once(&mut result.og_title, content),
        "og:description" => set_once(&mut result.og_description, content),
        "og:url" => set_once(&mut result.og_url, content),
        "og:site_name" => set_once(&mut result.og_site_name, content),
        "og:type" => set_once(&mut result.og_type, content),
        "og:locale" => set_once(&mut result.og_locale, content),
        "og:image" | "og:image:url" => start_image(&mut result.og_image, content),
        "og:image:secure_url" if result.og_image.is_empty() => {
            start_image(&mut result.og_image, content)
        }
        "og:image:width" => describe_image(&mut result.og_image, |image| &mut image.width, content),
        "og:image:height" => {
            describe_image(&mut result.og_image, |image| &mut image.height, content)
        }
        "og:image:type" => {
            describe_image(&mut result.og_image, |image| &mut image.mime_type, content)
        }
        "og:image:alt" => describe_image(&mut result.og_image, |image| &mut image.alt, content),
        "twitter:card" => set_once(&mut result.twitter_card, content),
        "twitter:title" => set_once(&mut result.twitter_title, content),
        "twitter:description" => set_once(&mut result.twitter_description, content),
        "twitter:site" => set_once(&mut result.twitter_site, content),
        "twitter:creator" => set_once(&mut result.twitter_creator, content),
        "twitter:image" | "twitter:image:src" => start_image(&mut result.twitter_image, content),
        "twitter:image:alt" => {
            describe_image(&mut result.twitter_image, |image| &mut image.alt, content)
        }
        _ => {}
    }
}

fn start_image(images: &mut Vec<OgImage>, url: String) {
    images.push(OgImage {
        url,
        ..Default::default()
    });
}

/// Attach an attribute to the most recent image; attributes that appear
/// before any image are dropped.
fn describe_image(
    images: &mut [OgImage],
    field: impl FnOnce(&mut OgImage) -> &mut Option<String>,
    value: String,
) {
    if let Some(image) = images.last_mut() {
        set_once(field(image), value);
    }
}
