//! Open Graph tag tester: fetch a page, read its social preview tags and
//! score them.

mod model;
mod scrape;
mod validate;

pub use model::{
    AnalysisError, ErrorCode, OgAnalysisResult, OgImage, OgResult, ValidationItem,
    ValidationResult,
};
pub use scrape::{extract_og, OgFetcher};
pub use validate::validate_og_tags;

use crate::config::OgConfig;
use crate::error::SiteError;
use chrono::Utc;
use log::{info, warn};
use reqwest::Url;

const MISSING_URL: &str = "Please provide a valid URL";
const MALFORMED_URL: &str = "Please enter a valid URL starting with http:// or https://";
const TIMEOUT: &str = "The website took too long to respond. Try again later.";
const NOT_FOUND: &str = "Page not found (404). Check the URL is correct.";
const BLOCKED: &str = "Access denied. The website may be blocking automated requests.";
const UNREACHABLE: &str = "Failed to fetch the URL. The website may be down or blocking requests.";

/// Parse `url`, accepting only http and https.
pub fn check_url(url: &str) -> Result<Url, SiteError> {
    let parsed = Url::parse(url.trim()).map_err(|err| SiteError::InvalidUrl(err.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(SiteError::InvalidUrl(format!("unsupported scheme '{}'", scheme))),
    }
}

/// User-facing explanation of why a page could not be fetched.
pub fn fetch_error_message(err: &SiteError) -> &'static str {
    match err {
        SiteError::Fetch(err) if err.is_timeout() => TIMEOUT,
        SiteError::HttpStatus(404) => NOT_FOUND,
        SiteError::HttpStatus(403) => BLOCKED,
        err => {
            let text = err.to_string().to_lowercase();
            if text.contains("timeout") || text.contains("timed out") {
                TIMEOUT
            } else if text.contains("404") {
                NOT_FOUND
            } else if text.contains("403") || text.contains("blocked") {
                BLOCKED
            } else {
                UNREACHABLE
            }
        }
    }
}

fn failure(url: &str, code: ErrorCode, message: &str) -> OgAnalysisResult {
    OgAnalysisResult {
        success: false,
        url: url.to_string(),
        fetched_at: Utc::now(),
        result: None,
        validation: ValidationResult::default(),
        error: Some(AnalysisError {
            code,
            message: message.to_string(),
        }),
    }
}

/// Fetch `url` and score its Open Graph tags. Never fails: problems are
/// reported through the result's `error`. The result echoes `url` exactly as
/// given; surrounding whitespace is only ignored for checking and fetching.
pub async fn analyze(url: &str, config: &OgConfig) -> OgAnalysisResult {
    let target = url.trim();
    if target.is_empty() {
        return failure(url, ErrorCode::InvalidUrl, MISSING_URL);
    }
    if let Err(err) = check_url(target) {
        warn!("Rejected OG test URL {}: {}", target, err);
        return failure(url, ErrorCode::InvalidUrl, MALFORMED_URL);
    }

    let scraped = match OgFetcher::new(config) {
        Ok(fetcher) => fetcher.scrape(target).await,
        Err(err) => Err(err),
    };

    match scraped {
        Ok(result) => {
            let validation = validate_og_tags(&result);
            info!("OG test for {} scored {}", target, validation.score);
            OgAnalysisResult {
                success: true,
                url: url.to_string(),
                fetched_at: Utc::now(),
                result: Some(result),
                validation,
                error: None,
            }
        }
        Err(err) => {
            warn!("OG test fetch failed for {}: {}", target, err);
            failure(url, ErrorCode::FetchError, fetch_error_message(&err))
        }
    }
}
