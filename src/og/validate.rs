use super::model::{OgImage, OgResult, ValidationItem, ValidationResult};

const ERROR_PENALTY: i64 = 20;
const WARNING_PENALTY: i64 = 5;
const MAX_VALUE_LEN: usize = 60;

struct TagRule {
    tag: &'static str,
    label: &'static str,
    /// OG tag that stands in when a Twitter tag is missing.
    fallback: Option<&'static str>,
}

const fn rule(tag: &'static str, label: &'static str) -> TagRule {
    TagRule {
        tag,
        label,
        fallback: None,
    }
}

const REQUIRED_TAGS: &[TagRule] = &[
    rule("og:title", "Title"),
    rule("og:description", "Description"),
    rule("og:image", "Image"),
    rule("og:url", "URL"),
];

const RECOMMENDED_TAGS: &[TagRule] = &[
    rule("og:type", "Type"),
    rule("og:site_name", "Site Name"),
    rule("og:locale", "Locale"),
];

const TWITTER_TAGS: &[TagRule] = &[
    rule("twitter:card", "Twitter Card"),
    TagRule {
        tag: "twitter:title",
        label: "Twitter Title",
        fallback: Some("og:title"),
    },
    TagRule {
        tag: "twitter:description",
        label: "Twitter Description",
        fallback: Some("og:description"),
    },
];

/// Length thresholds in characters: over `error` fails, over `warning` warns,
/// at least `optimal` passes; anything shorter is not reported.
struct LengthRule {
    tag: &'static str,
    label: &'static str,
    error: usize,
    warning: usize,
    optimal: usize,
    error_message: &'static str,
    warning_message: &'static str,
}

const TITLE_LENGTH: LengthRule = LengthRule {
    tag: "og:title",
    label: "Title Length",
    error: 95,
    warning: 70,
    optimal: 30,
    error_message: "Title is too long (>95 chars) - will be truncated",
    warning_message: "Title may be truncated on some platforms (>70 chars)",
};

const DESCRIPTION_LENGTH: LengthRule = LengthRule {
    tag: "og:description",
    label: "Description Length",
    error: 200,
    warning: 160,
    optimal: 50,
    error_message: "Description is too long (>200 chars)",
    warning_message: "Description may be truncated (>160 chars)",
};

#[derive(Default)]
struct Report {
    passed: Vec<ValidationItem>,
    warnings: Vec<ValidationItem>,
    errors: Vec<ValidationItem>,
}

impl Report {
    fn present(&mut self, rule: &TagRule, value: &str) {
        self.passed.push(
            ValidationItem::new(rule.tag, rule.label, format!("{} is present", rule.label))
                .with_value(truncate_value(value, MAX_VALUE_LEN)),
        );
    }

    fn into_result(self) -> ValidationResult {
        let penalty = self.errors.len() as i64 * ERROR_PENALTY
            + self.warnings.len() as i64 * WARNING_PENALTY;
        ValidationResult {
            score: (100 - penalty).max(0) as u32,
            passed: self.passed,
            warnings: self.warnings,
            errors: self.errors,
        }
    }
}

/// Score a page's Open Graph tags out of 100, listing what passed and what
/// should be fixed.
pub fn validate_og_tags(result: &OgResult) -> ValidationResult {
    let mut report = Report::default();

    for rule in REQUIRED_TAGS {
        match result.tag_value(rule.tag) {
            Some(value) => report.present(rule, value),
            None => report.errors.push(ValidationItem::new(
                rule.tag,
                rule.label,
                format!("Missing {} - required for social sharing", rule.tag),
            )),
        }
    }

    for rule in RECOMMENDED_TAGS {
        match result.tag_value(rule.tag) {
            Some(value) => report.present(rule, value),
            None => report.warnings.push(ValidationItem::new(
                rule.tag,
                rule.label,
                format!("Missing {} - recommended for better previews", rule.tag),
            )),
        }
    }

    for rule in TWITTER_TAGS {
        match result.tag_value(rule.tag) {
            Some(value) => report.present(rule, value),
            None => {
                let has_fallback = rule
                    .fallback
                    .and_then(|tag| result.tag_value(tag))
                    .is_some();
                if !has_fallback {
                    report.warnings.push(ValidationItem::new(
                        rule.tag,
                        rule.label,
                        format!("Missing {} with no OG fallback", rule.tag),
                    ));
                }
            }
        }
    }

    let title = result
        .tag_value("og:title")
        .or_else(|| result.tag_value("twitter:title"));
    if let Some(title) = title {
        check_length(&mut report, &TITLE_LENGTH, title, "Title length is optimal");
    }

    let description = result
        .tag_value("og:description")
        .or_else(|| result.tag_value("twitter:description"));
    if let Some(description) = description {
        check_length(
            &mut report,
            &DESCRIPTION_LENGTH,
            description,
            "Description length is optimal",
        );
    }

    let images = if result.og_image.is_empty() {
        &result.twitter_image
    } else {
        &result.og_image
    };
    if let Some(image) = images.first() {
        check_image(&mut report, image);
    }

    report.into_result()
}

fn check_length(report: &mut Report, rule: &LengthRule, text: &str, optimal_message: &str) {
    let len = text.chars().count();
    let item = |message: &str| {
        ValidationItem::new(rule.tag, rule.label, message).with_value(format!("{} chars", len))
    };

    if len > rule.error {
        report.errors.push(item(rule.error_message));
    } else if len > rule.warning {
        report.warnings.push(item(rule.warning_message));
    } else if len >= rule.optimal {
        report.passed.push(item(optimal_message));
    }
}

fn check_image(report: &mut Report, image: &OgImage) {
    if !image.url.is_empty() && !image.url.starts_with("https://") {
        report.warnings.push(
            ValidationItem::new("og:image", "Image HTTPS", "Image should use HTTPS for security")
                .with_value(image.url.chars().take(50).collect::<String>()),
        );
    }

    let width = image.width.as_deref().filter(|w| !w.is_empty());
    let height = image.height.as_deref().filter(|h| !h.is_empty());
    match (width, height) {
        (Some(width), Some(height)) => {
            let dimensions = match (parse_int(width), parse_int(height)) {
                (Some(w), Some(h)) => Some((w, h)),
                _ => None,
            };
            let value = match dimensions {
                Some((w, h)) => format!("{}x{}", w, h),
                None => format!("{}x{}", width, height),
            };
            let item = |message: &str| {
                ValidationItem::new("og:image", "Image Dimensions", message).with_value(value.clone())
            };
            if matches!(dimensions, Some((w, h)) if w >= 1200 && h >= 630) {
                report
                    .passed
                    .push(item("Image dimensions are optimal for sharing"));
            } else {
                report
                    .warnings
                    .push(item("Recommended: 1200x630 or larger for best quality"));
            }
        }
        _ => report.warnings.push(ValidationItem::new(
            "og:image:width/height",
            "Image Dimensions",
            "Missing image dimensions - may cause layout shifts",
        )),
    }

    match image.alt.as_deref().filter(|alt| !alt.is_empty()) {
        Some(alt) => report.passed.push(
            ValidationItem::new("og:image:alt", "Image Alt Text", "Image has alt text for accessibility")
                .with_value(truncate_value(alt, MAX_VALUE_LEN)),
        ),
        None => report.warnings.push(ValidationItem::new(
            "og:image:alt",
            "Image Alt Text",
            "Missing image alt text - important for accessibility",
        )),
    }
}

/// Leading integer of a dimension attribute, so `1200px` reads as 1200.
fn parse_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let digits_end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || (*i == 0 && (*c == '-' || *c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..digits_end].parse().ok()
}

fn truncate_value(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(max_len).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_result() -> OgResult {
        OgResult {
            og_title: Some("A thoroughly reasonable page title here".to_string()),
            og_description: Some(
                "A description that is long enough to count as optimal for previews.".to_string(),
            ),
            og_image: vec![OgImage {
                url: "https://example.com/og.png".to_string(),
                width: Some("1200".to_string()),
                height: Some("630".to_string()),
                alt: Some("Preview".to_string()),
                ..Default::default()
            }],
            og_url: Some("https://example.com/".to_string()),
            og_site_name: Some("Example".to_string()),
            og_type: Some("website".to_string()),
            og_locale: Some("en_GB".to_string()),
            twitter_card: Some("summary_large_image".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_page_scores_full_marks() {
        let validation = validate_og_tags(&complete_result());
        assert_eq!(validation.score, 100);
        assert!(validation.errors.is_empty());
        assert!(validation.warnings.is_empty());
        assert!(validation
            .passed
            .iter()
            .any(|item| item.label == "Image Dimensions" && item.value.as_deref() == Some("1200x630")));
    }

    #[test]
    fn test_empty_page() {
        let validation = validate_og_tags(&OgResult::default());
        // 4 required errors; 3 recommended + 3 twitter warnings
        assert_eq!(validation.errors.len(), 4);
        assert_eq!(validation.warnings.len(), 6);
        assert_eq!(validation.score, 0);
        assert_eq!(
            validation.errors[0].message,
            "Missing og:title - required for social sharing"
        );
    }

    #[test]
    fn test_twitter_fallback_suppresses_warning() {
        let mut result = complete_result();
        result.twitter_card = None;
        let validation = validate_og_tags(&result);
        let tags: Vec<&str> = validation.warnings.iter().map(|w| w.tag.as_str()).collect();
        assert_eq!(tags, vec!["twitter:card"]);
        assert_eq!(validation.score, 95);
    }

    #[test]
    fn test_title_length_thresholds() {
        let mut result = complete_result();
        result.og_title = Some("x".repeat(96));
        let validation = validate_og_tags(&result);
        assert_eq!(validation.errors[0].label, "Title Length");
        assert_eq!(validation.errors[0].value.as_deref(), Some("96 chars"));

        result.og_title = Some("x".repeat(71));
        let validation = validate_og_tags(&result);
        assert_eq!(validation.warnings[0].label, "Title Length");

        result.og_title = Some("short".to_string());
        let validation = validate_og_tags(&result);
        assert!(!validation
            .passed
            .iter()
            .chain(validation.warnings.iter())
            .any(|item| item.label == "Title Length"));
    }

    #[test]
    fn test_description_length_uses_chars() {
        let mut result = complete_result();
        result.og_description = Some("é".repeat(161));
        let validation = validate_og_tags(&result);
        let item = validation
            .warnings
            .iter()
            .find(|item| item.label == "Description Length")
            .unwrap();
        assert_eq!(item.value.as_deref(), Some("161 chars"));
    }

    #[test]
    fn test_image_checks() {
        let mut result = complete_result();
        result.og_image = vec![OgImage {
            url: "http://example.com/small.png".to_string(),
            width: Some("600px".to_string()),
            height: Some("315".to_string()),
            ..Default::default()
        }];
        let validation = validate_og_tags(&result);
        let labels: Vec<&str> = validation.warnings.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["Image HTTPS", "Image Dimensions", "Image Alt Text"]);
        assert_eq!(validation.warnings[1].value.as_deref(), Some("600x315"));
        assert_eq!(validation.score, 85);
    }

    #[test]
    fn test_missing_dimensions() {
        let mut result = complete_result();
        result.og_image[0].width = None;
        let validation = validate_og_tags(&result);
        assert_eq!(validation.warnings[0].tag, "og:image:width/height");
    }

    #[test]
    fn test_twitter_image_used_without_og_image() {
        let mut result = complete_result();
        result.og_image.clear();
        result.twitter_image = vec![OgImage {
            url: "https://example.com/t.png".to_string(),
            ..Default::default()
        }];
        let validation = validate_og_tags(&result);
        assert!(validation.errors.iter().any(|e| e.tag == "og:image"));
        assert!(validation.warnings.iter().any(|w| w.tag == "og:image:alt"));
    }

    #[test]
    fn test_values_are_truncated() {
        assert_eq!(truncate_value("short", 60), "short");
        let long = "a".repeat(61);
        assert_eq!(truncate_value(&long, 60), format!("{}...", "a".repeat(60)));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("1200"), Some(1200));
        assert_eq!(parse_int(" 630px"), Some(630));
        assert_eq!(parse_int("wide"), None);
    }
}
