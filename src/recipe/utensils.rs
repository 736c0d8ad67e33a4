use crate::markup::RawCookware;
use std::collections::HashSet;

/// Distinct utensil names in first-seen order.
pub(crate) fn collect_utensils(cookware: &[RawCookware]) -> Vec<String> {
    let mut seen = HashSet::new();
    cookware
        .iter()
        .map(normalize_cookware)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Human-readable name of a cookware annotation. Quoted text in the source
/// (`#baking-tray{"baking tray"}`) wins; otherwise dashes and underscores in
/// the name become spaces.
pub fn normalize_cookware(cookware: &RawCookware) -> String {
    if let Some(quoted) = cookware.raw.as_deref().and_then(first_quoted) {
        return quoted.trim().to_string();
    }

    cookware
        .name
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty run of text between two double quotes.
fn first_quoted(raw: &str) -> Option<&str> {
    let quotes: Vec<usize> = raw.match_indices('"').map(|(i, _)| i).collect();
    quotes
        .windows(2)
        .find(|pair| pair[1] > pair[0] + 1)
        .map(|pair| &raw[pair[0] + 1..pair[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookware(name: &str, raw: Option<&str>) -> RawCookware {
        RawCookware {
            name: name.to_string(),
            raw: raw.map(str::to_string),
        }
    }

    #[test]
    fn test_quoted_text_preferred() {
        let tray = cookware("baking-tray", Some("#baking-tray{\"Baking  Tray \"}"));
        assert_eq!(normalize_cookware(&tray), "Baking  Tray");
    }

    #[test]
    fn test_dashes_and_underscores_become_spaces() {
        assert_eq!(normalize_cookware(&cookware("mixing-bowl", None)), "mixing bowl");
        assert_eq!(normalize_cookware(&cookware("sauce__pan", Some("#sauce__pan"))), "sauce pan");
        assert_eq!(normalize_cookware(&cookware(" cast -_ iron  pan ", None)), "cast iron pan");
    }

    #[test]
    fn test_empty_quotes_are_skipped() {
        assert_eq!(first_quoted("#pot{\"\"}"), None);
        assert_eq!(first_quoted("#pot{\"\"big pot\"}"), Some("big pot"));
        assert_eq!(normalize_cookware(&cookware("pot", Some("#pot{\"\"}"))), "pot");
    }

    #[test]
    fn test_collect_dedupes_case_sensitively_and_drops_empty() {
        let utensils = collect_utensils(&[
            cookware("bowl", Some("#bowl")),
            cookware("whisk", None),
            cookware("bowl", Some("#bowl{}")),
            cookware("Bowl", None),
            cookware("--", None),
            cookware("pot", Some("#pot{\"   \"}")),
        ]);
        assert_eq!(utensils, vec!["bowl", "whisk", "Bowl"]);
    }
}
