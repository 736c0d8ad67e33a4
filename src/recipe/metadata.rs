use crate::markup::MetadataPair;
use std::collections::HashMap;

/// Metadata pairs folded into one map. Later keys overwrite earlier ones and
/// values are trimmed; blank values read as missing.
#[derive(Debug, Default)]
pub(crate) struct Metadata {
    values: HashMap<String, String>,
}

impl Metadata {
    pub fn from_pairs(pairs: &[MetadataPair]) -> Self {
        let values = pairs
            .iter()
            .filter(|pair| !pair.key.is_empty())
            .map(|pair| (pair.key.clone(), pair.value.trim().to_string()))
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn title(&self, slug: &str) -> String {
        self.get("title").unwrap_or(slug).to_string()
    }

    pub fn tags(&self) -> Vec<String> {
        self.get("tags")
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn servings(&self) -> Option<f64> {
        self.get("servings")
            .and_then(|servings| servings.parse::<f64>().ok())
            .filter(|servings| servings.is_finite())
    }
}
