use serde::Serialize;

/// A recipe normalized for display: one consolidated ingredient list, the
/// distinct utensils, and each step as readable text plus its timers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecipe {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
    pub ingredients: Vec<ParsedIngredient>,
    pub utensils: Vec<String>,
    pub steps: Vec<ParsedStep>,
    pub source: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedIngredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedStep {
    pub text: String,
    pub timers: Vec<ParsedTimer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedTimer {
    pub label: Option<String>,
    pub seconds: f64,
}
