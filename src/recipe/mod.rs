//! Normalize tokenized recipe markup into a [`ParsedRecipe`].

mod ingredients;
mod metadata;
mod steps;
mod utensils;

pub use ingredients::dedup_key;
pub use utensils::normalize_cookware;

use crate::error::SiteError;
use crate::markup::{CooklangMarkup, MarkupParser};
use crate::model::ParsedRecipe;
use log::debug;

use self::metadata::Metadata;

/// Parses recipe markup with any [`MarkupParser`] and normalizes the result.
#[derive(Debug, Clone, Default)]
pub struct RecipeParser<P = CooklangMarkup> {
    markup: P,
}

impl RecipeParser<CooklangMarkup> {
    pub fn cooklang() -> Self {
        Self::new(CooklangMarkup)
    }
}

impl<P: MarkupParser> RecipeParser<P> {
    pub fn new(markup: P) -> Self {
        Self { markup }
    }

    /// Build a [`ParsedRecipe`] from `raw` markup. The slug is taken as given
    /// and doubles as the title when the markup has none.
    pub fn parse(&self, slug: &str, raw: &str) -> Result<ParsedRecipe, SiteError> {
        let tokens = self.markup.parse(raw)?;
        let meta = Metadata::from_pairs(&tokens.metadata);

        let recipe = ParsedRecipe {
            slug: slug.to_string(),
            title: meta.title(slug),
            description: meta.text("description"),
            tags: meta.tags(),
            servings: meta.servings(),
            ingredients: ingredients::aggregate_ingredients(&tokens.ingredients),
            utensils: utensils::collect_utensils(&tokens.cookware),
            steps: tokens.steps.iter().map(steps::render_step).collect(),
            source: meta.text("source"),
            image: meta.text("image"),
        };

        debug!(
            "Parsed recipe '{}': {} ingredients, {} utensils, {} steps",
            recipe.slug,
            recipe.ingredients.len(),
            recipe.utensils.len(),
            recipe.steps.len()
        );
        Ok(recipe)
    }
}

/// Parse Cooklang markup for the recipe identified by `slug`.
pub fn parse_cook(slug: &str, raw: &str) -> Result<ParsedRecipe, SiteError> {
    RecipeParser::cooklang().parse(slug, raw)
}
