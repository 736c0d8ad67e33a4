//! [`MarkupParser`] adapter over the `cooklang` crate.

use super::{
    MarkupError, MarkupParser, MetadataPair, RawCookware, RawIngredient, RawRecipe, RawStep,
    RawTimer, StepToken, COOKWARE_SIGIL, TIMER_SIGIL,
};
use cooklang::convert::PhysicalQuantity;
use cooklang::model::{Content, Item, Timer};
use cooklang::quantity::{Quantity, Value};
use cooklang::{Converter, CooklangParser, Extensions};
use log::debug;
use std::sync::OnceLock;

/// Unit assumed for a timer written without one.
const DEFAULT_TIMER_UNIT: &str = "minutes";

/// Shared parser: plain Cooklang grammar with the bundled unit table, which
/// timers need to turn durations into seconds.
static PARSER: OnceLock<CooklangParser> = OnceLock::new();

fn parser() -> &'static CooklangParser {
    PARSER.get_or_init(|| CooklangParser::new(Extensions::empty(), Converter::bundled()))
}

/// Reads Cooklang recipes with [`cooklang::CooklangParser`] and flattens the
/// analyzed recipe into tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooklangMarkup;

impl MarkupParser for CooklangMarkup {
    fn parse(&self, raw: &str) -> Result<RawRecipe, MarkupError> {
        let parser = parser();
        let (recipe, _warnings) = parser
            .parse(raw)
            .into_result()
            .map_err(|report| MarkupError::Invalid(report.to_string()))?;
        let converter = parser.converter();

        let metadata = recipe
            .metadata
            .map
            .iter()
            .filter_map(|(key, value)| {
                let key = key.as_str()?;
                // scalars as text, lists as comma-separated text
                let value = value
                    .as_str()
                    .map(str::to_string)
                    .or_else(|| value.as_i64().map(|n| n.to_string()))
                    .or_else(|| value.as_f64().map(|n| n.to_string()))
                    .or_else(|| value.as_bool().map(|b| b.to_string()))
                    .or_else(|| {
                        value.as_sequence().map(|items| {
                            items
                                .iter()
                                .filter_map(|item| item.as_str())
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                    })?;
                Some(MetadataPair::new(key, value))
            })
            .collect();

        let ingredients: Vec<RawIngredient> = recipe
            .ingredients
            .iter()
            .map(|ingredient| {
                let quantity = ingredient.quantity.as_ref();
                RawIngredient {
                    name: ingredient.name.clone(),
                    quantity: quantity.and_then(|q| number(q.value())),
                    amount: quantity.map(|q| q.value().to_string()),
                    units: quantity.and_then(|q| q.unit()).map(str::to_string),
                }
            })
            .collect();

        let cookware: Vec<RawCookware> = recipe
            .cookware
            .iter()
            .map(|item| {
                let body = item
                    .quantity
                    .as_ref()
                    .map(|q| q.to_string())
                    .unwrap_or_default();
                RawCookware {
                    name: item.name.clone(),
                    raw: Some(format!("{}{}{{{}}}", COOKWARE_SIGIL, item.name, body)),
                }
            })
            .collect();

        let timers: Vec<Option<RawTimer>> = recipe
            .timers
            .iter()
            .map(|timer| {
                timer
                    .quantity
                    .as_ref()
                    .map(|quantity| to_raw_timer(timer.name.as_deref(), quantity, converter))
            })
            .collect();

        let mut steps = Vec::new();
        for section in &recipe.sections {
            for content in &section.content {
                match content {
                    Content::Step(step) => {
                        let tokens = step
                            .items
                            .iter()
                            .filter_map(|item| {
                                step_token(item, &ingredients, &cookware, &recipe.timers, &timers)
                            })
                            .collect();
                        steps.push(RawStep::Tokens(tokens));
                    }
                    Content::Text(text) => steps.push(RawStep::Flat(text.clone())),
                }
            }
        }

        debug!(
            "Tokenized recipe: {} metadata, {} ingredients, {} cookware, {} steps",
            recipe.metadata.map.len(),
            ingredients.len(),
            cookware.len(),
            steps.len()
        );
        Ok(RawRecipe {
            metadata,
            ingredients,
            cookware,
            steps,
        })
    }
}

/// A single numeric value; ranges and free text have none.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => Some(number.value()),
        _ => None,
    }
}

fn to_raw_timer(name: Option<&str>, quantity: &Quantity, converter: &Converter) -> RawTimer {
    let value = number(quantity.value());
    let amount = quantity.value().to_string();
    let units = quantity.unit().map(str::to_string);
    let raw = match &units {
        Some(unit) => format!("{}{}{{{}%{}}}", TIMER_SIGIL, name.unwrap_or_default(), amount, unit),
        None => format!("{}{}{{{}}}", TIMER_SIGIL, name.unwrap_or_default(), amount),
    };

    RawTimer {
        name: name.map(str::to_string),
        quantity: value,
        seconds: timer_seconds(converter, value, units.as_deref()),
        amount: Some(amount),
        units,
        raw,
    }
}

/// Duration in seconds using the converter's time units. Non-time units give
/// no duration.
fn timer_seconds(converter: &Converter, value: Option<f64>, unit: Option<&str>) -> Option<f64> {
    let value = value?;
    let unit = converter.find_unit(unit.unwrap_or(DEFAULT_TIMER_UNIT))?;
    matches!(unit.physical_quantity, PhysicalQuantity::Time).then(|| value * unit.ratio)
}

fn step_token(
    item: &Item,
    ingredients: &[RawIngredient],
    cookware: &[RawCookware],
    timer_names: &[Timer],
    timers: &[Option<RawTimer>],
) -> Option<StepToken> {
    match item {
        Item::Text { value } => Some(StepToken::Text(value.clone())),
        Item::Ingredient { index } => ingredients.get(*index).cloned().map(StepToken::Ingredient),
        Item::Cookware { index } => cookware.get(*index).cloned().map(StepToken::Cookware),
        Item::Timer { index } => match timers.get(*index) {
            Some(Some(timer)) => Some(StepToken::Timer(timer.clone())),
            // a bare `~word` without a duration stays prose
            _ => {
                let name = timer_names
                    .get(*index)
                    .and_then(|timer| timer.name.as_deref())
                    .unwrap_or_default();
                Some(StepToken::Text(format!("{}{}", TIMER_SIGIL, name)))
            }
        },
        other => {
            debug!("Skipping unsupported step item {:?}", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> RawRecipe {
        CooklangMarkup.parse(raw).unwrap()
    }

    fn step_tokens(recipe: &RawRecipe, index: usize) -> &[StepToken] {
        match &recipe.steps[index] {
            RawStep::Tokens(tokens) => tokens,
            RawStep::Flat(text) => panic!("expected tokens, got flat step {text:?}"),
        }
    }

    fn step_timers(recipe: &RawRecipe, index: usize) -> Vec<&RawTimer> {
        step_tokens(recipe, index)
            .iter()
            .filter_map(|token| match token {
                StepToken::Timer(timer) => Some(timer),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_front_matter_metadata() {
        let recipe = parse("---\ntitle: Banana Bread\nservings: 4\ntags: cake, sweet\n---\n\nMash @banana{3}.\n");
        assert!(recipe.metadata.contains(&MetadataPair::new("title", "Banana Bread")));
        assert!(recipe.metadata.contains(&MetadataPair::new("servings", "4")));
        assert!(recipe.metadata.contains(&MetadataPair::new("tags", "cake, sweet")));
        assert_eq!(recipe.steps.len(), 1);
    }

    #[test]
    fn test_ingredient_quantities_and_units() {
        let recipe = parse("Add @olive oil{2%tbsp} and @salt.");
        assert_eq!(recipe.ingredients.len(), 2);

        let oil = &recipe.ingredients[0];
        assert_eq!(oil.name, "olive oil");
        assert_eq!(oil.quantity, Some(2.0));
        assert_eq!(oil.units.as_deref(), Some("tbsp"));

        let salt = &recipe.ingredients[1];
        assert_eq!(salt.name, "salt");
        assert_eq!(salt.quantity, None);
        assert_eq!(salt.units, None);
    }

    #[test]
    fn test_cookware_raw_keeps_quoted_body() {
        let recipe = parse("Line a #baking-tray{\"baking tray\"}.");
        assert_eq!(recipe.cookware[0].name, "baking-tray");
        let raw = recipe.cookware[0].raw.as_deref().unwrap();
        assert!(raw.starts_with("#baking-tray{"));
        assert!(raw.contains("baking tray"));
    }

    #[test]
    fn test_timer_seconds_from_unit_table() {
        let recipe = parse("Bake for ~{25%minutes}, then ~rest{10%min}.");
        let timers = step_timers(&recipe, 0);
        assert_eq!(timers.len(), 2);
        assert_eq!(timers[0].name, None);
        assert_eq!(timers[0].quantity, Some(25.0));
        assert_eq!(timers[0].seconds, Some(1500.0));
        assert!(timers[0].is_timer());
        assert_eq!(timers[1].name.as_deref(), Some("rest"));
        assert_eq!(timers[1].seconds, Some(600.0));
    }

    #[test]
    fn test_timer_with_non_time_unit_has_no_seconds() {
        let recipe = parse("Wait ~{2%cups}.");
        assert_eq!(step_timers(&recipe, 0)[0].seconds, None);
    }

    #[test]
    fn test_bare_tilde_stays_text() {
        let recipe = parse("Bake for ~5 min until golden.");
        assert!(step_timers(&recipe, 0).is_empty());
        let text: String = step_tokens(&recipe, 0)
            .iter()
            .map(|token| match token {
                StepToken::Text(text) => text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "Bake for ~5 min until golden.");
    }

    #[test]
    fn test_step_token_order() {
        let recipe = parse("Mix @flour{200%g} in a #bowl.");
        let tokens = step_tokens(&recipe, 0);
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], StepToken::Text("Mix ".to_string()));
        assert!(matches!(&tokens[1], StepToken::Ingredient(i) if i.name == "flour"));
        assert_eq!(tokens[2], StepToken::Text(" in a ".to_string()));
        assert!(matches!(&tokens[3], StepToken::Cookware(c) if c.name == "bowl"));
        assert_eq!(tokens[4], StepToken::Text(".".to_string()));
    }

    #[test]
    fn test_paragraphs_are_steps() {
        let recipe = parse("One.\n\nTwo.\n\nThree.\n");
        assert_eq!(recipe.steps.len(), 3);
    }

    #[test]
    fn test_repeated_mentions_are_all_listed() {
        let recipe = parse("Beat @egg{2}.\n\nGlaze with @egg{1}.\n");
        let quantities: Vec<Option<f64>> = recipe.ingredients.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![Some(2.0), Some(1.0)]);
    }
}
