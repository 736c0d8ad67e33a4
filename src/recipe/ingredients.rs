use crate::markup::RawIngredient;
use crate::model::ParsedIngredient;
use log::debug;
use std::collections::HashMap;

/// Key under which two mentions count as the same ingredient: case-insensitive
/// name and unit, e.g. `egg::` or `butter::g`.
pub fn dedup_key(name: &str, unit: Option<&str>) -> String {
    format!(
        "{}::{}",
        name.trim().to_lowercase(),
        unit.unwrap_or_default().trim().to_lowercase()
    )
}

/// Merge every ingredient mention into a shopping-list style list. The first
/// mention of each key fixes its position, name and unit; quantities are
/// summed and dropped again if they total exactly zero.
pub(crate) fn aggregate_ingredients(raw: &[RawIngredient]) -> Vec<ParsedIngredient> {
    raw.iter()
        .map(from_raw)
        .fold(IngredientTotals::default(), IngredientTotals::add)
        .into_vec()
}

fn from_raw(raw: &RawIngredient) -> ParsedIngredient {
    let unit = raw
        .units
        .as_deref()
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .map(str::to_string);

    ParsedIngredient {
        name: raw.name.clone(),
        quantity: raw.quantity,
        unit,
        optional: false,
    }
}

#[derive(Default)]
struct IngredientTotals {
    positions: HashMap<String, usize>,
    entries: Vec<ParsedIngredient>,
}

impl IngredientTotals {
    fn add(mut self, ingredient: ParsedIngredient) -> Self {
        let key = dedup_key(&ingredient.name, ingredient.unit.as_deref());

        match self.positions.get(&key) {
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(ingredient);
            }
            Some(&index) => {
                let existing = &mut self.entries[index];
                let total =
                    existing.quantity.unwrap_or(0.0) + ingredient.quantity.unwrap_or(0.0);
                debug!("Merging ingredient '{}' into {} (total {})", ingredient.name, key, total);
                existing.quantity = (total != 0.0).then_some(total);
            }
        }
        self
    }

    fn into_vec(self) -> Vec<ParsedIngredient> {
        self.entries
    }
}
