use crate::markup::{RawStep, RawTimer, StepToken};
use crate::model::{ParsedStep, ParsedTimer};

const DEFAULT_TIMER_UNIT: &str = "minutes";

/// Render a step as plain prose and pull out its timers.
///
/// Ingredient and cookware references read as their names, timers as a
/// compact `<duration><unit>` such as `10minutes`.
pub(crate) fn render_step(step: &RawStep) -> ParsedStep {
    let tokens = match step {
        RawStep::Flat(text) => {
            return ParsedStep {
                text: text.trim().to_string(),
                timers: Vec::new(),
            }
        }
        RawStep::Tokens(tokens) => tokens,
    };

    let mut text = String::new();
    let mut timers = Vec::new();

    for token in tokens {
        match token {
            StepToken::Text(fragment) => text.push_str(fragment),
            StepToken::Ingredient(ingredient) => text.push_str(&ingredient.name),
            StepToken::Cookware(cookware) => text.push_str(&cookware.name),
            StepToken::Timer(timer) if timer.is_timer() => {
                text.push_str(&timer_display(timer));
                timers.push(ParsedTimer {
                    label: timer.name.clone(),
                    seconds: timer.seconds.unwrap_or(0.0),
                });
            }
            StepToken::Timer(timer) => text.push_str(timer.name.as_deref().unwrap_or_default()),
        }
    }

    ParsedStep {
        text: text.trim().to_string(),
        timers,
    }
}

fn timer_display(timer: &RawTimer) -> String {
    let duration = match (timer.quantity, timer.amount.as_deref()) {
        (Some(quantity), _) => quantity.to_string(),
        (None, Some(amount)) => amount.to_string(),
        (None, None) => String::new(),
    };
    let unit = timer
        .units
        .as_deref()
        .filter(|unit| !unit.trim().is_empty())
        .unwrap_or(DEFAULT_TIMER_UNIT);
    format!("{}{}", duration, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{RawCookware, RawIngredient};

    fn timer(name: Option<&str>, quantity: Option<f64>, units: Option<&str>, seconds: Option<f64>) -> RawTimer {
        RawTimer {
            name: name.map(str::to_string),
            quantity,
            amount: quantity.map(|q| q.to_string()),
            units: units.map(str::to_string),
            seconds,
            raw: "~timer".to_string(),
        }
    }

    #[test]
    fn test_flat_step_is_trimmed() {
        let step = render_step(&RawStep::Flat("  Serve warm.  ".to_string()));
        assert_eq!(step.text, "Serve warm.");
        assert!(step.timers.is_empty());
    }

    #[test]
    fn test_references_render_as_names() {
        let step = render_step(&RawStep::Tokens(vec![
            StepToken::Text(" Add the ".to_string()),
            StepToken::Ingredient(RawIngredient {
                name: "flour".to_string(),
                quantity: Some(200.0),
                ..Default::default()
            }),
            StepToken::Text(" to the ".to_string()),
            StepToken::Cookware(RawCookware {
                name: "bowl".to_string(),
                ..Default::default()
            }),
            StepToken::Text(". ".to_string()),
        ]));
        assert_eq!(step.text, "Add the flour to the bowl.");
    }

    #[test]
    fn test_timer_rendered_and_collected() {
        let step = render_step(&RawStep::Tokens(vec![
            StepToken::Text("Let it ".to_string()),
            StepToken::Timer(timer(Some("rest"), Some(10.0), Some("minutes"), Some(600.0))),
        ]));
        assert_eq!(step.text, "Let it 10minutes");
        assert_eq!(
            step.timers,
            vec![ParsedTimer {
                label: Some("rest".to_string()),
                seconds: 600.0
            }]
        );
    }

    #[test]
    fn test_timer_defaults() {
        let step = render_step(&RawStep::Tokens(vec![StepToken::Timer(timer(
            None,
            Some(1.5),
            None,
            None,
        ))]));
        assert_eq!(step.text, "1.5minutes");
        assert_eq!(step.timers[0].label, None);
        assert_eq!(step.timers[0].seconds, 0.0);
    }

    #[test]
    fn test_textual_timer_amount() {
        let mut overnight = timer(Some("chill"), None, Some(""), None);
        overnight.amount = Some("overnight".to_string());
        assert_eq!(timer_display(&overnight), "overnightminutes");
    }

    #[test]
    fn test_token_without_timer_sigil_is_not_collected() {
        let mut fake = timer(Some("oven"), Some(5.0), None, Some(300.0));
        fake.raw = "oven".to_string();
        let step = render_step(&RawStep::Tokens(vec![StepToken::Timer(fake)]));
        assert_eq!(step.text, "oven");
        assert!(step.timers.is_empty());
    }
}
