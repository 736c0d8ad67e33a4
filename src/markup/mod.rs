//! Token-level view of recipe markup.
//!
//! A [`MarkupParser`] turns raw recipe text into a [`RawRecipe`]: metadata
//! pairs, every ingredient and cookware mention, and the steps as token
//! sequences. Normalization happens later in [`crate::recipe`], so any
//! tokenizer that can fill these types can drive the rest of the crate.

mod cooklang;

pub use self::cooklang::CooklangMarkup;

use thiserror::Error;

/// Sigil that opens a cookware annotation.
pub const COOKWARE_SIGIL: char = '#';
/// Sigil that opens a timer annotation.
pub const TIMER_SIGIL: char = '~';

/// Errors raised while tokenizing recipe markup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    /// The markup parser rejected the recipe
    #[error("invalid recipe markup: {0}")]
    Invalid(String),
}

/// Common interface for recipe markup tokenizers
pub trait MarkupParser {
    fn parse(&self, raw: &str) -> Result<RawRecipe, MarkupError>;
}

impl<P: MarkupParser + ?Sized> MarkupParser for &P {
    fn parse(&self, raw: &str) -> Result<RawRecipe, MarkupError> {
        (**self).parse(raw)
    }
}

/// Everything a tokenizer found in one recipe, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecipe {
    pub metadata: Vec<MetadataPair>,
    /// One entry per mention, duplicates included.
    pub ingredients: Vec<RawIngredient>,
    pub cookware: Vec<RawCookware>,
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetadataPair {
    pub key: String,
    pub value: String,
}

impl MetadataPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawIngredient {
    pub name: String,
    /// Numeric quantity, only when the amount parsed as a number.
    pub quantity: Option<f64>,
    /// Amount exactly as written, numeric or not.
    pub amount: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCookware {
    pub name: String,
    /// Annotation text, e.g. `#baking-tray{"baking tray"}`.
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTimer {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub amount: Option<String>,
    pub units: Option<String>,
    pub seconds: Option<f64>,
    pub raw: String,
}

impl RawTimer {
    /// Timers are recognised by their annotation text, which starts with
    /// [`TIMER_SIGIL`] for a real timer annotation.
    pub fn is_timer(&self) -> bool {
        self.raw.starts_with(TIMER_SIGIL)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepToken {
    Text(String),
    Ingredient(RawIngredient),
    Cookware(RawCookware),
    Timer(RawTimer),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawStep {
    /// Step content that was not broken into tokens.
    Flat(String),
    Tokens(Vec<StepToken>),
}
