pub mod config;
pub mod error;
pub mod library;
pub mod markup;
pub mod model;
pub mod og;
pub mod recipe;

pub use config::{load_config, OgConfig, SiteConfig};
pub use error::SiteError;
pub use library::{load_library, load_recipe};
pub use markup::{CooklangMarkup, MarkupError, MarkupParser, RawRecipe};
pub use model::{ParsedIngredient, ParsedRecipe, ParsedStep, ParsedTimer};
pub use og::{analyze, validate_og_tags, OgAnalysisResult, OgResult, ValidationResult};
pub use recipe::{parse_cook, RecipeParser};
