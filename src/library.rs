//! Load `.cook` files from disk. Slugs come from file names, never from the
//! recipe content.

use crate::error::SiteError;
use crate::model::ParsedRecipe;
use crate::recipe::parse_cook;
use log::{debug, info};
use std::path::{Path, PathBuf};

pub const RECIPE_EXTENSION: &str = "cook";

/// Slug for a recipe file: its file name without the extension.
pub fn slug_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Read and parse a single recipe file, using its file name as the slug.
pub async fn load_recipe(path: impl AsRef<Path>) -> Result<ParsedRecipe, SiteError> {
    let path = path.as_ref();
    let slug = slug_for(path).ok_or_else(|| SiteError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"),
    })?;
    load_recipe_as(path, &slug).await
}

/// Read and parse a recipe file under an explicit slug.
pub async fn load_recipe_as(path: impl AsRef<Path>, slug: &str) -> Result<ParsedRecipe, SiteError> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Parsing {} as '{}'", path.display(), slug);
    parse_cook(slug, &raw).map_err(|err| SiteError::Recipe {
        path: path.to_path_buf(),
        source: Box::new(err),
    })
}

/// Parse every `*.cook` file directly inside `dir`, sorted by slug.
pub async fn load_library(dir: impl AsRef<Path>) -> Result<Vec<ParsedRecipe>, SiteError> {
    let dir = dir.as_ref();
    let io_error = |source: std::io::Error| SiteError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_error)?;
    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        let is_recipe = path.extension().and_then(|ext| ext.to_str()) == Some(RECIPE_EXTENSION);
        if is_recipe && entry.file_type().await.map_err(io_error)?.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by_key(|path| slug_for(path));

    let mut recipes = Vec::with_capacity(paths.len());
    for path in &paths {
        recipes.push(load_recipe(path).await?);
    }

    info!("Loaded {} recipes from {}", recipes.len(), dir.display());
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for() {
        assert_eq!(slug_for(Path::new("recipes/banana-bread.cook")).as_deref(), Some("banana-bread"));
        assert_eq!(slug_for(Path::new("pancakes")).as_deref(), Some("pancakes"));
        assert_eq!(slug_for(Path::new("/")), None);
    }
}
