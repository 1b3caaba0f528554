// ABOUTME: Recipe lookup seam and its Spoonacular findByIngredients implementation
// ABOUTME: Searches recipes for detected ingredients and derives each recipe's public page URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Meal Recommender Contributors

//! Spoonacular recipe search
//!
//! API reference: <https://spoonacular.com/food-api/docs#Search-Recipes-by-Ingredients>

use crate::config::RecipeApiConfig;
use crate::constants::recipes;
use crate::errors::RecipeError;
use crate::models::RecipeSuggestion;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Suggests recipes for a list of ingredients
#[async_trait]
pub trait RecipeLookup: Send + Sync {
    /// Recipes using `ingredients`, most relevant first
    ///
    /// An empty slice is still sent to the service.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` if the service is unreachable, answers with a
    /// non-success status, or no API key is configured
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSuggestion>, RecipeError>;
}

/// URL path segment for a recipe title: lower-cased, spaces become hyphens
#[must_use]
pub fn recipe_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

/// Public recipe page for `title` and `id`
#[must_use]
pub fn recipe_detail_url(title: &str, id: u64) -> String {
    format!("{}/{}-{id}", recipes::DETAIL_BASE_URL, recipe_slug(title))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoundRecipe {
    id: u64,
    #[serde(default)]
    title: String,
    image: Option<String>,
    image_type: Option<String>,
    #[serde(default)]
    used_ingredient_count: u32,
    #[serde(default)]
    missed_ingredient_count: u32,
    #[serde(default)]
    likes: u32,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<FoundRecipe> for RecipeSuggestion {
    fn from(recipe: FoundRecipe) -> Self {
        let mut extra = recipe.extra;
        // the derived detail URL replaces any upstream one
        extra.remove("url");

        Self {
            url: recipe_detail_url(&recipe.title, recipe.id),
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            image_type: recipe.image_type,
            used_ingredient_count: recipe.used_ingredient_count,
            missed_ingredient_count: recipe.missed_ingredient_count,
            likes: recipe.likes,
            extra,
        }
    }
}

/// Spoonacular API client
pub struct SpoonacularClient {
    config: RecipeApiConfig,
    http_client: reqwest::Client,
}

impl SpoonacularClient {
    /// Create a client
    #[must_use]
    pub fn new(config: RecipeApiConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

#[async_trait]
impl RecipeLookup for SpoonacularClient {
    async fn find_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSuggestion>, RecipeError> {
        if !self.config.has_usable_key() {
            return Err(RecipeError::NotConfigured);
        }

        let url = format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            recipes::FIND_BY_INGREDIENTS_PATH
        );
        let joined = ingredients.join(",");
        let number = self.config.result_limit.to_string();
        let ranking = recipes::RANKING_MAXIMIZE_USED.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("ingredients", joined.as_str()),
                ("apiKey", self.config.api_key.as_str()),
                ("number", number.as_str()),
                ("ranking", ranking.as_str()),
                ("ignorePantry", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(RecipeError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let found: Vec<FoundRecipe> = response.json().await?;
        debug!(ingredients = %joined, recipes.count = found.len(), "Recipe search completed");

        Ok(found.into_iter().map(RecipeSuggestion::from).collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_url_from_title_and_id() {
        assert_eq!(
            recipe_detail_url("Banana Bread", 123),
            "https://spoonacular.com/recipes/banana-bread-123"
        );
        assert_eq!(
            recipe_detail_url("Quick  Fruit Salad", 9),
            "https://spoonacular.com/recipes/quick--fruit-salad-9"
        );
    }

    #[test]
    fn test_found_recipe_maps_to_suggestion() {
        let found: FoundRecipe = serde_json::from_value(json!({
            "id": 123,
            "title": "Banana Bread",
            "image": "https://img.spoonacular.com/recipes/123-312x231.jpg",
            "imageType": "jpg",
            "usedIngredientCount": 1,
            "missedIngredientCount": 4,
            "likes": 12,
            "usedIngredients": [{ "name": "banana" }]
        }))
        .unwrap();

        let suggestion = RecipeSuggestion::from(found);
        assert_eq!(suggestion.url, "https://spoonacular.com/recipes/banana-bread-123");
        assert_eq!(suggestion.image_type.as_deref(), Some("jpg"));
        assert!(suggestion.extra.contains_key("usedIngredients"));
    }

    #[test]
    fn test_upstream_url_is_replaced_by_detail_url() {
        let found: FoundRecipe = serde_json::from_value(json!({
            "id": 123,
            "title": "Banana Bread",
            "url": "https://upstream.example/banana-bread"
        }))
        .unwrap();

        let suggestion = RecipeSuggestion::from(found);
        assert!(!suggestion.extra.contains_key("url"));

        let body = serde_json::to_string(&suggestion).unwrap();
        assert_eq!(body.matches("\"url\"").count(), 1);
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["url"], "https://spoonacular.com/recipes/banana-bread-123");
    }

    #[tokio::test]
    async fn test_placeholder_key_skips_request() {
        let config = RecipeApiConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            api_key: recipes::PLACEHOLDER_API_KEY.to_owned(),
            result_limit: 5,
        };
        let client = SpoonacularClient::new(config, reqwest::Client::new());

        let result = client.find_by_ingredients(&["Fruit".to_owned()]).await;
        assert!(matches!(result, Err(RecipeError::NotConfigured)));
    }
}
