use serde::{Deserialize, Serialize};

use super::repo::{Category, Ingredient, NewRecipe, Recipe};

/// Create body: everything optional at the serde layer so validation can
/// answer with the proper envelope instead of a bare deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Update body: only the provided fields are merged onto the stored record.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_featured: Option<bool>,
    pub rating: Option<f64>,
    pub num_reviews: Option<i32>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn check_instructions(steps: &[String], errors: &mut Vec<String>) {
    if steps.iter().any(|s| s.trim().is_empty()) {
        errors.push("As instruções são obrigatórias".into());
    }
}

impl CreateRecipeRequest {
    /// Mirror of the original schema validation: all mandatory fields plus
    /// the closed category set, reported together in one message.
    pub fn into_new_recipe(self) -> Result<NewRecipe, String> {
        let mut errors = Vec::new();

        let title = present(&self.title);
        if title.is_none() {
            errors.push("O título é obrigatório".into());
        }
        let description = present(&self.description);
        if description.is_none() {
            errors.push("A descrição é obrigatória".into());
        }
        if self.prep_time.is_none() {
            errors.push("O tempo de preparo é obrigatório".into());
        }
        if self.cook_time.is_none() {
            errors.push("O tempo de cozimento é obrigatório".into());
        }
        if self.servings.is_none() {
            errors.push("O número de porções é obrigatório".into());
        }
        let category = match self.category.as_deref() {
            None => {
                errors.push("A categoria é obrigatória".into());
                None
            }
            Some(raw) => {
                let parsed = Category::parse(raw);
                if parsed.is_none() {
                    errors.push(format!("Categoria inválida: {raw}"));
                }
                parsed
            }
        };
        let country = present(&self.country);
        if country.is_none() {
            errors.push("O país de origem é obrigatório".into());
        }
        let image_url = present(&self.image_url);
        if image_url.is_none() {
            errors.push("A imagem é obrigatória".into());
        }
        check_instructions(&self.instructions, &mut errors);

        if !errors.is_empty() {
            return Err(errors.join(", "));
        }

        Ok(NewRecipe {
            title: title.unwrap(),
            description: description.unwrap(),
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time: self.prep_time.unwrap(),
            cook_time: self.cook_time.unwrap(),
            servings: self.servings.unwrap(),
            category: category.unwrap(),
            country: country.unwrap(),
            image_url: image_url.unwrap(),
            video_url: present(&self.video_url),
            is_featured: self.is_featured,
        })
    }
}

impl UpdateRecipeRequest {
    /// Merge onto the stored record and re-validate the result, so a partial
    /// update can never blank out a mandatory field.
    pub fn apply_to(self, mut recipe: Recipe) -> Result<Recipe, String> {
        let mut errors = Vec::new();

        if let Some(title) = self.title {
            recipe.title = title;
        }
        if recipe.title.trim().is_empty() {
            errors.push("O título é obrigatório".into());
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if recipe.description.trim().is_empty() {
            errors.push("A descrição é obrigatória".into());
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = sqlx::types::Json(ingredients);
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        check_instructions(&recipe.instructions, &mut errors);
        if let Some(prep_time) = self.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = self.cook_time {
            recipe.cook_time = cook_time;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(raw) = self.category.as_deref() {
            match Category::parse(raw) {
                Some(category) => recipe.category = category,
                None => errors.push(format!("Categoria inválida: {raw}")),
            }
        }
        if let Some(country) = self.country {
            recipe.country = country;
        }
        if recipe.country.trim().is_empty() {
            errors.push("O país de origem é obrigatório".into());
        }
        if let Some(image_url) = self.image_url {
            recipe.image_url = image_url;
        }
        if recipe.image_url.trim().is_empty() {
            errors.push("A imagem é obrigatória".into());
        }
        if let Some(video_url) = self.video_url {
            recipe.video_url = Some(video_url);
        }
        if let Some(is_featured) = self.is_featured {
            recipe.is_featured = is_featured;
        }
        if let Some(rating) = self.rating {
            recipe.rating = rating;
        }
        if let Some(num_reviews) = self.num_reviews {
            recipe.num_reviews = num_reviews;
        }

        if errors.is_empty() {
            Ok(recipe)
        } else {
            Err(errors.join(", "))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Recipe>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub success: bool,
    pub data: Recipe,
}

/// Delete answers with an empty data object, as the original API did.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub data: serde_json::Value,
}

impl DeletedResponse {
    pub fn new() -> Self {
        Self {
            success: true,
            data: serde_json::json!({}),
        }
    }
}
