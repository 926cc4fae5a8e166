use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Closed category set; anything outside it is rejected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "recipe_category", rename_all = "kebab-case")]
pub enum Category {
    Doce,
    PratoPrincipal,
    Entrada,
    Inovacoes,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "doce" => Some(Self::Doce),
            "prato-principal" => Some(Self::PratoPrincipal),
            "entrada" => Some(Self::Entrada),
            "inovacoes" => Some(Self::Inovacoes),
            _ => None,
        }
    }
}

/// One ingredient line as the frontend edits it: free-text triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: Json<Vec<Ingredient>>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category: Category,
    pub country: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub is_featured: bool,
    pub rating: f64,
    pub num_reviews: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A validated recipe ready for insertion; id, counters and created_at are
/// assigned server-side.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category: Category,
    pub country: String,
    pub image_url: String,
    pub video_url: Option<String>,
    pub is_featured: bool,
}

const COLUMNS: &str = "id, title, description, ingredients, instructions, prep_time, cook_time, \
                       servings, category, country, image_url, video_url, is_featured, rating, \
                       num_reviews, created_at";

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {COLUMNS} FROM recipes ORDER BY created_at"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_featured(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE is_featured ORDER BY created_at"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_category(db: &PgPool, category: Category) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE category = $1 ORDER BY created_at"
    ))
    .bind(category)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_by_country(db: &PgPool, country: &str) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE country = $1 ORDER BY created_at"
    ))
    .bind(country)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {COLUMNS} FROM recipes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, new: NewRecipe) -> anyhow::Result<Recipe> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "INSERT INTO recipes (title, description, ingredients, instructions, prep_time, \
         cook_time, servings, category, country, image_url, video_url, is_featured) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         RETURNING {COLUMNS}"
    ))
    .bind(new.title)
    .bind(new.description)
    .bind(Json(new.ingredients))
    .bind(new.instructions)
    .bind(new.prep_time)
    .bind(new.cook_time)
    .bind(new.servings)
    .bind(new.category)
    .bind(new.country)
    .bind(new.image_url)
    .bind(new.video_url)
    .bind(new.is_featured)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// Write back a merged record in a single statement. Returns None when the
/// id vanished between the read and the write.
pub async fn update(db: &PgPool, recipe: &Recipe) -> anyhow::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "UPDATE recipes SET title = $2, description = $3, ingredients = $4, instructions = $5, \
         prep_time = $6, cook_time = $7, servings = $8, category = $9, country = $10, \
         image_url = $11, video_url = $12, is_featured = $13, rating = $14, num_reviews = $15 \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(recipe.id)
    .bind(&recipe.title)
    .bind(&recipe.description)
    .bind(&recipe.ingredients)
    .bind(&recipe.instructions)
    .bind(recipe.prep_time)
    .bind(recipe.cook_time)
    .bind(recipe.servings)
    .bind(recipe.category)
    .bind(&recipe.country)
    .bind(&recipe.image_url)
    .bind(&recipe.video_url)
    .bind(recipe.is_featured)
    .bind(recipe.rating)
    .bind(recipe.num_reviews)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_kebab_case() {
        assert_eq!(
            serde_json::to_value(Category::PratoPrincipal).unwrap(),
            "prato-principal"
        );
        let parsed: Category = serde_json::from_value("doce".into()).unwrap();
        assert_eq!(parsed, Category::Doce);
    }

    #[test]
    fn category_parse_rejects_unknown_values() {
        assert_eq!(Category::parse("prato-principal"), Some(Category::PratoPrincipal));
        assert_eq!(Category::parse("invalid-value"), None);
        assert_eq!(Category::parse("Doce"), None);
    }

    #[test]
    fn recipe_serializes_camel_case() {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title: "Pastel de nata".into(),
            description: "Clássico de Lisboa".into(),
            ingredients: Json(vec![Ingredient {
                quantity: "500".into(),
                unit: "g".into(),
                name: "massa folhada".into(),
            }]),
            instructions: vec!["Preparar o creme".into()],
            prep_time: 30,
            cook_time: 20,
            servings: 12,
            category: Category::Doce,
            country: "Portugal".into(),
            image_url: "https://img.example/nata.jpg".into(),
            video_url: None,
            is_featured: true,
            rating: 0.0,
            num_reviews: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["prepTime"], 30);
        assert_eq!(json["imageUrl"], "https://img.example/nata.jpg");
        assert_eq!(json["isFeatured"], true);
        assert_eq!(json["category"], "doce");
        assert_eq!(json["ingredients"][0]["name"], "massa folhada");
    }
}
