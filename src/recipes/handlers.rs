use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::ApiError,
    extract::{ApiJson, ApiPath},
    recipes::{
        dto::{
            CreateRecipeRequest, DeletedResponse, RecipeListResponse, RecipeResponse,
            UpdateRecipeRequest,
        },
        repo::{self, Category, Recipe},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/featured", get(featured_recipes))
        .route(
            "/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .route("/recipes/category/:category", get(recipes_by_category))
        .route("/recipes/country/:country", get(recipes_by_country))
}

fn list_envelope(data: Vec<Recipe>) -> Json<RecipeListResponse> {
    Json(RecipeListResponse {
        success: true,
        count: data.len(),
        data,
    })
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let recipes = repo::list(&state.db).await.map_err(ApiError::internal)?;
    Ok(list_envelope(recipes))
}

#[instrument(skip(state))]
pub async fn featured_recipes(
    State(state): State<AppState>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let recipes = repo::list_featured(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(list_envelope(recipes))
}

#[instrument(skip(state))]
pub async fn recipes_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    // An unknown category matches nothing rather than erroring, mirroring a
    // filter on a value no record can hold
    let recipes = match Category::parse(&category) {
        Some(category) => repo::list_by_category(&state.db, category)
            .await
            .map_err(ApiError::internal)?,
        None => Vec::new(),
    };
    Ok(list_envelope(recipes))
}

#[instrument(skip(state))]
pub async fn recipes_by_country(
    State(state): State<AppState>,
    ApiPath(country): ApiPath<String>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let recipes = repo::list_by_country(&state.db, &country)
        .await
        .map_err(ApiError::internal)?;
    Ok(list_envelope(recipes))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = repo::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::NotFound("Receita não encontrada".into()))?;
    Ok(Json(RecipeResponse {
        success: true,
        data: recipe,
    }))
}

#[instrument(skip(state, admin, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(payload): ApiJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let new = payload.into_new_recipe().map_err(ApiError::Validation)?;
    let recipe = repo::create(&state.db, new)
        .await
        .map_err(ApiError::internal)?;
    info!(recipe_id = %recipe.id, admin_id = %admin.id, "recipe created");
    Ok((
        StatusCode::CREATED,
        Json(RecipeResponse {
            success: true,
            data: recipe,
        }),
    ))
}

#[instrument(skip(state, admin, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let existing = repo::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::NotFound("Receita não encontrada".into()))?;

    let merged = payload.apply_to(existing).map_err(ApiError::Validation)?;

    let recipe = repo::update(&state.db, &merged)
        .await
        .map_err(ApiError::internal)?
        .ok_or_else(|| ApiError::NotFound("Receita não encontrada".into()))?;

    info!(recipe_id = %recipe.id, admin_id = %admin.id, "recipe updated");
    Ok(Json(RecipeResponse {
        success: true,
        data: recipe,
    }))
}

#[instrument(skip(state, admin))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let deleted = repo::delete(&state.db, id)
        .await
        .map_err(ApiError::internal)?;
    if !deleted {
        return Err(ApiError::NotFound("Receita não encontrada".into()));
    }
    info!(recipe_id = %id, admin_id = %admin.id, "recipe deleted");
    Ok(Json(DeletedResponse::new()))
}
