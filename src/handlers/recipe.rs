use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::recipe;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::path::AppPath;
use crate::models::recipe::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Recipes",
    operation_id = "createRecipe",
    summary = "Create a new recipe",
    description = "Creates a new recipe. All five fields (`title`, `making_time`, `serves`, `ingredients`, `cost`) are required; a missing field is a validation error. `created_at` and `updated_at` are server-assigned and equal at creation.",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeEnvelope),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_recipe(&payload)?;

    let now = chrono::Utc::now();
    let new_recipe = recipe::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        making_time: Set(payload.making_time),
        serves: Set(payload.serves),
        ingredients: Set(payload.ingredients),
        cost: Set(payload.cost),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_recipe.insert(&state.db).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeEnvelope {
            message: "recipe successfully created!".into(),
            recipe: model.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Recipes",
    operation_id = "listRecipes",
    summary = "List all recipes",
    description = "Returns every recipe, ordered by `id` ascending. No pagination.",
    responses(
        (status = 200, description = "List of recipes", body = RecipeList),
    ),
)]
#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<RecipeList>, AppError> {
    let recipes = recipe::Entity::find()
        .order_by_asc(recipe::Column::Id)
        .all(&state.db)
        .await?
        .into_iter()
        .map(RecipeData::from)
        .collect();

    Ok(Json(RecipeList { recipes }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "getRecipe",
    summary = "Get a recipe by ID",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDetail),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<RecipeDetail>, AppError> {
    let model = find_recipe(&state.db, id).await?;
    Ok(Json(RecipeDetail {
        recipe: model.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "updateRecipe",
    summary = "Update an existing recipe",
    description = "Partially updates a recipe using PATCH semantics — only provided fields are modified. Only the five mutable fields are accepted; unknown keys such as `id` or `created_at` are rejected. A non-empty payload refreshes `updated_at`; an empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeEnvelope),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRecipeRequest>,
) -> Result<Json<RecipeEnvelope>, AppError> {
    validate_update_recipe(&payload)?;

    if payload == UpdateRecipeRequest::default() {
        let existing = find_recipe(&state.db, id).await?;
        return Ok(Json(RecipeEnvelope {
            message: "recipe successfully updated!".into(),
            recipe: existing.into(),
        }));
    }

    let txn = state.db.begin().await?;

    let existing = find_recipe(&txn, id).await?;
    let mut active: recipe::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(making_time) = payload.making_time {
        active.making_time = Set(making_time);
    }
    if let Some(serves) = payload.serves {
        active.serves = Set(serves);
    }
    if let Some(ingredients) = payload.ingredients {
        active.ingredients = Set(ingredients);
    }
    if let Some(cost) = payload.cost {
        active.cost = Set(cost);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(RecipeEnvelope {
        message: "recipe successfully updated!".into(),
        recipe: model.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Recipes",
    operation_id = "deleteRecipe",
    summary = "Delete a recipe by ID",
    description = "Permanently deletes a recipe. Hard delete; the ID is never reused.",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageBody),
        (status = 404, description = "Recipe not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<Json<MessageBody>, AppError> {
    let txn = state.db.begin().await?;

    find_recipe_for_update(&txn, id).await?;
    recipe::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    Ok(Json(MessageBody {
        message: "recipe successfully deleted!".into(),
    }))
}

async fn find_recipe<C: ConnectionTrait>(db: &C, id: i32) -> Result<recipe::Model, AppError> {
    recipe::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))
}

async fn find_recipe_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<recipe::Model, AppError> {
    use sea_orm::sea_query::LockType;
    recipe::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))
}
