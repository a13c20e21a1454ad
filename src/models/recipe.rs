use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const TITLE_MAX_CHARS: usize = 100;
pub const MAKING_TIME_MAX_CHARS: usize = 100;
pub const SERVES_MAX_CHARS: usize = 100;
pub const INGREDIENTS_MAX_CHARS: usize = 300;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: i32,
}

/// PATCH payload. Exactly the five mutable fields are accepted; any other
/// key (including `id` and `created_at`) is rejected at deserialization.
#[derive(Debug, Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub making_time: Option<String>,
    pub serves: Option<String>,
    pub ingredients: Option<String>,
    pub cost: Option<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeData {
    pub id: i32,
    pub title: String,
    pub making_time: String,
    pub serves: String,
    pub ingredients: String,
    pub cost: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `{message, recipe}` envelope returned by Create and Update.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeEnvelope {
    pub message: String,
    pub recipe: RecipeData,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeDetail {
    pub recipe: RecipeData,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecipeList {
    pub recipes: Vec<RecipeData>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageBody {
    pub message: String,
}

impl From<crate::entity::recipe::Model> for RecipeData {
    fn from(m: crate::entity::recipe::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            making_time: m.making_time,
            serves: m.serves,
            ingredients: m.ingredients,
            cost: m.cost,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title must not be empty".into()));
    }
    check_length(title.trim(), "title", TITLE_MAX_CHARS)
}

fn check_length(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_create_recipe(req: &CreateRecipeRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    check_length(&req.making_time, "making_time", MAKING_TIME_MAX_CHARS)?;
    check_length(&req.serves, "serves", SERVES_MAX_CHARS)?;
    check_length(&req.ingredients, "ingredients", INGREDIENTS_MAX_CHARS)?;
    Ok(())
}

pub fn validate_update_recipe(req: &UpdateRecipeRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref making_time) = req.making_time {
        check_length(making_time, "making_time", MAKING_TIME_MAX_CHARS)?;
    }
    if let Some(ref serves) = req.serves {
        check_length(serves, "serves", SERVES_MAX_CHARS)?;
    }
    if let Some(ref ingredients) = req.ingredients {
        check_length(ingredients, "ingredients", INGREDIENTS_MAX_CHARS)?;
    }
    Ok(())
}
