use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
}

/// A single step of a recipe.
///
/// `step_number` is assigned by the store and kept contiguous per recipe:
/// the persisted numbers of a recipe's steps are always exactly 1..N.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecipeStep {
    pub id: i64,
    pub recipe_id: i64,
    pub step_number: i64,
    pub description: String,
    pub is_completed: bool,
}
