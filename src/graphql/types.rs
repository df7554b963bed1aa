use async_graphql::SimpleObject;

use crate::model;

#[derive(SimpleObject)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    /// Steps in step-number order.
    pub steps: Vec<Step>,
}

impl Recipe {
    pub fn from_parts(recipe: model::Recipe, steps: Vec<model::RecipeStep>) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject)]
pub struct Step {
    pub id: i64,
    pub step_number: i64,
    pub description: String,
    pub is_completed: bool,
}

impl From<model::RecipeStep> for Step {
    fn from(s: model::RecipeStep) -> Self {
        Self {
            id: s.id,
            step_number: s.step_number,
            description: s.description,
            is_completed: s.is_completed,
        }
    }
}
