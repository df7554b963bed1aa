use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use crate::error::LadleError;
use crate::storage::RecipeRepository;

use super::types::*;

pub type LadleSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(repo: RecipeRepository) -> LadleSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(repo)
        .finish()
}

/// Render the SDL without attaching a store.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn get_repo<'a>(ctx: &Context<'a>) -> &'a RecipeRepository {
    ctx.data_unchecked::<RecipeRepository>()
}

fn parse_id(kind: &'static str, id: &ID) -> async_graphql::Result<i64> {
    id.parse::<i64>()
        .map_err(|_| LadleError::InvalidId(kind, id.to_string()).into())
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List all recipes with their steps, optionally restricted to recipes
    /// having at least one step with the given completion state.
    async fn all_recipes(
        &self,
        ctx: &Context<'_>,
        completed: Option<bool>,
    ) -> async_graphql::Result<Vec<Recipe>> {
        let repo = get_repo(ctx);

        let mut recipes = Vec::new();
        for recipe in repo.list_recipes(completed).await? {
            let steps = repo.steps_for_recipe(recipe.id).await?;
            recipes.push(Recipe::from_parts(recipe, steps));
        }
        Ok(recipes)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new recipe with no steps
    async fn create_recipe(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<Recipe> {
        let repo = get_repo(ctx);
        let recipe = repo.create_recipe(&name).await?;
        Ok(Recipe::from_parts(recipe, Vec::new()))
    }

    /// Delete a recipe and all of its steps, reporting the outcome as a
    /// status message rather than an error
    async fn delete_recipe(
        &self,
        ctx: &Context<'_>,
        recipe_id: ID,
    ) -> async_graphql::Result<String> {
        let repo = get_repo(ctx);

        let deleted = match recipe_id.parse::<i64>() {
            Ok(id) => repo.delete_recipe(id).await?,
            Err(_) => false,
        };

        Ok(if deleted {
            "Recipe deleted successfully".to_string()
        } else {
            "Recipe not found".to_string()
        })
    }

    /// Append a step to a recipe; errors when the recipe does not exist
    async fn create_step(
        &self,
        ctx: &Context<'_>,
        recipe_id: ID,
        description: String,
    ) -> async_graphql::Result<Step> {
        let repo = get_repo(ctx);
        let step = repo
            .create_step(parse_id("recipe", &recipe_id)?, &description)
            .await?;
        Ok(step.into())
    }

    /// Replace a step's description; errors when the step does not exist
    async fn update_step(
        &self,
        ctx: &Context<'_>,
        step_id: ID,
        description: String,
    ) -> async_graphql::Result<Step> {
        let repo = get_repo(ctx);
        let step = repo
            .update_step_description(parse_id("step", &step_id)?, &description)
            .await?;
        Ok(step.into())
    }

    /// Delete a step and renumber the ones after it. Succeeds whether or not
    /// the step existed.
    async fn delete_step(&self, ctx: &Context<'_>, step_id: ID) -> async_graphql::Result<bool> {
        let repo = get_repo(ctx);

        if let Ok(id) = step_id.parse::<i64>() {
            repo.delete_step(id).await?;
        }
        Ok(true)
    }

    /// Mark a step as completed
    async fn complete_step(&self, ctx: &Context<'_>, step_id: ID) -> async_graphql::Result<Step> {
        set_completed(ctx, &step_id, true).await
    }

    /// Mark a step as not completed
    async fn incomplete_step(&self, ctx: &Context<'_>, step_id: ID) -> async_graphql::Result<Step> {
        set_completed(ctx, &step_id, false).await
    }
}

async fn set_completed(
    ctx: &Context<'_>,
    step_id: &ID,
    completed: bool,
) -> async_graphql::Result<Step> {
    let repo = get_repo(ctx);
    let step = repo
        .set_step_completed(parse_id("step", step_id)?, completed)
        .await?;
    Ok(step.into())
}
