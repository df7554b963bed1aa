use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::{LadleError, Result};
use crate::model::{Recipe, RecipeStep};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS recipes (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS recipe_steps (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    recipe_id    INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
    step_number  INTEGER NOT NULL,
    description  TEXT NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_recipe_steps_recipe
    ON recipe_steps(recipe_id, step_number);
";

const STEP_COLUMNS: &str = "id, recipe_id, step_number, description, is_completed";

/// SQLite-backed store for recipes and their steps.
///
/// The handle is created once at process start and passed into every
/// consumer explicitly; it is a cheap clone around a connection pool.
#[derive(Clone)]
pub struct RecipeRepository {
    pool: SqlitePool,
}

impl RecipeRepository {
    /// Open the database at `url`, creating the file and tables as needed.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        tracing::debug!(url, "Opened recipe database");

        Ok(Self { pool })
    }

    pub async fn create_recipe(&self, name: &str) -> Result<Recipe> {
        let recipe =
            sqlx::query_as::<_, Recipe>("INSERT INTO recipes (name) VALUES (?) RETURNING id, name")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        tracing::info!(id = recipe.id, name = %recipe.name, "Created recipe");
        Ok(recipe)
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe> {
        sqlx::query_as::<_, Recipe>("SELECT id, name FROM recipes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(LadleError::RecipeNotFound(id))
    }

    /// Delete a recipe and, via the cascading foreign key, all of its steps.
    ///
    /// Returns whether a matching recipe existed.
    pub async fn delete_recipe(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(id, "Deleted recipe");
        }
        Ok(deleted)
    }

    /// List recipes in id order.
    ///
    /// With a `completed` filter, only recipes having at least one step whose
    /// `is_completed` matches are returned; a recipe with both completed and
    /// uncompleted steps matches either filter value.
    pub async fn list_recipes(&self, completed: Option<bool>) -> Result<Vec<Recipe>> {
        let recipes = match completed {
            Some(flag) => {
                sqlx::query_as::<_, Recipe>(
                    "SELECT DISTINCT r.id, r.name FROM recipes r \
                     JOIN recipe_steps s ON s.recipe_id = r.id \
                     WHERE s.is_completed = ? \
                     ORDER BY r.id",
                )
                .bind(flag)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Recipe>("SELECT id, name FROM recipes ORDER BY id")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(recipes)
    }

    pub async fn steps_for_recipe(&self, recipe_id: i64) -> Result<Vec<RecipeStep>> {
        let steps = sqlx::query_as::<_, RecipeStep>(&format!(
            "SELECT {STEP_COLUMNS} FROM recipe_steps WHERE recipe_id = ? ORDER BY step_number"
        ))
        .bind(recipe_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(steps)
    }

    /// Append a step to a recipe.
    ///
    /// The step number is max(existing numbers) + 1, or 1 for the first step.
    /// Computing the number and inserting the row happen in one transaction
    /// so two concurrent appends cannot claim the same number.
    pub async fn create_step(&self, recipe_id: i64, description: &str) -> Result<RecipeStep> {
        let mut tx = self.pool.begin().await?;

        let recipe_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes WHERE id = ?")
                .bind(recipe_id)
                .fetch_one(&mut *tx)
                .await?;
        if recipe_exists == 0 {
            return Err(LadleError::RecipeNotFound(recipe_id));
        }

        let next_number = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(step_number), 0) + 1 FROM recipe_steps WHERE recipe_id = ?",
        )
        .bind(recipe_id)
        .fetch_one(&mut *tx)
        .await?;

        let step = sqlx::query_as::<_, RecipeStep>(&format!(
            "INSERT INTO recipe_steps (recipe_id, step_number, description, is_completed) \
             VALUES (?, ?, ?, 0) RETURNING {STEP_COLUMNS}"
        ))
        .bind(recipe_id)
        .bind(next_number)
        .bind(description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(id = step.id, recipe_id, step_number = step.step_number, "Created step");
        Ok(step)
    }

    pub async fn get_step(&self, id: i64) -> Result<RecipeStep> {
        sqlx::query_as::<_, RecipeStep>(&format!(
            "SELECT {STEP_COLUMNS} FROM recipe_steps WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LadleError::StepNotFound(id))
    }

    /// Replace a step's description. The step number is left untouched.
    pub async fn update_step_description(&self, id: i64, description: &str) -> Result<RecipeStep> {
        sqlx::query_as::<_, RecipeStep>(&format!(
            "UPDATE recipe_steps SET description = ? WHERE id = ? RETURNING {STEP_COLUMNS}"
        ))
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LadleError::StepNotFound(id))
    }

    pub async fn set_step_completed(&self, id: i64, completed: bool) -> Result<RecipeStep> {
        sqlx::query_as::<_, RecipeStep>(&format!(
            "UPDATE recipe_steps SET is_completed = ? WHERE id = ? RETURNING {STEP_COLUMNS}"
        ))
        .bind(completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(LadleError::StepNotFound(id))
    }

    /// Delete a step and close the numbering gap it leaves behind.
    ///
    /// Returns false when no such step exists. The row delete and the
    /// decrement of every later sibling run as one transaction, so readers
    /// never observe a partially renumbered recipe.
    pub async fn delete_step(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let Some((recipe_id, step_number)) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT recipe_id, step_number FROM recipe_steps WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM recipe_steps WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE recipe_steps SET step_number = step_number - 1 \
             WHERE recipe_id = ? AND step_number > ?",
        )
        .bind(recipe_id)
        .bind(step_number)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(id, recipe_id, step_number, "Deleted step");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_repo() -> (TempDir, RecipeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", temp_dir.path().join("ladle.db").display());
        let repo = RecipeRepository::connect(&url, 1).await.unwrap();
        (temp_dir, repo)
    }

    fn numbers(steps: &[RecipeStep]) -> Vec<i64> {
        steps.iter().map(|s| s.step_number).collect()
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    #[tokio::test]
    async fn test_create_and_get_recipe() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        assert_eq!(recipe.name, "Pasta");

        let fetched = repo.get_recipe(recipe.id).await.unwrap();
        assert_eq!(fetched, recipe);
    }

    #[tokio::test]
    async fn test_get_missing_recipe_is_not_found() {
        let (_dir, repo) = test_repo().await;

        let err = repo.get_recipe(999).await.unwrap_err();
        assert!(matches!(err, LadleError::RecipeNotFound(999)));
    }

    #[tokio::test]
    async fn test_delete_recipe_reports_existence() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Soup").await.unwrap();
        assert!(repo.delete_recipe(recipe.id).await.unwrap());
        assert!(!repo.delete_recipe(recipe.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_recipe_cascades_to_steps() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Soup").await.unwrap();
        let step = repo.create_step(recipe.id, "Chop onions").await.unwrap();

        assert!(repo.delete_recipe(recipe.id).await.unwrap());

        let err = repo.get_step(step.id).await.unwrap_err();
        assert!(matches!(err, LadleError::StepNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_recipe_name_is_accepted() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("").await.unwrap();
        assert_eq!(repo.get_recipe(recipe.id).await.unwrap().name, "");
    }

    // =========================================================================
    // Step numbering
    // =========================================================================

    #[tokio::test]
    async fn test_steps_number_sequentially() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        for (i, description) in ["Boil water", "Add pasta", "Drain"].iter().enumerate() {
            let step = repo.create_step(recipe.id, description).await.unwrap();
            assert_eq!(step.step_number, i as i64 + 1);
            assert!(!step.is_completed);
        }

        let steps = repo.steps_for_recipe(recipe.id).await.unwrap();
        assert_eq!(numbers(&steps), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_numbering_is_per_recipe() {
        let (_dir, repo) = test_repo().await;

        let first = repo.create_recipe("First").await.unwrap();
        let second = repo.create_recipe("Second").await.unwrap();

        repo.create_step(first.id, "a").await.unwrap();
        repo.create_step(first.id, "b").await.unwrap();
        let step = repo.create_step(second.id, "c").await.unwrap();

        assert_eq!(step.step_number, 1);
    }

    #[tokio::test]
    async fn test_delete_middle_step_closes_gap() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        let _first = repo.create_step(recipe.id, "Boil water").await.unwrap();
        let second = repo.create_step(recipe.id, "Add pasta").await.unwrap();
        let _third = repo.create_step(recipe.id, "Drain").await.unwrap();

        assert!(repo.delete_step(second.id).await.unwrap());

        let steps = repo.steps_for_recipe(recipe.id).await.unwrap();
        assert_eq!(numbers(&steps), vec![1, 2]);
        assert_eq!(steps[0].description, "Boil water");
        assert_eq!(steps[1].description, "Drain");
    }

    #[tokio::test]
    async fn test_delete_first_and_last_step() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Stew").await.unwrap();
        let mut steps = Vec::new();
        for description in ["one", "two", "three", "four"] {
            steps.push(repo.create_step(recipe.id, description).await.unwrap());
        }

        // Dropping the last step renumbers nothing.
        assert!(repo.delete_step(steps[3].id).await.unwrap());
        let remaining = repo.steps_for_recipe(recipe.id).await.unwrap();
        assert_eq!(numbers(&remaining), vec![1, 2, 3]);

        // Dropping the first shifts everything down by one.
        assert!(repo.delete_step(steps[0].id).await.unwrap());
        let remaining = repo.steps_for_recipe(recipe.id).await.unwrap();
        assert_eq!(numbers(&remaining), vec![1, 2]);
        assert_eq!(remaining[0].description, "two");
        assert_eq!(remaining[1].description, "three");
    }

    #[tokio::test]
    async fn test_delete_step_leaves_other_recipes_alone() {
        let (_dir, repo) = test_repo().await;

        let kept = repo.create_recipe("Kept").await.unwrap();
        let touched = repo.create_recipe("Touched").await.unwrap();

        repo.create_step(kept.id, "a").await.unwrap();
        repo.create_step(kept.id, "b").await.unwrap();
        let victim = repo.create_step(touched.id, "x").await.unwrap();
        repo.create_step(touched.id, "y").await.unwrap();

        assert!(repo.delete_step(victim.id).await.unwrap());

        let kept_steps = repo.steps_for_recipe(kept.id).await.unwrap();
        assert_eq!(numbers(&kept_steps), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_create_after_delete_reuses_freed_number() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        repo.create_step(recipe.id, "one").await.unwrap();
        let second = repo.create_step(recipe.id, "two").await.unwrap();

        repo.delete_step(second.id).await.unwrap();
        let replacement = repo.create_step(recipe.id, "two again").await.unwrap();

        assert_eq!(replacement.step_number, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_step_returns_false() {
        let (_dir, repo) = test_repo().await;
        assert!(!repo.delete_step(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_step_for_missing_recipe_is_not_found() {
        let (_dir, repo) = test_repo().await;

        let err = repo.create_step(7, "anything").await.unwrap_err();
        assert!(matches!(err, LadleError::RecipeNotFound(7)));
    }

    // =========================================================================
    // Step updates
    // =========================================================================

    #[tokio::test]
    async fn test_update_description_keeps_number() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        repo.create_step(recipe.id, "one").await.unwrap();
        let step = repo.create_step(recipe.id, "tow").await.unwrap();

        let updated = repo
            .update_step_description(step.id, "two")
            .await
            .unwrap();
        assert_eq!(updated.description, "two");
        assert_eq!(updated.step_number, step.step_number);
    }

    #[tokio::test]
    async fn test_update_missing_step_is_not_found() {
        let (_dir, repo) = test_repo().await;

        let err = repo.update_step_description(5, "nope").await.unwrap_err();
        assert!(matches!(err, LadleError::StepNotFound(5)));
    }

    #[tokio::test]
    async fn test_set_completed_is_idempotent() {
        let (_dir, repo) = test_repo().await;

        let recipe = repo.create_recipe("Pasta").await.unwrap();
        let step = repo.create_step(recipe.id, "Boil water").await.unwrap();

        let first = repo.set_step_completed(step.id, true).await.unwrap();
        assert!(first.is_completed);
        let second = repo.set_step_completed(step.id, true).await.unwrap();
        assert!(second.is_completed);

        let reset = repo.set_step_completed(step.id, false).await.unwrap();
        assert!(!reset.is_completed);
    }

    // =========================================================================
    // Completion filter
    // =========================================================================

    #[tokio::test]
    async fn test_list_recipes_completed_filter() {
        let (_dir, repo) = test_repo().await;

        let done = repo.create_recipe("All done").await.unwrap();
        let open = repo.create_recipe("Nothing done").await.unwrap();
        let mixed = repo.create_recipe("Half done").await.unwrap();
        let empty = repo.create_recipe("No steps").await.unwrap();

        let step = repo.create_step(done.id, "a").await.unwrap();
        repo.set_step_completed(step.id, true).await.unwrap();

        repo.create_step(open.id, "b").await.unwrap();

        let step = repo.create_step(mixed.id, "c").await.unwrap();
        repo.set_step_completed(step.id, true).await.unwrap();
        repo.create_step(mixed.id, "d").await.unwrap();

        let ids = |recipes: Vec<Recipe>| recipes.into_iter().map(|r| r.id).collect::<Vec<_>>();

        let all = repo.list_recipes(None).await.unwrap();
        assert_eq!(ids(all), vec![done.id, open.id, mixed.id, empty.id]);

        let with_completed = repo.list_recipes(Some(true)).await.unwrap();
        assert_eq!(ids(with_completed), vec![done.id, mixed.id]);

        let with_uncompleted = repo.list_recipes(Some(false)).await.unwrap();
        assert_eq!(ids(with_uncompleted), vec![open.id, mixed.id]);
    }
}
