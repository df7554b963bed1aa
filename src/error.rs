use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadleError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    #[error("Step not found: {0}")]
    StepNotFound(i64),

    #[error("Invalid {0} id: {1}")]
    InvalidId(&'static str, String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LadleError>;
