//! GraphQL schema and resolvers.
//!
//! Exposes the recipe store over a GraphQL API, designed for a web or mobile
//! frontend performing recipe CRUD.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! ladle serve --port 8000
//!
//! # Print the SDL
//! ladle schema
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `allRecipes`
//! - **Mutations**: `createRecipe`, `deleteRecipe`, `createStep`,
//!   `updateStep`, `deleteStep`, `completeStep`, `incompleteStep`

mod schema;
mod server;
mod types;

pub use schema::{LadleSchema, build_schema, sdl};
pub use server::run_server;
pub use types::*;
