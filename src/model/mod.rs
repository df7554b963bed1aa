//! Data models for recipes.
//!
//! This module defines the core data structures:
//!
//! - [`Recipe`]: A named recipe owning an ordered list of steps
//! - [`RecipeStep`]: One step of a recipe, numbered contiguously from 1

mod recipe;

pub use recipe::{Recipe, RecipeStep};
