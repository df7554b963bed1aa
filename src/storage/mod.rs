//! SQLite-backed storage layer.
//!
//! Recipes and steps live in two tables with a cascading foreign key between
//! them. The store owns the step-numbering invariant: the `step_number`
//! values of a recipe's steps always form the contiguous sequence 1..N.
//!
//! ## Components
//!
//! - [`RecipeRepository`]: CRUD operations for recipes and steps

mod repository;

pub use repository::RecipeRepository;
