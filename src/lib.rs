//! # Ladle - a small GraphQL backend for recipes
//!
//! Ladle stores recipes and their ordered steps in SQLite and exposes them
//! through a GraphQL API for frontends and automation.
//!
//! ## Features
//!
//! - **Ordered steps**: step numbers are store-assigned and kept gap-free;
//!   deleting a step renumbers the ones after it
//! - **GraphQL API**: query recipes and mutate recipes and steps
//! - **Single binary**: `ladle serve` runs the whole backend
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the server on the default port
//! ladle serve
//!
//! # Use a custom database and port
//! ladle serve --database-url sqlite://recipes.db --port 4000
//!
//! # Print the GraphQL SDL
//! ladle schema
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers, and HTTP server
//! - [`model`]: Data models (Recipe, RecipeStep)
//! - [`storage`]: SQLite-backed persistence

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles the optional `ladle.toml` configuration file.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `LadleError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema, resolvers, and HTTP server.
pub mod graphql;

/// Data models for recipes and steps.
pub mod model;

/// SQLite-backed storage layer.
///
/// Owns the step-numbering invariant and all persistence operations.
pub mod storage;

pub mod logging;
