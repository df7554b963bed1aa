use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::GraphQL;
use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::error::Result;

use super::schema::LadleSchema;

async fn playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/")))
}

/// Serve the schema over HTTP: queries and mutations on POST /, the
/// GraphQL Playground UI on GET /.
pub async fn run_server(schema: LadleSchema, bind: &str, port: u16) -> Result<()> {
    let app = Router::new().route("/", get(playground).post_service(GraphQL::new(schema)));

    let listener = tokio::net::TcpListener::bind((bind, port)).await?;
    tracing::info!(bind, port, "GraphQL server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
