use anyhow::Result;
use colored::Colorize;

use crate::graphql::{build_schema, run_server};
use crate::storage::RecipeRepository;

use super::CommandContext;

pub fn handle_serve(
    ctx: CommandContext,
    port: Option<u16>,
    bind: Option<String>,
    database_url: Option<String>,
) -> Result<()> {
    let port = port.unwrap_or(ctx.config.server.port);
    let bind = bind.unwrap_or(ctx.config.server.bind);
    let url = database_url.unwrap_or(ctx.config.database.url);
    let max_connections = ctx.config.database.max_connections;

    println!(
        "{} GraphQL server on http://{}:{}",
        "Starting".green(),
        bind,
        port
    );
    println!("GraphQL Playground: http://{}:{}", bind, port);

    tokio::runtime::Runtime::new()?.block_on(async {
        let repo = RecipeRepository::connect(&url, max_connections).await?;
        let schema = build_schema(repo);
        run_server(schema, &bind, port).await
    })?;
    Ok(())
}
