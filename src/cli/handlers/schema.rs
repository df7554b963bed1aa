use anyhow::Result;

use crate::graphql;

pub fn handle_schema() -> Result<()> {
    println!("{}", graphql::sdl());
    Ok(())
}
