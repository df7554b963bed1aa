mod schema;
mod serve;

pub use schema::handle_schema;
pub use serve::handle_serve;

use crate::config::LadleConfig;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: LadleConfig,
}
