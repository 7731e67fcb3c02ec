pub mod schema;
pub mod loader;

pub use loader::{load_config, merge_with_cli_args, CliOverrides};
