use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from the config file. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Status ranges such as `200-299,400-499`
    #[serde(default)]
    pub statuses: Option<String>,

    #[serde(default)]
    pub show_response_names: bool,

    /// Custom Tera template
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Output path, or `-` for stdout
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Allow overwriting an existing output file
    #[serde(default)]
    pub replace: bool,
}
