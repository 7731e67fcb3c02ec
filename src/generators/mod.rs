pub mod anchors;
pub mod helpers;
pub mod markdown;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use markdown::{generate_text, RenderOptions};

pub const DEFAULT_TEMPLATE_NAME: &str = "default.md.tera";
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/default.md.tera");

/// A template body together with the name errors refer to it by
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub body: String,
}

impl Template {
    pub fn builtin() -> Self {
        Self {
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            body: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Load a custom template, or the built-in one when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        let body = fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {:?}", path))?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_TEMPLATE_NAME)
            .to_string();

        log::debug!("Loaded template {:?} from {:?}", name, path);
        Ok(Self { name, body })
    }
}
