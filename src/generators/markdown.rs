use super::anchors::HeaderPathCache;
use super::helpers::register_helpers;
use super::Template;
use crate::collection_processor::{add_level_property, clear_response_names, filter_responses_by_status};
use crate::error::Result;
use crate::parsers::{Collection, StatusRange};
use std::sync::{Arc, Mutex};
use tera::{Context, Tera};

/// What to do to a collection before it reaches the template
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Keep only responses with a status code in one of these ranges
    pub status_ranges: Vec<StatusRange>,

    /// Keep the names of sample responses instead of clearing them
    pub show_response_names: bool,
}

/// Renders a prepared collection through a Tera template
pub struct MarkdownGenerator {
    template: Template,
}

impl MarkdownGenerator {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    /// Render a collection. Every call gets its own header cache, so repeated
    /// headings are numbered from scratch each time.
    pub fn render(&self, collection: &Collection) -> Result<String> {
        let header_paths = Arc::new(Mutex::new(HeaderPathCache::new()));

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        register_helpers(&mut tera, Arc::clone(&header_paths));
        tera.add_raw_template(&self.template.name, &self.template.body)?;

        let context = Context::from_serialize(collection)?;
        let content = tera.render(&self.template.name, &context)?;

        match header_paths.lock() {
            Ok(cache) if !cache.is_empty() => {
                log::debug!("Rendered {:?} with {} header link(s)", self.template.name, cache.len());
            }
            _ => log::debug!("Rendered {:?} without header links", self.template.name),
        }

        Ok(content)
    }
}

/// Filter, annotate and render a collection into text.
///
/// Nothing is written anywhere: the caller only gets output once the whole
/// document rendered successfully.
pub fn generate_text(mut collection: Collection, template: Template, options: &RenderOptions) -> Result<String> {
    filter_responses_by_status(&mut collection, &options.status_ranges);
    add_level_property(&mut collection);
    if !options.show_response_names {
        clear_response_names(&mut collection);
    }

    MarkdownGenerator::new(template).render(&collection)
}
