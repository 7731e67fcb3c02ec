use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Unmodeled fields, kept in source order so templates can still reach them
pub type Extras = IndexMap<String, JsonValue>;

/// Root of a Postman v2.1 collection export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,

    /// Top-level folders and endpoints
    #[serde(default)]
    pub item: Vec<Item>,

    /// `event`, `variable`, `auth` and anything else Postman exports
    #[serde(flatten)]
    pub extra: Extras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(flatten)]
    pub extra: Extras,
}

/// A node of the item tree.
///
/// Postman does not tag items: an object with an `item` list is a folder,
/// anything else is an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Item {
    Folder(Folder),
    Endpoint(Endpoint),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub name: String,

    pub item: Vec<Item>,

    #[serde(default, skip_deserializing)]
    pub level: usize,

    #[serde(flatten)]
    pub extra: Extras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub name: String,

    /// Request definition, passed to templates as-is
    #[serde(default)]
    pub request: JsonValue,

    #[serde(default)]
    pub response: Vec<Response>,

    #[serde(default, skip_deserializing)]
    pub level: usize,

    #[serde(flatten)]
    pub extra: Extras,
}

/// A saved sample response of an endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub name: String,

    pub code: u16,

    #[serde(default)]
    pub status: String,

    #[serde(rename = "_postman_previewlanguage", default)]
    pub language: Option<String>,

    #[serde(default)]
    pub header: JsonValue,

    #[serde(default)]
    pub cookie: Vec<JsonValue>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default, skip_deserializing)]
    pub level: usize,

    #[serde(flatten)]
    pub extra: Extras,
}

#[cfg(test)]
impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Folder(folder) => &folder.name,
            Item::Endpoint(endpoint) => &endpoint.name,
        }
    }

    pub fn level(&self) -> usize {
        match self {
            Item::Folder(folder) => folder.level,
            Item::Endpoint(endpoint) => endpoint.level,
        }
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = JsonValue::deserialize(deserializer)?;
        strip_computed_fields(&mut value);
        let name = value
            .get("name")
            .and_then(JsonValue::as_str)
            .unwrap_or("<unnamed>")
            .to_string();

        let item = if value.get("item").is_some() {
            Folder::deserialize(value).map(Item::Folder)
        } else {
            Endpoint::deserialize(value).map(Item::Endpoint)
        };

        item.map_err(|err| de::Error::custom(format!("item {:?}: {}", name, err)))
    }
}

/// Drop input keys that the pipeline computes itself, so they cannot shadow
/// the annotated values through `extra`.
fn strip_computed_fields(value: &mut JsonValue) {
    let Some(object) = value.as_object_mut() else {
        return;
    };
    object.shift_remove("level");

    if let Some(JsonValue::Array(responses)) = object.get_mut("response") {
        for response in responses.iter_mut().filter_map(JsonValue::as_object_mut) {
            response.shift_remove("level");
        }
    }
}
