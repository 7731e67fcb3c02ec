use super::anchors::{format_header_path, HeaderPathCache};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tera::{Filter, Function, Tera, Value};

/// Register every helper templates can call. The header cache is owned by the
/// caller so that each render starts numbering from scratch.
pub fn register_helpers(tera: &mut Tera, header_paths: Arc<Mutex<HeaderPathCache>>) {
    tera.register_function("join", join);
    tera.register_function("format_header_path", header_path);
    tera.register_function("format_header_link", HeaderLink { header_paths });
    tera.register_filter("json_or_plaintext", JsonOrPlaintext);
}

fn required_arg<'a>(fn_name: &str, args: &'a HashMap<String, Value>, arg: &str) -> tera::Result<&'a Value> {
    args.get(arg)
        .ok_or_else(|| tera::Error::msg(format!("Function `{}` requires a `{}` argument", fn_name, arg)))
}

fn text_arg<'a>(fn_name: &str, args: &'a HashMap<String, Value>) -> tera::Result<&'a str> {
    required_arg(fn_name, args, "text")?
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("Function `{}` expects `text` to be a string", fn_name)))
}

/// Render a value the way it reads in text: strings without quotes.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `join(elems=[...], sep=", ")`
fn join(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let elems = required_arg("join", args, "elems")?
        .as_array()
        .ok_or_else(|| tera::Error::msg("Function `join` expects `elems` to be an array"))?;
    let sep = args.get("sep").map(display).unwrap_or_default();

    let joined = elems.iter().map(display).collect::<Vec<_>>().join(&sep);
    Ok(Value::String(joined))
}

/// `format_header_path(text="...")`, without de-duplication
fn header_path(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = text_arg("format_header_path", args)?;
    Ok(Value::String(format_header_path(text)))
}

/// `format_header_link(text="...")`
struct HeaderLink {
    header_paths: Arc<Mutex<HeaderPathCache>>,
}

impl Function for HeaderLink {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = text_arg("format_header_link", args)?;
        let mut cache = self
            .header_paths
            .lock()
            .map_err(|_| tera::Error::msg("Header path cache is poisoned"))?;

        Ok(Value::String(cache.format_header_link(text)))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// Pass valid JSON through untouched and HTML-escape anything else.
struct JsonOrPlaintext;

impl Filter for JsonOrPlaintext {
    fn filter(&self, value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        let text = match value {
            Value::String(s) => s.as_str(),
            Value::Null => return Ok(Value::String(String::new())),
            _ => return Err(tera::Error::msg("Filter `json_or_plaintext` expects a string")),
        };

        if serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok() {
            Ok(Value::String(text.to_string()))
        } else {
            Ok(Value::String(tera::escape_html(text)))
        }
    }

    fn is_safe(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, context: Value) -> tera::Result<String> {
        let mut tera = Tera::default();
        register_helpers(&mut tera, Arc::new(Mutex::new(HeaderPathCache::new())));
        tera.add_raw_template("t", template)?;
        tera.render("t", &tera::Context::from_value(context)?)
    }

    #[test]
    fn join_stringifies_elements() {
        let out = render(
            r#"{{ join(elems=path, sep="/") }}|{{ join(elems=mixed, sep=", ") }}"#,
            json!({"path": ["v1", "events"], "mixed": ["a", 1, true]}),
        )
        .unwrap();
        assert_eq!(out, "v1/events|a, 1, true");
    }

    #[test]
    fn join_requires_an_array() {
        assert!(render(r#"{{ join(elems=name, sep="/") }}"#, json!({"name": "x"})).is_err());
    }

    #[test]
    fn json_passes_through_and_text_is_escaped() {
        let out = render(
            "{{ a | json_or_plaintext }}|{{ b | json_or_plaintext }}",
            json!({"a": "{\"k\": \"<v>\"}", "b": "<p>not found</p>"}),
        )
        .unwrap();
        assert_eq!(out, "{\"k\": \"<v>\"}|&lt;p&gt;not found&lt;&#x2F;p&gt;");
    }

    #[test]
    fn header_links_are_numbered_within_a_render() {
        let out = render(
            r#"{% for h in headers %}{{ format_header_link(text=h) }} {% endfor %}{{ format_header_path(text="Sample") }}"#,
            json!({"headers": ["sample request body", "sample request body", "Other"]}),
        )
        .unwrap();
        assert_eq!(
            out,
            "[sample request body](#sample-request-body) [sample request body](#sample-request-body-1) [Other](#other) #sample"
        );
    }

    #[test]
    fn header_link_requires_text() {
        assert!(render("{{ format_header_link() }}", json!({})).is_err());
    }
}
