use crate::parsers::{Collection, Endpoint, Item, StatusRange};
use regex::Regex;
use std::sync::OnceLock;

/// Remove every sample response whose status code is outside all of the given
/// ranges. With no ranges the collection is left untouched.
pub fn filter_responses_by_status(collection: &mut Collection, status_ranges: &[StatusRange]) {
    if status_ranges.is_empty() {
        return;
    }

    filter_items(&mut collection.item, status_ranges);
}

fn filter_items(items: &mut [Item], status_ranges: &[StatusRange]) {
    for item in items {
        match item {
            Item::Folder(folder) => filter_items(&mut folder.item, status_ranges),
            Item::Endpoint(endpoint) => {
                let before = endpoint.response.len();
                endpoint
                    .response
                    .retain(|response| status_ranges.iter().any(|range| range.contains(response.code)));

                if endpoint.response.len() != before {
                    log::debug!(
                        "Removed {} response(s) from {:?}",
                        before - endpoint.response.len(),
                        endpoint.name
                    );
                }
            }
        }
    }
}

/// Set `level` on every item and response. Top-level items are level 1 and each
/// folder adds one; responses share the level of their endpoint.
pub fn add_level_property(collection: &mut Collection) {
    assign_levels(&mut collection.item, 1);
}

fn assign_levels(items: &mut [Item], level: usize) {
    for item in items {
        match item {
            Item::Folder(folder) => {
                folder.level = level;
                assign_levels(&mut folder.item, level + 1);
            }
            Item::Endpoint(endpoint) => {
                endpoint.level = level;
                for response in &mut endpoint.response {
                    response.level = level;
                }
            }
        }
    }
}

/// Blank out the display name of every sample response.
pub fn clear_response_names(collection: &mut Collection) {
    fn clear(items: &mut [Item]) {
        for item in items {
            match item {
                Item::Folder(folder) => clear(&mut folder.item),
                Item::Endpoint(endpoint) => endpoint
                    .response
                    .iter_mut()
                    .for_each(|response| response.name.clear()),
            }
        }
    }

    clear(&mut collection.item);
}

/// Version of the API, taken from the first URL path segment of the first
/// endpoint when it looks like `v1`, `v2`, ...
pub fn collection_version(collection: &Collection) -> Option<String> {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    let pattern = VERSION.get_or_init(|| Regex::new(r"v\d+").expect("valid version pattern"));

    let endpoint = first_endpoint(&collection.item)?;
    let segment = endpoint
        .request
        .get("url")?
        .get("path")?
        .as_array()?
        .first()?
        .as_str()?;

    pattern.is_match(segment).then(|| segment.to_string())
}

fn first_endpoint(items: &[Item]) -> Option<&Endpoint> {
    items.iter().find_map(|item| match item {
        Item::Folder(folder) => first_endpoint(&folder.item),
        Item::Endpoint(endpoint) => Some(endpoint),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{parse_collection, parse_status_ranges, Response};

    const SAMPLE: &str = include_str!("../samples/calendar-API.postman_collection.json");

    fn sample() -> Collection {
        parse_collection(SAMPLE.as_bytes()).unwrap()
    }

    fn all_responses(items: &[Item]) -> Vec<&Response> {
        items
            .iter()
            .flat_map(|item| match item {
                Item::Folder(folder) => all_responses(&folder.item),
                Item::Endpoint(endpoint) => endpoint.response.iter().collect(),
            })
            .collect()
    }

    fn assert_levels(items: &[Item], want: usize) {
        for item in items {
            assert_eq!(item.level(), want, "item {:?}", item.name());
            match item {
                Item::Folder(folder) => assert_levels(&folder.item, want + 1),
                Item::Endpoint(endpoint) => {
                    for response in &endpoint.response {
                        assert_eq!(response.level, want, "response of {:?}", endpoint.name);
                    }
                }
            }
        }
    }

    #[test]
    fn filter_keeps_only_codes_in_range() {
        let mut collection = sample();
        filter_responses_by_status(&mut collection, &parse_status_ranges("200").unwrap());

        let responses = all_responses(&collection.item);
        assert_eq!(responses.len(), 4);
        assert!(responses.iter().all(|response| response.code == 200));
    }

    #[test]
    fn filter_uses_union_of_ranges() {
        let mut collection = sample();
        let ranges = parse_status_ranges("404,200").unwrap();
        filter_responses_by_status(&mut collection, &ranges);

        let codes: Vec<u16> = all_responses(&collection.item).iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![200, 404, 200, 404, 200, 200]);
    }

    #[test]
    fn filter_removes_every_response_outside_ranges() {
        let original = sample();
        let mut collection = original.clone();
        let ranges = parse_status_ranges("401").unwrap();
        filter_responses_by_status(&mut collection, &ranges);

        let kept = all_responses(&collection.item);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].code, 401);

        let removed = all_responses(&original.item).len() - kept.len();
        assert_eq!(removed, 6);
    }

    #[test]
    fn filter_without_ranges_changes_nothing() {
        let mut collection = sample();
        filter_responses_by_status(&mut collection, &[]);
        assert_eq!(collection, sample());
    }

    #[test]
    fn filter_is_idempotent() {
        let ranges = parse_status_ranges("200-299,401").unwrap();
        let mut once = sample();
        filter_responses_by_status(&mut once, &ranges);
        let mut twice = once.clone();
        filter_responses_by_status(&mut twice, &ranges);

        assert_eq!(once, twice);
    }

    #[test]
    fn levels_follow_folder_depth() {
        let mut collection = sample();
        add_level_property(&mut collection);
        assert_levels(&collection.item, 1);

        let Item::Folder(events) = &collection.item[0] else {
            panic!("expected the events folder first");
        };
        let Item::Folder(attendees) = &events.item[2] else {
            panic!("expected the attendees folder");
        };
        assert_eq!(attendees.level, 2);
        assert_eq!(attendees.item[0].level(), 3);
    }

    #[test]
    fn input_levels_do_not_override_computed_levels() {
        let json = format!(
            r#"{{"info": {{"name": "x", "schema": "{}"}}, "item": [
                {{"name": "e", "level": 99, "request": {{}}, "response": [{{"code": 200, "level": 7}}]}}
            ]}}"#,
            crate::parsers::POSTMAN_SCHEMA_V2_1
        );
        let mut collection = parse_collection(json.as_bytes()).unwrap();
        add_level_property(&mut collection);

        let rendered = serde_json::to_value(&collection).unwrap();
        assert_eq!(rendered["item"][0]["level"], 1);
        assert_eq!(rendered["item"][0]["response"][0]["level"], 1);
    }

    #[test]
    fn folder_with_two_endpoints_filtered_then_leveled() {
        let json = format!(
            r#"{{"info": {{"name": "x", "schema": "{}"}}, "item": [{{"name": "folder", "item": [
                {{"name": "a", "request": {{}}, "response": [{{"code": 200}}, {{"code": 404}}]}},
                {{"name": "b", "request": {{}}, "response": [{{"code": 404}}, {{"code": 200}}]}}
            ]}}]}}"#,
            crate::parsers::POSTMAN_SCHEMA_V2_1
        );
        let mut collection = parse_collection(json.as_bytes()).unwrap();

        filter_responses_by_status(&mut collection, &parse_status_ranges("200").unwrap());
        add_level_property(&mut collection);

        let responses = all_responses(&collection.item);
        assert_eq!(responses.len(), 2);
        for response in responses {
            assert_eq!(response.code, 200);
            assert_eq!(response.level, 2);
        }
    }

    #[test]
    fn clears_response_names_at_every_depth() {
        let mut collection = sample();
        clear_response_names(&mut collection);

        assert!(all_responses(&collection.item).iter().all(|r| r.name.is_empty()));
        assert_eq!(collection.item[0].name(), "events");
    }

    #[test]
    fn detects_version_from_first_endpoint() {
        assert_eq!(collection_version(&sample()).as_deref(), Some("v1"));
    }

    #[test]
    fn no_version_without_versioned_path() {
        let unversioned = SAMPLE.replace("\"v1\", ", "");
        let collection = parse_collection(unversioned.as_bytes()).unwrap();
        assert_eq!(collection_version(&collection), None);
    }
}
