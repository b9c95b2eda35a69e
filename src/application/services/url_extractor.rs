use serde_json::Value;

/// Keys that commonly hold the image URL, most specific first.
const PRIORITY_KEYS: [&str; 7] = [
    "original",
    "url_original",
    "url",
    "img",
    "image",
    "src",
    "link",
];

/// Finds an image URL in an arbitrary JSON body.
pub struct UrlExtractor;

impl UrlExtractor {
    /// Finds a plausible image URL anywhere in a JSON document.
    ///
    /// Arrays are searched in order. In an object the priority keys win over
    /// anything nested below it. Returns an empty string when nothing matches.
    pub fn extract(value: &Value) -> String {
        match value {
            Value::Array(items) => items
                .iter()
                .map(Self::extract)
                .find(|url| !url.is_empty())
                .unwrap_or_default(),
            Value::Object(map) => {
                let direct = PRIORITY_KEYS.iter().find_map(|key| match map.get(*key) {
                    Some(Value::String(url)) if url.starts_with("http") => Some(url.clone()),
                    _ => None,
                });

                direct.unwrap_or_else(|| {
                    map.values()
                        .map(Self::extract)
                        .find(|url| !url.is_empty())
                        .unwrap_or_default()
                })
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => String::new(),
        }
    }
}
